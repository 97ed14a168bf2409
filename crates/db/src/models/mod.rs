//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` create / update DTOs accepted by the API
//! - Response shapes where the row is not exposed as-is

pub mod book;
pub mod comment;
pub mod content_type;
pub mod movie;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "...")]`: a missing field
/// stays `None`, `null` becomes `Some(None)`, and a value becomes
/// `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
