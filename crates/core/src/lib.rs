//! Domain layer for the shelf backend.
//!
//! No I/O lives here: the database and HTTP crates depend on these types and
//! rules so that the comment target resolution and moderation decisions can
//! be tested in isolation.

pub mod comments;
pub mod content_type;
pub mod entities;
pub mod error;
pub mod moderation;
pub mod roles;
pub mod types;
