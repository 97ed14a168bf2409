//! Movie entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelf_core::entities::Budget;
use shelf_core::types::DbId;
use sqlx::FromRow;

/// A movie row from the `movies` table.
///
/// `budget` is read back as text (`budget::TEXT`) so it keeps its exact
/// two-decimal form.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub date: i32,
    pub budget: String,
    pub actors: String,
}

/// DTO for creating a movie, also used as the full body of `PUT`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub date: i32,
    pub budget: Budget,
    pub actors: String,
}

/// DTO for partially updating a movie (`PATCH`). All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub date: Option<i32>,
    pub budget: Option<Budget>,
    pub actors: Option<String>,
}
