//! Content-type registry rows.

use serde::Serialize;
use shelf_core::types::DbId;
use sqlx::FromRow;

/// A row from the `content_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentTypeRow {
    pub id: DbId,
    pub app_label: String,
    pub model: String,
}
