//! Repository for the `content_types` table.

use shelf_core::content_type::ContentTypeRegistry;
use sqlx::PgPool;

use crate::models::content_type::ContentTypeRow;

/// Read-only access to the content-type registry.
pub struct ContentTypeRepo;

impl ContentTypeRepo {
    /// List every registered content type.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContentTypeRow>, sqlx::Error> {
        sqlx::query_as::<_, ContentTypeRow>(
            "SELECT id, app_label, model FROM content_types ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// Load the registry used to resolve comment targets.
    ///
    /// Rows for models that cannot carry comments are dropped by
    /// [`ContentTypeRegistry::from_rows`].
    pub async fn load_registry(pool: &PgPool) -> Result<ContentTypeRegistry, sqlx::Error> {
        let rows = Self::list(pool).await?;
        let registry =
            ContentTypeRegistry::from_rows(rows.into_iter().map(|r| (r.id, r.app_label, r.model)));
        tracing::debug!(count = registry.len(), "Content type registry loaded");
        Ok(registry)
    }
}
