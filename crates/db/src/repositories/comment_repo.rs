//! Repository for the `comments` table.
//!
//! Comments are never deleted through this repository; removal is a
//! soft-delete that flips `is_removed` and leaves the row in place.

use shelf_core::content_type::CommentTarget;
use shelf_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, NewComment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, content_type_id, object_pk, site_id, user_id, user_name, user_email, \
    user_url, comment, submit_date, is_public, is_removed";

/// Provides create, lookup, listing, and soft-delete for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new public, non-removed comment stamped with the current time.
    pub async fn create(pool: &PgPool, input: &NewComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments
                (content_type_id, object_pk, site_id, user_id, user_name, user_email,
                 user_url, comment, submit_date, is_public, is_removed)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), TRUE, FALSE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.content_type_id)
            .bind(&input.object_pk)
            .bind(input.site_id)
            .bind(input.user_id)
            .bind(&input.user_name)
            .bind(&input.user_email)
            .bind(&input.user_url)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID, whatever its visibility.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the visible comments on one target, oldest first.
    ///
    /// Only rows with `is_public = TRUE AND is_removed = FALSE` are returned.
    pub async fn list_for_target(
        pool: &PgPool,
        content_type_id: DbId,
        object_pk: &str,
        site_id: i32,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE content_type_id = $1
               AND object_pk = $2
               AND site_id = $3
               AND is_public = TRUE
               AND is_removed = FALSE
             ORDER BY submit_date ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(content_type_id)
            .bind(object_pk)
            .bind(site_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a comment as removed. Returns `true` if the row exists.
    ///
    /// Removing an already-removed comment is a no-op that still reports
    /// `true`.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE comments SET is_removed = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the entity a target points at exists.
    pub async fn target_exists(pool: &PgPool, target: CommentTarget) -> Result<bool, sqlx::Error> {
        let query = match target {
            CommentTarget::Book(_) => "SELECT EXISTS (SELECT 1 FROM books WHERE id = $1)",
            CommentTarget::Movie(_) => "SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)",
        };
        sqlx::query_scalar::<_, bool>(query)
            .bind(target.id())
            .fetch_one(pool)
            .await
    }
}
