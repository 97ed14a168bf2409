//! Repository for the `movies` table.

use shelf_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie, UpdateMovie};

/// Column list shared across queries. `budget` is cast to text to keep its
/// fixed two-decimal form.
const COLUMNS: &str = "id, title, date, budget::TEXT AS budget, actors";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, date, budget, actors)
             VALUES ($1, $2, $3::NUMERIC, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(input.date)
            .bind(input.budget.as_str())
            .bind(&input.actors)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all movies in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// Overwrite every field of a movie.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = $2,
                date = $3,
                budget = $4::NUMERIC,
                actors = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.date)
            .bind(input.budget.as_str())
            .bind(&input.actors)
            .fetch_optional(pool)
            .await
    }

    /// Update a movie. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                date = COALESCE($3, date),
                budget = COALESCE($4::NUMERIC, budget),
                actors = COALESCE($5, actors)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.date)
            .bind(input.budget.as_ref().map(|b| b.as_str()))
            .bind(&input.actors)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie by ID. Returns `true` if a row was removed.
    ///
    /// Books pointing at the movie keep existing with `movie_id` set to
    /// `NULL` (`ON DELETE SET NULL`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
