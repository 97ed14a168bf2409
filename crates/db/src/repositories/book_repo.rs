//! Repository for the `books` table.
//!
//! Every read returns the book joined with its movie so handlers can embed
//! the movie without a second query.

use shelf_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, BookRow, CreateBook, UpdateBook};

/// Columns selected from `books b LEFT JOIN movies m`.
const JOINED_COLUMNS: &str = "\
    b.id, b.title, b.date, b.category, b.movie_id, \
    m.title AS movie_title, m.date AS movie_date, \
    m.budget::TEXT AS movie_budget, m.actors AS movie_actors";

/// Provides CRUD operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning it with its movie embedded.
    ///
    /// A `movie_id` that does not exist fails with a foreign-key violation.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "WITH b AS (
                INSERT INTO books (title, date, category, movie_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM b LEFT JOIN movies m ON m.id = b.movie_id"
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(&input.title)
            .bind(input.date)
            .bind(&input.category)
            .bind(input.movie_id)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Find a book by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM books b LEFT JOIN movies m ON m.id = b.movie_id
             WHERE b.id = $1"
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Book::from))
    }

    /// List all books in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM books b LEFT JOIN movies m ON m.id = b.movie_id
             ORDER BY b.id"
        );
        let rows = sqlx::query_as::<_, BookRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    /// List the books that reference a movie.
    pub async fn list_by_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM books b LEFT JOIN movies m ON m.id = b.movie_id
             WHERE b.movie_id = $1
             ORDER BY b.id"
        );
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    /// Count the books that reference a movie.
    pub async fn count_by_movie(pool: &PgPool, movie_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE movie_id = $1")
            .bind(movie_id)
            .fetch_one(pool)
            .await
    }

    /// Overwrite every field of a book. A `None` movie detaches it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "WITH b AS (
                UPDATE books SET
                    title = $2,
                    date = $3,
                    category = $4,
                    movie_id = $5
                WHERE id = $1
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM b LEFT JOIN movies m ON m.id = b.movie_id"
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.date)
            .bind(&input.category)
            .bind(input.movie_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Book::from))
    }

    /// Update a book. Only fields present in `input` are applied.
    ///
    /// `movie_id` uses `Option<Option<_>>` so that an explicit `null`
    /// detaches the movie while an absent field keeps it.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let movie_provided = input.movie_id.is_some();
        let movie_value = input.movie_id.flatten();

        let query = format!(
            "WITH b AS (
                UPDATE books SET
                    title = COALESCE($2, title),
                    date = COALESCE($3, date),
                    category = COALESCE($4, category),
                    movie_id = CASE WHEN $5 THEN $6 ELSE movie_id END
                WHERE id = $1
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM b LEFT JOIN movies m ON m.id = b.movie_id"
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.date)
            .bind(&input.category)
            .bind(movie_provided)
            .bind(movie_value)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Book::from))
    }

    /// Delete a book by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
