//! Book entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelf_core::types::DbId;
use sqlx::FromRow;

use crate::models::movie::Movie;

/// A book row joined with its (optional) movie.
///
/// The `movie_*` columns come from a `LEFT JOIN movies` and are all `NULL`
/// when the book has no movie.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: DbId,
    pub title: String,
    pub date: i32,
    pub category: String,
    pub movie_id: Option<DbId>,
    pub movie_title: Option<String>,
    pub movie_date: Option<i32>,
    pub movie_budget: Option<String>,
    pub movie_actors: Option<String>,
}

/// API representation of a book with its movie embedded read-only.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub date: i32,
    pub category: String,
    pub movie_id: Option<DbId>,
    pub movie: Option<Movie>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        let movie = match (
            row.movie_id,
            row.movie_title,
            row.movie_date,
            row.movie_budget,
            row.movie_actors,
        ) {
            (Some(id), Some(title), Some(date), Some(budget), Some(actors)) => Some(Movie {
                id,
                title,
                date,
                budget,
                actors,
            }),
            _ => None,
        };
        Book {
            id: row.id,
            title: row.title,
            date: row.date,
            category: row.category,
            movie_id: movie.as_ref().map(|m| m.id),
            movie,
        }
    }
}

/// DTO for creating a book, also used as the full body of `PUT`.
///
/// A missing or `null` `movie_id` leaves the book without a movie.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub date: i32,
    pub category: String,
    #[serde(default)]
    pub movie_id: Option<DbId>,
}

/// DTO for partially updating a book (`PATCH`). All fields are optional.
///
/// `movie_id` distinguishes absent (keep) from `null` (detach).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub date: Option<i32>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub movie_id: Option<Option<DbId>>,
}
