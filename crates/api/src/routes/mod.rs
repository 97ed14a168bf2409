pub mod book;
pub mod comment;
pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Every path is served both with and without a trailing slash.
///
/// ```text
/// /books/                          list, create
/// /books/{id}/                     get, put, patch, delete
///
/// /movies/                         list, create
/// /movies/{id}/                    get, put, patch, delete
/// /movies/{id}/books/              books adapted from the movie
///
/// /comments/                       list (?object_pk, content_type_model, app_label), create
/// /comments/preview/               validate and render without storing
/// /comments/{id}/                  get, delete (soft, requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(book::router())
        .merge(movie::router())
        .merge(comment::router())
}
