//! Route definitions for the `/movies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Movie routes, relative to `/api`.
///
/// ```text
/// GET    /movies/              -> list
/// POST   /movies/              -> create
/// GET    /movies/{id}/         -> get_by_id
/// PUT    /movies/{id}/         -> replace
/// PATCH  /movies/{id}/         -> update
/// DELETE /movies/{id}/         -> delete
/// GET    /movies/{id}/books/   -> list_books
/// ```
pub fn router() -> Router<AppState> {
    let collection = get(movie::list).post(movie::create);
    let item = get(movie::get_by_id)
        .put(movie::replace)
        .patch(movie::update)
        .delete(movie::delete);
    let books = get(movie::list_books);

    Router::new()
        .route("/movies", collection.clone())
        .route("/movies/", collection)
        .route("/movies/{id}", item.clone())
        .route("/movies/{id}/", item)
        .route("/movies/{id}/books", books.clone())
        .route("/movies/{id}/books/", books)
}
