//! Route definitions for the `/books` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::book;
use crate::state::AppState;

/// Book routes, relative to `/api`.
///
/// ```text
/// GET    /books/        -> list
/// POST   /books/        -> create
/// GET    /books/{id}/   -> get_by_id
/// PUT    /books/{id}/   -> replace
/// PATCH  /books/{id}/   -> update
/// DELETE /books/{id}/   -> delete
/// ```
pub fn router() -> Router<AppState> {
    let collection = get(book::list).post(book::create);
    let item = get(book::get_by_id)
        .put(book::replace)
        .patch(book::update)
        .delete(book::delete);

    Router::new()
        .route("/books", collection.clone())
        .route("/books/", collection)
        .route("/books/{id}", item.clone())
        .route("/books/{id}/", item)
}
