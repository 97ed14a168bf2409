//! Route definitions for the `/comments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Comment routes, relative to `/api`.
///
/// ```text
/// GET    /comments/           -> list
/// POST   /comments/           -> create
/// POST   /comments/preview/   -> preview
/// GET    /comments/{id}/      -> get_by_id
/// DELETE /comments/{id}/      -> delete
/// ```
pub fn router() -> Router<AppState> {
    let collection = get(comment::list).post(comment::create);
    let preview = post(comment::preview);
    let item = get(comment::get_by_id).delete(comment::delete);

    Router::new()
        .route("/comments", collection.clone())
        .route("/comments/", collection)
        .route("/comments/preview", preview.clone())
        .route("/comments/preview/", preview)
        .route("/comments/{id}", item.clone())
        .route("/comments/{id}/", item)
}
