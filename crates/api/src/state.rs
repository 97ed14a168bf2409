use std::sync::Arc;

use shelf_core::content_type::ContentTypeRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shelf_db::DbPool,
    /// Server configuration, including JWT and comment settings.
    pub config: Arc<ServerConfig>,
    /// Content types that comments may target, loaded at startup.
    pub content_types: Arc<ContentTypeRegistry>,
}
