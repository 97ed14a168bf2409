//! Application router shared by `main.rs` and the integration tests.

use std::time::Duration;

use axum::extract::Request;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Header carrying the per-request correlation id. A client-supplied value
/// is kept; otherwise a UUID v4 is generated.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Methods the catalogue and comment routes answer to.
const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
];

/// Build the application [`Router`]: `/health` at the root, the resource
/// routes under `/api`, wrapped in the middleware stack.
///
/// Layers run outermost first: CORS, request id, tracing, request id echo,
/// timeout (408), then panic recovery (500).
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(build_cors_layer(&config.cors_origins))
        .map_response(IntoResponse::into_response)
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(CatchPanicLayer::new());

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(middleware)
        .with_state(state)
}

/// Span for one request, tagged with the id set by [`SetRequestIdLayer`].
fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id
    )
}

/// CORS for the configured browser origins. The request id header is
/// exposed so front-ends can report it.
///
/// Panics at startup if any configured origin is invalid.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<_> = origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, REQUEST_ID_HEADER])
        .expose_headers([REQUEST_ID_HEADER])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
