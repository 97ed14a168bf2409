#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use shelf_api::auth::jwt::{generate_access_token, JwtConfig};
use shelf_api::config::ServerConfig;
use shelf_api::router::build_app_router;
use shelf_api::state::AppState;
use shelf_core::comments::CommentConfig;
use shelf_core::roles::{ROLE_STAFF, ROLE_USER};
use shelf_db::repositories::ContentTypeRepo;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and the default comment settings.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        comments: CommentConfig::default(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the seeded content-type registry.
pub async fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config()).await
}

pub async fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let content_types = ContentTypeRepo::load_registry(&pool)
        .await
        .expect("content types should load");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        content_types: Arc::new(content_types),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Issue an access token for a regular user.
pub fn user_token(user_id: i64, username: &str) -> String {
    generate_access_token(
        user_id,
        ROLE_USER,
        username,
        Some(&format!("{username}@example.com")),
        &test_config().jwt,
    )
    .expect("token generation should succeed")
}

/// Issue an access token for a staff member.
pub fn staff_token(user_id: i64) -> String {
    generate_access_token(user_id, ROLE_STAFF, "moderator", None, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, None, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
