use shelf_core::comments::{
    CommentConfig, DEFAULT_EDIT_WINDOW_SECS, DEFAULT_MAX_LENGTH, DEFAULT_SITE_ID,
};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds to wait for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT verification settings.
    pub jwt: JwtConfig,
    /// Comment store and moderation settings.
    pub comments: CommentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `8000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                       |
    /// | `COMMENT_EDIT_WINDOW_SECS` | `300`                      |
    /// | `COMMENT_MAX_LENGTH`       | `3000`                     |
    /// | `SITE_ID`                  | `1`                        |
    ///
    /// See [`JwtConfig::from_env`] for the JWT variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let comments = comment_config_from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            comments,
        }
    }
}

fn comment_config_from_env() -> CommentConfig {
    let edit_window_secs: i64 = std::env::var("COMMENT_EDIT_WINDOW_SECS")
        .unwrap_or_else(|_| DEFAULT_EDIT_WINDOW_SECS.to_string())
        .parse()
        .expect("COMMENT_EDIT_WINDOW_SECS must be a valid i64");

    let max_length: usize = std::env::var("COMMENT_MAX_LENGTH")
        .unwrap_or_else(|_| DEFAULT_MAX_LENGTH.to_string())
        .parse()
        .expect("COMMENT_MAX_LENGTH must be a valid usize");

    let site_id: i32 = std::env::var("SITE_ID")
        .unwrap_or_else(|_| DEFAULT_SITE_ID.to_string())
        .parse()
        .expect("SITE_ID must be a valid i32");

    let config = CommentConfig {
        edit_window_secs,
        max_length,
        site_id,
    };
    if let Err(e) = config.validate() {
        panic!("invalid comment settings (COMMENT_EDIT_WINDOW_SECS / COMMENT_MAX_LENGTH): {e}");
    }
    config
}
