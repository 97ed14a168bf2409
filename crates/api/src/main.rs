use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelf_api::config::ServerConfig;
use shelf_api::router::build_app_router;
use shelf_api::state::AppState;
use shelf_db::repositories::ContentTypeRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        edit_window_secs = config.comments.edit_window_secs,
        site_id = config.comments.site_id,
        "Loaded server configuration",
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = shelf_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    shelf_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    shelf_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Content types ---
    let content_types = ContentTypeRepo::load_registry(&pool)
        .await
        .expect("Failed to load content types");
    if content_types.is_empty() {
        tracing::warn!("No commentable content types registered");
    }
    tracing::info!(count = content_types.len(), "Content types loaded");

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        content_types: Arc::new(content_types),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .into_future();
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    tokio::select! {
        result = server => result.expect("Server error"),
        () = drain_deadline(drain) => {
            tracing::warn!(timeout_secs = drain.as_secs(), "Shutdown drain timed out");
        }
    }

    // --- Post-shutdown cleanup ---
    pool.close().await;
    tracing::info!("Database pool closed");
    tracing::info!("Graceful shutdown complete");
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls filtering; `LOG_FORMAT=json` switches to
/// line-delimited JSON output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shelf_api=debug,shelf_db=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Resolve `timeout` after a shutdown signal arrives; never before.
async fn drain_deadline(timeout: Duration) {
    shutdown_signal().await;
    tokio::time::sleep(timeout).await;
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
