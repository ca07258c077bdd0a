//! Gateway server setup
//!
//! Routes, state construction and the serve loop.

mod handler;
mod state;

pub use handler::{chat_handler, health_check, HealthResponse};
pub use state::GatewayState;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use relay_common::{AppConfig, AppError, AppResult};
use relay_db::PgMessageStore;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::hub::Hub;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/chat", get(chat_handler))
        .route("/health", get(health_check))
}

/// Build the complete application, serving files from `static_dir` for
/// every path the router does not claim
pub fn create_app(state: GatewayState, static_dir: Option<&Path>) -> Router {
    let router = create_router();

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Connect to the database and start the hub
pub async fn create_gateway_state(config: &AppConfig) -> AppResult<GatewayState> {
    tracing::info!("Connecting to PostgreSQL...");
    let db_config = relay_db::DatabaseConfig::from(&config.database);
    let pool = relay_db::create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    relay_db::ensure_schema(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    tracing::info!("PostgreSQL connection established");

    let store = Arc::new(PgMessageStore::new(pool));
    let (hub, _task) = Hub::spawn(config.hub);

    Ok(GatewayState::new(hub, store, config.hub))
}

/// Serve until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::server(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Relay listening on ws://{}/chat", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::server(format!("Server error: {e}")))?;

    tracing::info!("Relay stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Run the relay with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let address = config.gateway.address();
    let addr = tokio::net::lookup_host(&address)
        .await
        .map_err(|e| AppError::server(format!("Invalid listen address {address}: {e}")))?
        .next()
        .ok_or_else(|| AppError::server(format!("No address found for {address}")))?;

    let state = create_gateway_state(&config).await?;
    let app = create_app(state, config.gateway.static_dir.as_deref());

    run_server(app, addr).await
}
