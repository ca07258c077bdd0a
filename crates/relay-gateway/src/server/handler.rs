//! HTTP and WebSocket handlers

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::server::GatewayState;
use crate::session;
use crate::transport::split_socket;

/// WebSocket entry point for relay clients
pub async fn chat_handler(
    State(state): State<GatewayState>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    match upgrade {
        Ok(ws) => ws
            .on_failed_upgrade(|e| tracing::warn!(error = %e, "WebSocket upgrade failed"))
            .on_upgrade(move |socket| handle_socket(state, socket))
            .into_response(),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected WebSocket upgrade");
            rejection.into_response()
        }
    }
}

async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let (sink, stream) = split_socket(socket);
    session::serve(state.session_config(), sink, stream).await;
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub online: usize,
}

/// Health check endpoint
pub async fn health_check(State(state): State<GatewayState>) -> Response {
    match state.hub().members().await {
        Ok(members) => Json(HealthResponse {
            status: "ok",
            online: members.len(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    online: 0,
                }),
            )
                .into_response()
        }
    }
}
