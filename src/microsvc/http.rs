//! HTTP transport mapping requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:command`: dispatch a command. Body = JSON input, request headers → Session.
//! - `GET /health`: health check returning `{ "ok": true, "commands": [...] }`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::service::{CommandRequest, Service};

/// Build an axum `Router` that dispatches commands via the given service.
pub fn router<B: Send + Sync + 'static>(service: Arc<Service<B>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:command", post(command_handler))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:8000"`).
pub async fn serve<B: Send + Sync + 'static>(
    service: Arc<Service<B>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await
}

async fn health_handler<B: Send + Sync + 'static>(
    State(service): State<Arc<Service<B>>>,
) -> impl IntoResponse {
    let mut commands: Vec<&str> = service.commands();
    commands.sort_unstable();
    Json(json!({ "ok": true, "commands": commands }))
}

async fn command_handler<B: Send + Sync + 'static>(
    State(service): State<Arc<Service<B>>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> impl IntoResponse {
    let request = CommandRequest {
        command,
        input,
        session_variables: session_variables(&headers),
    };
    let response = service.dispatch_request(&request);
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body))
}

/// All headers become session variables under their lowercased names.
fn session_variables(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
