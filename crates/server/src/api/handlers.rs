use super::pretty_json;
use crate::config::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lovense_core::ToolKind;
use lovense_mcp::protocol::{JsonRpcError, JsonRpcResponse, SERVER_NAME};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Tool catalog for `GET /mcp` and `GET /sse`
pub async fn catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.mcp.catalog())
}

/// JSON-RPC endpoint. The body is parsed as JSON whatever its content type.
pub async fn rpc(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting unparseable request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::error(None, JsonRpcError::parse_error())),
            )
                .into_response();
        }
    };

    match state.mcp.handle_value(&state.credentials, message).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Connected toys, for checking the setup from a browser
pub async fn test_toys(State(state): State<Arc<AppState>>) -> Response {
    let result = state
        .mcp
        .call_direct(&state.credentials, ToolKind::GetToys)
        .await;
    pretty_json(&result)
}

/// Pairing QR code
pub async fn qr_code(State(state): State<Arc<AppState>>) -> Response {
    let result = state
        .mcp
        .call_direct(&state.credentials, ToolKind::GetQrCode)
        .await;
    pretty_json(&result)
}

/// Liveness plus the declared tool names
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    pretty_json(&HealthResponse {
        status: "ok".to_string(),
        service: SERVER_NAME.to_string(),
        tools: state
            .mcp
            .tool_names()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub tools: Vec<String>,
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
