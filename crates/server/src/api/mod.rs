use crate::config::{AppState, ServerConfig};
use crate::cors::cors_layer;
use anyhow::Result;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

mod handlers;

/// Start the API server
pub async fn serve(addr: &str, config: ServerConfig) -> Result<()> {
    let state = AppState::new(&config)?;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router
fn create_router(state: AppState) -> Router {
    Router::new()
        // MCP routes
        .route(
            "/mcp",
            get(handlers::catalog)
                .post(handlers::rpc)
                .fallback(handlers::not_found),
        )
        .route(
            "/sse",
            get(handlers::catalog)
                .post(handlers::rpc)
                .fallback(handlers::not_found),
        )
        // Convenience routes
        .route("/test", any(handlers::test_toys))
        .route("/qr", any(handlers::qr_code))
        .route("/health", any(handlers::health))
        .route("/", any(handlers::health))
        .fallback(handlers::not_found)
        // Middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(cors_layer())
        .with_state(Arc::new(state))
}

/// Pretty-printed JSON body
fn pretty_json<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
