use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS for browser-based MCP clients.
///
/// Answers `OPTIONS` on every path itself and stamps
/// `Access-Control-Allow-Origin: *` on all other responses.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
