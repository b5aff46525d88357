//! Error types for the relay.

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors that can occur while talking to the Lovense API.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// HTTP request failed, or the response body was not JSON.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Request body could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
