use crate::types::Preset;
use serde_json::Value;
use std::fmt;

/// Result type for command encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Validation failures raised while turning a tool call into a command.
///
/// These never cross the wire as exceptions: callers render them with
/// [`error_body`] and return them as ordinary results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// No tool by this name is declared.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The call did not name a tool at all.
    #[error("Missing tool name")]
    MissingToolName,

    /// The preset name is not one the API understands.
    #[error("Invalid preset. Choose from: {}", Preset::choices())]
    InvalidPreset(String),

    /// An argument had a type or value that cannot be coerced.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },
}

impl EncodeError {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Build the `{"error": "..."}` value used for every result-level failure.
pub fn error_body(message: impl fmt::Display) -> Value {
    serde_json::json!({ "error": message.to_string() })
}

/// Whether a result value is an error produced by [`error_body`].
pub fn is_error_body(value: &Value) -> bool {
    value
        .as_object()
        .map(|obj| obj.get("error").is_some_and(Value::is_string))
        .unwrap_or(false)
}
