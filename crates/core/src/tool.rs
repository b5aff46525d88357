// Tool names and invocations

use crate::error::EncodeError;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Argument bag of a tool call
pub type Arguments = Map<String, Value>;

/// Every tool this server declares, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    GetQrCode,
    GetToys,
    Vibrate,
    VibratePattern,
    Pattern,
    Preset,
    Stop,
    Edge,
    Tease,
    Escalate,
}

impl ToolKind {
    pub const ALL: [ToolKind; 10] = [
        ToolKind::GetQrCode,
        ToolKind::GetToys,
        ToolKind::Vibrate,
        ToolKind::VibratePattern,
        ToolKind::Pattern,
        ToolKind::Preset,
        ToolKind::Stop,
        ToolKind::Edge,
        ToolKind::Tease,
        ToolKind::Escalate,
    ];

    /// Wire name used in `tools/call`
    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::GetQrCode => "get_qr_code",
            ToolKind::GetToys => "get_toys",
            ToolKind::Vibrate => "vibrate",
            ToolKind::VibratePattern => "vibrate_pattern",
            ToolKind::Pattern => "pattern",
            ToolKind::Preset => "preset",
            ToolKind::Stop => "stop",
            ToolKind::Edge => "edge",
            ToolKind::Tease => "tease",
            ToolKind::Escalate => "escalate",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.as_str()).collect()
    }
}

impl FromStr for ToolKind {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EncodeError::MissingToolName);
        }
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| EncodeError::UnknownTool(s.to_string()))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single tool call: name plus arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: Arguments,
}

impl ToolInvocation {
    /// Anything other than a JSON object counts as "no arguments".
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Arguments::new(),
        };
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn without_arguments(kind: ToolKind) -> Self {
        Self {
            name: kind.as_str().to_string(),
            arguments: Arguments::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.as_str().parse::<ToolKind>().unwrap(), kind);
        }
        assert_eq!(ToolKind::names().len(), 10);
    }

    #[test]
    fn test_tool_name_lookup_is_exact() {
        assert_eq!(
            "VIBRATE".parse::<ToolKind>(),
            Err(EncodeError::UnknownTool("VIBRATE".to_string()))
        );
        assert_eq!("".parse::<ToolKind>(), Err(EncodeError::MissingToolName));
    }

    #[test]
    fn test_invocation_ignores_non_object_arguments() {
        let invocation = ToolInvocation::new("vibrate", json!([1, 2, 3]));
        assert!(invocation.arguments.is_empty());

        let invocation = ToolInvocation::new("vibrate", json!({"intensity": 4}));
        assert_eq!(invocation.arguments.get("intensity"), Some(&json!(4)));
    }
}
