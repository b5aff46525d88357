// Static catalog of the tools this server declares

use crate::protocol::ToolSchema;
use crate::tools::schema::{
    json_schema_enum, json_schema_intensity, json_schema_interval, json_schema_object,
    json_schema_seconds, json_schema_string,
};
use lovense_core::{PatternRule, Preset, ToolKind};
use serde_json::json;

/// Tool descriptors in declaration order, built once at startup
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolSchema>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self {
            tools: ToolKind::ALL.into_iter().map(schema_for).collect(),
        }
    }

    /// All tool schemas
    pub fn schemas(&self) -> &[ToolSchema] {
        &self.tools
    }

    /// Get a tool schema by name
    pub fn get(&self, name: &str) -> Option<&ToolSchema> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn schema_for(kind: ToolKind) -> ToolSchema {
    let (description, input_schema) = match kind {
        ToolKind::GetQrCode => (
            "Generate QR code for pairing toy with this MCP. User scans with Lovense Remote app.",
            json_schema_object(json!({}), vec![]),
        ),
        ToolKind::GetToys => (
            "Get list of connected Lovense toys",
            json_schema_object(json!({}), vec![]),
        ),
        ToolKind::Vibrate => (
            "Vibrate the toy",
            json_schema_object(
                json!({
                    "intensity": json_schema_intensity("Vibration strength 0-20 (default 10)", 10),
                    "duration": json_schema_seconds("Duration in seconds (default 5)", 5.0)
                }),
                vec![],
            ),
        ),
        ToolKind::VibratePattern => (
            "Vibrate with on/off pattern (pulsing)",
            json_schema_object(
                json!({
                    "intensity": json_schema_intensity("Vibration strength 0-20 (default 10)", 10),
                    "duration": json_schema_seconds("Total duration in seconds (default 10)", 10.0),
                    "on_sec": json_schema_seconds("Seconds of vibration per pulse (default 2)", 2.0),
                    "off_sec": json_schema_seconds("Seconds of pause between pulses (default 1)", 1.0)
                }),
                vec![],
            ),
        ),
        ToolKind::Pattern => (
            "Send custom intensity pattern",
            json_schema_object(
                json!({
                    "strengths": json_schema_string(
                        "Semicolon-separated intensity values 0-20 (e.g., \"5;10;15;20;15;10;5\")"
                    ),
                    "interval_ms": json_schema_interval(
                        "Milliseconds between each intensity change (min 100, default 500)",
                        PatternRule::MIN_INTERVAL_MS,
                        500
                    ),
                    "duration": json_schema_seconds("Total duration in seconds (default 10)", 10.0)
                }),
                vec![],
            ),
        ),
        ToolKind::Preset => {
            let names: Vec<&str> = Preset::ALL.iter().map(|p| p.as_str()).collect();
            (
                "Run a built-in pattern preset: pulse, wave, fireworks, or earthquake",
                json_schema_object(
                    json!({
                        "name": json_schema_enum(
                            "Preset name (default \"pulse\")",
                            &names,
                            Preset::default().as_str()
                        ),
                        "duration": json_schema_seconds("Duration in seconds (default 10)", 10.0)
                    }),
                    vec![],
                ),
            )
        }
        ToolKind::Stop => (
            "Stop all toy activity immediately",
            json_schema_object(json!({}), vec![]),
        ),
        ToolKind::Edge => (
            "Edging pattern - build up then stop, repeat",
            json_schema_object(
                json!({
                    "intensity": json_schema_intensity("Peak vibration strength 0-20 (default 15)", 15),
                    "duration": json_schema_seconds("Total duration in seconds (default 30)", 30.0),
                    "on_sec": json_schema_seconds("Seconds of vibration per cycle (default 5)", 5.0),
                    "off_sec": json_schema_seconds("Seconds of pause between cycles (default 3)", 3.0)
                }),
                vec![],
            ),
        ),
        ToolKind::Tease => (
            "Teasing pattern - random-feeling intensity changes",
            json_schema_object(
                json!({
                    "duration": json_schema_seconds("Duration in seconds (default 20)", 20.0)
                }),
                vec![],
            ),
        ),
        ToolKind::Escalate => (
            "Gradual escalation from low to high intensity",
            json_schema_object(
                json!({
                    "start": json_schema_intensity("Starting intensity 0-20 (default 3)", 3),
                    "peak": json_schema_intensity("Peak intensity 0-20 (default 18)", 18),
                    "duration": json_schema_seconds("Duration in seconds (default 30)", 30.0)
                }),
                vec![],
            ),
        ),
    };

    ToolSchema {
        name: kind.as_str().to_string(),
        description: description.to_string(),
        input_schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_every_tool_in_order() {
        let catalog = ToolCatalog::new();

        assert_eq!(catalog.len(), ToolKind::ALL.len());
        assert_eq!(
            catalog.names(),
            vec![
                "get_qr_code",
                "get_toys",
                "vibrate",
                "vibrate_pattern",
                "pattern",
                "preset",
                "stop",
                "edge",
                "tease",
                "escalate"
            ]
        );
    }

    #[test]
    fn test_every_schema_is_an_object() {
        let catalog = ToolCatalog::new();

        for tool in catalog.schemas() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(tool.input_schema["properties"].is_object(), "{}", tool.name);
            assert!(!tool.description.is_empty());
        }
    }

    #[test]
    fn test_intensity_bounds_and_defaults() {
        let catalog = ToolCatalog::new();
        let vibrate = catalog.get("vibrate").unwrap();
        let intensity = &vibrate.input_schema["properties"]["intensity"];

        assert_eq!(intensity["minimum"], 0);
        assert_eq!(intensity["maximum"], 20);
        assert_eq!(intensity["default"], 10);
        assert_eq!(vibrate.input_schema["properties"]["duration"]["default"], 5);
    }

    #[test]
    fn test_preset_enum() {
        let catalog = ToolCatalog::new();
        let name = &catalog.get("preset").unwrap().input_schema["properties"]["name"];

        assert_eq!(
            name["enum"],
            json!(["pulse", "wave", "fireworks", "earthquake"])
        );
        assert_eq!(name["default"], "pulse");
    }

    #[test]
    fn test_pattern_interval_minimum() {
        let catalog = ToolCatalog::new();
        let interval = &catalog.get("pattern").unwrap().input_schema["properties"]["interval_ms"];

        assert_eq!(interval["minimum"], 100);
        assert_eq!(interval["default"], 500);
    }

    #[test]
    fn test_serialized_schema_uses_input_schema_key() {
        let catalog = ToolCatalog::new();
        let value = serde_json::to_value(catalog.get("stop").unwrap()).unwrap();

        assert_eq!(value["name"], "stop");
        assert_eq!(value["inputSchema"]["required"], json!([]));
    }
}
