// Helper functions for creating tool input schemas

use lovense_core::{Intensity, Seconds};
use serde_json::{json, Value};

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Intensity parameter bounded to the device range
pub fn json_schema_intensity(description: &str, default: u8) -> Value {
    json!({
        "type": "number",
        "description": description,
        "minimum": Intensity::MIN,
        "maximum": Intensity::MAX,
        "default": default
    })
}

pub fn json_schema_seconds(description: &str, default: f64) -> Value {
    json!({
        "type": "number",
        "description": description,
        "exclusiveMinimum": 0,
        "default": Seconds::new(default)
    })
}

pub fn json_schema_interval(description: &str, minimum: u64, default: u64) -> Value {
    json!({
        "type": "number",
        "description": description,
        "minimum": minimum,
        "default": default
    })
}

pub fn json_schema_enum(description: &str, values: &[&str], default: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
        "enum": values,
        "default": default
    })
}
