//! Command encoder: maps a tool call onto a Lovense API request.
//!
//! Every tool has a pure encoding function selected by [`ToolKind`]. Argument
//! handling follows one rule throughout: a missing, `null`, `false`, `0` or
//! empty-string argument takes the tool's default. Numeric strings are
//! accepted as numbers; anything else is an [`EncodeError::InvalidArgument`].

use crate::command::{Action, Command, PatternRule, Strengths};
use crate::error::{EncodeError, EncodeResult};
use crate::tool::{Arguments, ToolInvocation, ToolKind};
use crate::types::{Intensity, Preset, Seconds};
use serde_json::Value;

/// Points in an `escalate` ramp are `ESCALATE_STEPS + 1`
const ESCALATE_STEPS: u32 = 10;

const DEFAULT_PATTERN: &str = "5;10;15;20;15;10;5";
const DEFAULT_PATTERN_INTERVAL_MS: f64 = 500.0;

const TEASE_SEQUENCE: [u8; 18] = [3, 5, 2, 8, 4, 10, 3, 6, 12, 5, 8, 3, 15, 4, 7, 2, 10, 5];
const TEASE_INTERVAL_MS: u64 = 800;

/// What a tool call turns into
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    /// Request a pairing QR code
    QrCode,
    /// Send a command to the paired toys
    Command(Command),
}

type EncodeFn = fn(&Arguments) -> EncodeResult<Encoded>;

impl ToolKind {
    fn encoder(self) -> EncodeFn {
        match self {
            ToolKind::GetQrCode => encode_qr_code,
            ToolKind::GetToys => encode_get_toys,
            ToolKind::Vibrate => encode_vibrate,
            ToolKind::VibratePattern => encode_vibrate_pattern,
            ToolKind::Pattern => encode_pattern,
            ToolKind::Preset => encode_preset,
            ToolKind::Stop => encode_stop,
            ToolKind::Edge => encode_edge,
            ToolKind::Tease => encode_tease,
            ToolKind::Escalate => encode_escalate,
        }
    }
}

/// Encode a tool call, or explain why it cannot be sent.
pub fn encode(invocation: &ToolInvocation) -> EncodeResult<Encoded> {
    let kind: ToolKind = invocation.name.parse()?;
    (kind.encoder())(&invocation.arguments)
}

fn encode_qr_code(_args: &Arguments) -> EncodeResult<Encoded> {
    Ok(Encoded::QrCode)
}

fn encode_get_toys(_args: &Arguments) -> EncodeResult<Encoded> {
    Ok(Encoded::Command(Command::GetToys))
}

fn encode_vibrate(args: &Arguments) -> EncodeResult<Encoded> {
    Ok(Encoded::Command(Command::Function {
        action: Action::Vibrate(intensity(args, "intensity", 10)?),
        time_sec: seconds(args, "duration", 5.0)?,
        loop_running_sec: None,
        loop_pause_sec: None,
    }))
}

fn encode_vibrate_pattern(args: &Arguments) -> EncodeResult<Encoded> {
    looping_vibration(args, 10, 10.0, 2.0, 1.0)
}

fn encode_edge(args: &Arguments) -> EncodeResult<Encoded> {
    looping_vibration(args, 15, 30.0, 5.0, 3.0)
}

fn looping_vibration(
    args: &Arguments,
    default_intensity: u8,
    default_duration: f64,
    default_on: f64,
    default_off: f64,
) -> EncodeResult<Encoded> {
    Ok(Encoded::Command(Command::Function {
        action: Action::Vibrate(intensity(args, "intensity", default_intensity)?),
        time_sec: seconds(args, "duration", default_duration)?,
        loop_running_sec: Some(seconds(args, "on_sec", default_on)?),
        loop_pause_sec: Some(seconds(args, "off_sec", default_off)?),
    }))
}

fn encode_pattern(args: &Arguments) -> EncodeResult<Encoded> {
    let strength = Strengths::parse(text(args, "strengths")?.unwrap_or(DEFAULT_PATTERN))?;
    let interval_ms = number(args, "interval_ms")?
        .filter(|ms| ms.is_finite())
        .unwrap_or(DEFAULT_PATTERN_INTERVAL_MS);

    Ok(Encoded::Command(Command::Pattern {
        rule: PatternRule::vibrate(interval_ms.max(0.0).floor() as u64),
        strength,
        time_sec: seconds(args, "duration", 10.0)?,
    }))
}

fn encode_preset(args: &Arguments) -> EncodeResult<Encoded> {
    let name = match args.get("name") {
        Some(Value::String(s)) if !s.is_empty() => s.parse::<Preset>()?,
        None | Some(Value::Null) | Some(Value::Bool(false)) | Some(Value::String(_)) => {
            Preset::default()
        }
        Some(other) => return Err(EncodeError::InvalidPreset(other.to_string())),
    };

    Ok(Encoded::Command(Command::Preset {
        name,
        time_sec: seconds(args, "duration", 10.0)?,
    }))
}

fn encode_stop(_args: &Arguments) -> EncodeResult<Encoded> {
    Ok(Encoded::Command(Command::Function {
        action: Action::Stop,
        time_sec: Seconds::ZERO,
        loop_running_sec: None,
        loop_pause_sec: None,
    }))
}

fn encode_tease(args: &Arguments) -> EncodeResult<Encoded> {
    Ok(Encoded::Command(Command::Pattern {
        rule: PatternRule::vibrate(TEASE_INTERVAL_MS),
        strength: Strengths::from_levels(&TEASE_SEQUENCE),
        time_sec: seconds(args, "duration", 20.0)?,
    }))
}

fn encode_escalate(args: &Arguments) -> EncodeResult<Encoded> {
    let start = number(args, "start")?.unwrap_or(3.0);
    let peak = number(args, "peak")?.unwrap_or(18.0);
    let duration = seconds(args, "duration", 30.0)?;

    // Spread the ramp evenly over the whole duration
    let interval_ms = (duration.as_millis() / (ESCALATE_STEPS + 1) as f64).floor();

    Ok(Encoded::Command(Command::Pattern {
        rule: PatternRule::vibrate(interval_ms as u64),
        strength: Strengths::ramp(start, peak, ESCALATE_STEPS),
        time_sec: duration,
    }))
}

/// Read a numeric argument. Falsy values (and NaN) read as `None`.
fn number(args: &Arguments, name: &str) -> EncodeResult<Option<f64>> {
    let value = match args.get(name) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| EncodeError::invalid_argument(name, "number out of range"))?,
        Some(Value::String(s)) if s.is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            EncodeError::invalid_argument(name, format!("expected a number, got \"{}\"", s))
        })?,
        Some(other) => {
            return Err(EncodeError::invalid_argument(
                name,
                format!("expected a number, got {}", json_type(other)),
            ))
        }
    };

    if value == 0.0 || value.is_nan() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

fn intensity(args: &Arguments, name: &str, default: u8) -> EncodeResult<Intensity> {
    Ok(number(args, name)?
        .map(Intensity::clamped)
        .unwrap_or_else(|| Intensity::new(default)))
}

/// Durations must be positive and finite, otherwise the default applies.
fn seconds(args: &Arguments, name: &str, default: f64) -> EncodeResult<Seconds> {
    Ok(Seconds::new(
        number(args, name)?
            .filter(|secs| *secs > 0.0 && secs.is_finite())
            .unwrap_or(default),
    ))
}

fn text<'a>(args: &'a Arguments, name: &str) -> EncodeResult<Option<&'a str>> {
    match args.get(name) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(EncodeError::invalid_argument(
            name,
            format!("expected a string, got {}", json_type(other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invoke(name: &str, args: Value) -> EncodeResult<Encoded> {
        encode(&ToolInvocation::new(name, args))
    }

    fn command_json(name: &str, args: Value) -> Value {
        match invoke(name, args).unwrap() {
            Encoded::Command(command) => serde_json::to_value(&command).unwrap(),
            Encoded::QrCode => panic!("expected a command for {}", name),
        }
    }

    fn strength_levels(command: &Value) -> Vec<u8> {
        command["strength"]
            .as_str()
            .unwrap()
            .split(';')
            .map(|s| s.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_get_qr_code_and_get_toys() {
        assert_eq!(invoke("get_qr_code", json!({})).unwrap(), Encoded::QrCode);
        assert_eq!(
            invoke("get_toys", json!({"ignored": true})).unwrap(),
            Encoded::Command(Command::GetToys)
        );
    }

    #[test]
    fn test_vibrate_defaults() {
        let cmd = command_json("vibrate", json!({}));
        assert_eq!(
            cmd,
            json!({"command": "Function", "action": "Vibrate:10", "timeSec": 5})
        );
    }

    #[test]
    fn test_vibrate_clamps_intensity() {
        assert_eq!(
            command_json("vibrate", json!({"intensity": -5}))["action"],
            "Vibrate:0"
        );
        assert_eq!(
            command_json("vibrate", json!({"intensity": 99}))["action"],
            "Vibrate:20"
        );
        assert_eq!(
            command_json("vibrate", json!({"intensity": "12", "duration": "3"})),
            json!({"command": "Function", "action": "Vibrate:12", "timeSec": 3})
        );
    }

    #[test]
    fn test_zero_arguments_take_defaults() {
        let cmd = command_json("vibrate", json!({"intensity": 0, "duration": 0}));
        assert_eq!(cmd["action"], "Vibrate:10");
        assert_eq!(cmd["timeSec"], 5);

        let cmd = command_json("vibrate", json!({"intensity": null, "duration": ""}));
        assert_eq!(cmd["action"], "Vibrate:10");
        assert_eq!(cmd["timeSec"], 5);
    }

    #[test]
    fn test_negative_duration_takes_default() {
        let cmd = command_json("vibrate", json!({"duration": -3}));
        assert_eq!(cmd["timeSec"], 5);
    }

    #[test]
    fn test_invalid_numeric_argument() {
        assert_eq!(
            invoke("vibrate", json!({"intensity": "loud"})),
            Err(EncodeError::invalid_argument(
                "intensity",
                "expected a number, got \"loud\""
            ))
        );
        assert!(matches!(
            invoke("edge", json!({"on_sec": [1]})),
            Err(EncodeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_vibrate_pattern_defaults() {
        assert_eq!(
            command_json("vibrate_pattern", json!({})),
            json!({
                "command": "Function",
                "action": "Vibrate:10",
                "timeSec": 10,
                "loopRunningSec": 2,
                "loopPauseSec": 1
            })
        );
    }

    #[test]
    fn test_vibrate_pattern_overrides() {
        let cmd = command_json(
            "vibrate_pattern",
            json!({"intensity": 30, "duration": 8, "on_sec": 0.5, "off_sec": 4}),
        );
        assert_eq!(cmd["action"], "Vibrate:20");
        assert_eq!(cmd["timeSec"], 8);
        assert_eq!(cmd["loopRunningSec"], 0.5);
        assert_eq!(cmd["loopPauseSec"], 4);
    }

    #[test]
    fn test_pattern_defaults() {
        assert_eq!(
            command_json("pattern", json!({})),
            json!({
                "command": "Pattern",
                "rule": "V:1;F:v;S:500#",
                "strength": "5;10;15;20;15;10;5",
                "timeSec": 10
            })
        );
    }

    #[test]
    fn test_pattern_interval_floor() {
        let cmd = command_json("pattern", json!({"interval_ms": 50}));
        assert_eq!(cmd["rule"], "V:1;F:v;S:100#");

        let cmd = command_json("pattern", json!({"interval_ms": -200}));
        assert_eq!(cmd["rule"], "V:1;F:v;S:100#");

        let cmd = command_json("pattern", json!({"interval_ms": 250.9}));
        assert_eq!(cmd["rule"], "V:1;F:v;S:250#");
    }

    #[test]
    fn test_pattern_strengths_are_clamped() {
        let cmd = command_json("pattern", json!({"strengths": "25;-3;7.6", "duration": 4}));
        assert_eq!(cmd["strength"], "20;0;8");
        assert_eq!(cmd["timeSec"], 4);
    }

    #[test]
    fn test_pattern_rejects_non_numeric_strengths() {
        assert!(matches!(
            invoke("pattern", json!({"strengths": "1;abc"})),
            Err(EncodeError::InvalidArgument { name, .. }) if name == "strengths"
        ));
        assert!(matches!(
            invoke("pattern", json!({"strengths": 5})),
            Err(EncodeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_preset_accepts_any_case() {
        assert_eq!(
            command_json("preset", json!({"name": "PULSE"})),
            json!({"command": "Preset", "name": "pulse", "timeSec": 10})
        );
        assert_eq!(
            command_json("preset", json!({"name": "Fireworks", "duration": 15}))["name"],
            "fireworks"
        );
    }

    #[test]
    fn test_preset_default_name() {
        assert_eq!(command_json("preset", json!({}))["name"], "pulse");
        assert_eq!(command_json("preset", json!({"name": ""}))["name"], "pulse");
    }

    #[test]
    fn test_preset_rejects_unknown_name() {
        let err = invoke("preset", json!({"name": "disco"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid preset. Choose from: pulse, wave, fireworks, earthquake"
        );
        assert!(matches!(
            invoke("preset", json!({"name": 3})),
            Err(EncodeError::InvalidPreset(_))
        ));
    }

    #[test]
    fn test_stop_is_fixed() {
        assert_eq!(
            command_json("stop", json!({"duration": 10})),
            json!({"command": "Function", "action": "Stop", "timeSec": 0})
        );
    }

    #[test]
    fn test_edge_defaults() {
        assert_eq!(
            command_json("edge", json!({})),
            json!({
                "command": "Function",
                "action": "Vibrate:15",
                "timeSec": 30,
                "loopRunningSec": 5,
                "loopPauseSec": 3
            })
        );
        assert_eq!(
            command_json("edge", json!({"intensity": 50}))["action"],
            "Vibrate:20"
        );
    }

    #[test]
    fn test_tease_is_fixed_sequence() {
        let cmd = command_json("tease", json!({}));
        assert_eq!(cmd["rule"], "V:1;F:v;S:800#");
        assert_eq!(cmd["strength"], "3;5;2;8;4;10;3;6;12;5;8;3;15;4;7;2;10;5");
        assert_eq!(cmd["timeSec"], 20);

        assert_eq!(command_json("tease", json!({"duration": 45}))["timeSec"], 45);
    }

    #[test]
    fn test_escalate_defaults() {
        let cmd = command_json("escalate", json!({"start": 3, "peak": 18, "duration": 30}));
        let levels = strength_levels(&cmd);

        assert_eq!(levels.len(), 11);
        assert_eq!(levels.first(), Some(&3));
        assert_eq!(levels.last(), Some(&18));
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(levels, vec![3, 5, 6, 8, 9, 11, 12, 14, 15, 17, 18]);
        assert_eq!(cmd["rule"], "V:1;F:v;S:2727#");
        assert_eq!(cmd["timeSec"], 30);

        assert_eq!(command_json("escalate", json!({})), cmd);
    }

    #[test]
    fn test_escalate_fractional_endpoints() {
        let cmd = command_json("escalate", json!({"start": 2.4, "peak": 4.6}));

        assert_eq!(cmd["strength"], "2;3;3;3;3;4;4;4;4;4;5");
    }

    #[test]
    fn test_escalate_clamps_and_floors_interval() {
        let cmd = command_json("escalate", json!({"start": -4, "peak": 40, "duration": 1}));
        let levels = strength_levels(&cmd);

        assert_eq!(levels.len(), 11);
        // A start of -4 is truthy, so it clamps to 0 rather than taking the default
        assert_eq!(levels[0], 0);
        assert_eq!(levels[10], 20);
        // 1000 / 11 = 90ms, raised to the 100ms floor
        assert_eq!(cmd["rule"], "V:1;F:v;S:100#");
    }

    #[test]
    fn test_unknown_tool() {
        assert_eq!(
            invoke("dance", json!({})),
            Err(EncodeError::UnknownTool("dance".to_string()))
        );
        assert_eq!(invoke("", json!({})), Err(EncodeError::MissingToolName));
    }
}
