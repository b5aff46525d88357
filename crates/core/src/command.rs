// Outbound request bodies for the Lovense cloud API

use crate::error::{EncodeError, EncodeResult};
use crate::types::{Intensity, Preset, Seconds};
use serde::{Serialize, Serializer};
use std::fmt;

/// API version sent with every command
pub const API_VERSION: u8 = 2;

/// Display name sent with QR pairing requests
pub const QR_USER_NAME: &str = "Mai";

/// Version field sent with QR pairing requests
pub const QR_VERSION: u8 = 2;

/// Action string of a `Function` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Vibrate(Intensity),
    Stop,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Vibrate(level) => write!(f, "Vibrate:{}", level),
            Action::Stop => f.write_str("Stop"),
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Pattern rule header, e.g. `V:1;F:v;S:500#`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    interval_ms: u64,
}

impl PatternRule {
    /// Shortest step the API accepts between intensity changes
    pub const MIN_INTERVAL_MS: u64 = 100;

    /// Vibration-only rule; intervals below the floor are raised to it.
    pub fn vibrate(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(Self::MIN_INTERVAL_MS),
        }
    }

    pub fn interval_ms(self) -> u64 {
        self.interval_ms
    }
}

impl fmt::Display for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V:1;F:v;S:{}#", self.interval_ms)
    }
}

impl Serialize for PatternRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Semicolon-delimited intensity sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strengths(Vec<Intensity>);

impl Strengths {
    pub fn new(levels: Vec<Intensity>) -> Self {
        Self(levels)
    }

    pub fn from_levels(levels: &[u8]) -> Self {
        Self(levels.iter().copied().map(Intensity::new).collect())
    }

    /// Parse a pattern string, clamping every entry into range.
    ///
    /// Blank segments (from `"5;;10"` or a trailing `;`) are skipped.
    pub fn parse(pattern: &str) -> EncodeResult<Self> {
        let mut levels = Vec::new();
        for segment in pattern.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let value: f64 = segment.parse().map_err(|_| {
                EncodeError::invalid_argument(
                    "strengths",
                    format!("'{}' is not a number", segment),
                )
            })?;
            levels.push(Intensity::clamped(value));
        }

        if levels.is_empty() {
            return Err(EncodeError::invalid_argument(
                "strengths",
                "pattern contains no intensity values",
            ));
        }

        Ok(Self(levels))
    }

    /// Linear ramp of `steps + 1` points from `start` to `peak` inclusive.
    ///
    /// Endpoints are clamped to the device range but not rounded; only the
    /// individual points are rounded.
    pub fn ramp(start: f64, peak: f64, steps: u32) -> Self {
        let (min, max) = (Intensity::MIN as f64, Intensity::MAX as f64);
        let start = start.clamp(min, max);
        let peak = peak.clamp(min, max);
        let step_size = (peak - start) / steps as f64;
        Self(
            (0..=steps)
                .map(|i| Intensity::clamped(start + step_size * i as f64))
                .collect(),
        )
    }

    pub fn levels(&self) -> &[Intensity] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Strengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", level)?;
        }
        Ok(())
    }
}

impl Serialize for Strengths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Command-specific fields of a request to the command endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all_fields = "camelCase")]
pub enum Command {
    GetToys,
    Function {
        action: Action,
        time_sec: Seconds,
        #[serde(skip_serializing_if = "Option::is_none")]
        loop_running_sec: Option<Seconds>,
        #[serde(skip_serializing_if = "Option::is_none")]
        loop_pause_sec: Option<Seconds>,
    },
    Pattern {
        rule: PatternRule,
        strength: Strengths,
        time_sec: Seconds,
    },
    Preset {
        name: Preset,
        time_sec: Seconds,
    },
}

impl Command {
    /// Value of the `command` field
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetToys => "GetToys",
            Command::Function { .. } => "Function",
            Command::Pattern { .. } => "Pattern",
            Command::Preset { .. } => "Preset",
        }
    }
}

/// Full body POSTed to the command endpoint
#[derive(Serialize)]
pub struct CommandPayload<'a> {
    pub token: &'a str,
    pub uid: &'a str,
    #[serde(rename = "apiVer")]
    pub api_ver: u8,
    #[serde(flatten)]
    pub command: &'a Command,
}

impl<'a> CommandPayload<'a> {
    pub fn new(token: &'a str, uid: &'a str, command: &'a Command) -> Self {
        Self {
            token,
            uid,
            api_ver: API_VERSION,
            command,
        }
    }
}

/// Body POSTed to the QR pairing endpoint
#[derive(Serialize)]
pub struct QrCodeRequest<'a> {
    pub token: &'a str,
    pub uid: &'a str,
    pub uname: &'static str,
    pub v: u8,
}

impl<'a> QrCodeRequest<'a> {
    pub fn new(token: &'a str, uid: &'a str) -> Self {
        Self {
            token,
            uid,
            uname: QR_USER_NAME,
            v: QR_VERSION,
        }
    }
}
