use crate::error::EncodeError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Target uid used when none is configured
pub const DEFAULT_UID: &str = "mai";

/// Lovense developer credentials, read once at startup and passed into dispatch
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
    uid: String,
}

impl Credentials {
    /// Empty strings are treated the same as absent values.
    pub fn new(token: Option<String>, uid: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            uid: uid
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_UID.to_string()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(None, None)
    }
}

// Keeps the token out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("uid", &self.uid)
            .finish()
    }
}

/// Vibration strength, always within `0..=20`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 20;

    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX))
    }

    /// Clamp an arbitrary number into range and round it to the nearest level.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        let level = round_half_up(value.clamp(Self::MIN as f64, Self::MAX as f64));
        Self(level as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A duration in seconds as sent to the API
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Seconds(f64);

impl Seconds {
    pub const ZERO: Seconds = Seconds(0.0);

    pub fn new(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    pub fn as_millis(self) -> f64 {
        self.0 * 1000.0
    }
}

// Whole values go out as JSON integers (`5`, not `5.0`)
impl Serialize for Seconds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
        if self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Built-in patterns resolved by the Lovense API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Pulse,
    Wave,
    Fireworks,
    Earthquake,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Pulse,
        Preset::Wave,
        Preset::Fireworks,
        Preset::Earthquake,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Pulse => "pulse",
            Preset::Wave => "wave",
            Preset::Fireworks => "fireworks",
            Preset::Earthquake => "earthquake",
        }
    }

    /// Comma-separated list of valid names, for error messages and schemas
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Preset {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lowered)
            .ok_or(EncodeError::InvalidPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to the nearest integer with halves going up (`2.5 -> 3`, `-2.5 -> -2`).
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
