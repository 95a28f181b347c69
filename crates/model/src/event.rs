//! Raw host event types.
//!
//! Hosts deliver loosely-typed payloads: a channel may be missing entirely
//! and individual axes may be null, strings or garbage. Raw values are kept
//! as-is here and only interpreted by the normalization layer.
//!
//! Recorded streams use JSONL, one event per line, tagged by `type`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An uninterpreted numeric field from a host payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawScalar(Value);

impl RawScalar {
    /// A field the host did not report.
    pub fn missing() -> Self {
        Self(Value::Null)
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Numeric interpretation of the field.
    ///
    /// Numbers map to themselves, strings are parsed after trimming (an empty
    /// string is 0), booleans map to 1/0 and null to 0. Anything that cannot
    /// be read as a number yields NaN; callers are expected to normalize it.
    pub fn as_f64(&self) -> f64 {
        match &self.0 {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Null => 0.0,
            Value::Array(_) | Value::Object(_) => f64::NAN,
        }
    }
}

impl From<f64> for RawScalar {
    fn from(v: f64) -> Self {
        // Non-finite floats have no JSON representation and become null.
        Self(serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number))
    }
}

impl From<i64> for RawScalar {
    fn from(v: i64) -> Self {
        Self(Value::from(v))
    }
}

impl From<&str> for RawScalar {
    fn from(v: &str) -> Self {
        Self(Value::String(v.to_string()))
    }
}

impl From<Option<f64>> for RawScalar {
    fn from(v: Option<f64>) -> Self {
        v.map_or_else(RawScalar::missing, RawScalar::from)
    }
}

/// Acceleration including gravity, in the device frame (m/s²).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAcceleration {
    pub x: RawScalar,
    pub y: RawScalar,
    pub z: RawScalar,
}

impl RawAcceleration {
    pub fn new(x: impl Into<RawScalar>, y: impl Into<RawScalar>, z: impl Into<RawScalar>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }
}

/// Alpha/beta/gamma triple, used both for rotation rate (deg/s) and for
/// device orientation angles (degrees).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRotation {
    pub alpha: RawScalar,
    pub beta: RawScalar,
    pub gamma: RawScalar,
}

impl RawRotation {
    pub fn new(
        alpha: impl Into<RawScalar>,
        beta: impl Into<RawScalar>,
        gamma: impl Into<RawScalar>,
    ) -> Self {
        Self {
            alpha: alpha.into(),
            beta: beta.into(),
            gamma: gamma.into(),
        }
    }
}

/// Kind of host event, also used to name the listener that receives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Motion,
    Orientation,
    ScreenChange,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::Motion,
        EventKind::Orientation,
        EventKind::ScreenChange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Motion => "motion",
            EventKind::Orientation => "orientation",
            EventKind::ScreenChange => "screen_change",
        }
    }
}

/// A single raw event from the host sensor source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEvent {
    /// Device motion sample. Either channel may be absent.
    Motion {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        acceleration_including_gravity: Option<RawAcceleration>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rotation_rate: Option<RawRotation>,
    },

    /// Device orientation sample.
    Orientation(RawRotation),

    /// The screen was rotated; carries no payload.
    ScreenChange,
}

impl RawEvent {
    /// Motion event carrying only acceleration.
    pub fn acceleration(
        x: impl Into<RawScalar>,
        y: impl Into<RawScalar>,
        z: impl Into<RawScalar>,
    ) -> Self {
        Self::Motion {
            acceleration_including_gravity: Some(RawAcceleration::new(x, y, z)),
            rotation_rate: None,
        }
    }

    /// Motion event carrying only rotation rate.
    pub fn rotation_rate(
        alpha: impl Into<RawScalar>,
        beta: impl Into<RawScalar>,
        gamma: impl Into<RawScalar>,
    ) -> Self {
        Self::Motion {
            acceleration_including_gravity: None,
            rotation_rate: Some(RawRotation::new(alpha, beta, gamma)),
        }
    }

    /// Device orientation event.
    pub fn orientation(
        alpha: impl Into<RawScalar>,
        beta: impl Into<RawScalar>,
        gamma: impl Into<RawScalar>,
    ) -> Self {
        Self::Orientation(RawRotation::new(alpha, beta, gamma))
    }

    pub fn kind(&self) -> EventKind {
        match self {
            RawEvent::Motion { .. } => EventKind::Motion,
            RawEvent::Orientation(_) => EventKind::Orientation,
            RawEvent::ScreenChange => EventKind::ScreenChange,
        }
    }
}

/// Record lines of JSONL content, skipping blank lines and `#` comments.
pub fn jsonl_records(jsonl: &str) -> impl Iterator<Item = &str> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Parse events from JSONL content (one JSON object per line).
pub fn parse_events(jsonl: &str) -> Result<Vec<RawEvent>, serde_json::Error> {
    jsonl_records(jsonl).map(serde_json::from_str).collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[RawEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
