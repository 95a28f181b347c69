//! Snapshot records delivered to clients.
//!
//! Every numeric value is rendered as a fixed two-decimal string so that
//! consumers see a stable representation regardless of float noise.

use serde::Serialize;

use crate::vector::{Magnitudes, Orientation, Vector3};

/// Number of decimal places used for every formatted value.
pub const SNAPSHOT_DECIMALS: usize = 2;

/// Render a value with [`SNAPSHOT_DECIMALS`] decimals.
///
/// Values exactly halfway between two representable results round away
/// from zero (`0.125` renders as `"0.13"`). Negative zero renders as `"0.00"`.
pub fn format_fixed(value: f64) -> String {
    // Exact ties are the odd multiples of 2^-(decimals + 1).
    let halves = value * 2f64.powi(SNAPSHOT_DECIMALS as i32 + 1);
    let value = if halves.fract() == 0.0 && halves % 2.0 != 0.0 {
        value + value.signum() * 10f64.powi(-(SNAPSHOT_DECIMALS as i32 + 1))
    } else {
        value
    };
    // -0.0 + 0.0 == +0.0
    format!("{:.*}", SNAPSHOT_DECIMALS, value + 0.0)
}

/// Current screen orientation as seen by the orientation resolver.
///
/// Exactly one of [`is_landscape`](Self::is_landscape) and
/// [`is_portrait`](Self::is_portrait) is true.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenOrientationInfo {
    #[serde(rename = "type")]
    orientation_type: String,
    is_landscape: bool,
    is_portrait: bool,
    angle: f64,
}

impl ScreenOrientationInfo {
    pub fn new(orientation_type: impl Into<String>, landscape: bool, angle: f64) -> Self {
        Self {
            orientation_type: orientation_type.into(),
            is_landscape: landscape,
            is_portrait: !landscape,
            angle,
        }
    }

    /// Platform orientation type string (e.g. `"landscape-primary"`).
    pub fn orientation_type(&self) -> &str {
        &self.orientation_type
    }

    pub fn is_landscape(&self) -> bool {
        self.is_landscape
    }

    pub fn is_portrait(&self) -> bool {
        self.is_portrait
    }

    /// Platform-reported angle in degrees, 0 when unavailable.
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

/// A formatted tri-axis vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedVector {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl From<&Vector3> for FormattedVector {
    fn from(v: &Vector3) -> Self {
        Self {
            x: format_fixed(v.x),
            y: format_fixed(v.y),
            z: format_fixed(v.z),
        }
    }
}

/// Formatted orientation angles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedOrientation {
    pub alpha: String,
    pub beta: String,
    pub gamma: String,
}

impl From<&Orientation> for FormattedOrientation {
    fn from(o: &Orientation) -> Self {
        Self {
            alpha: format_fixed(o.alpha),
            beta: format_fixed(o.beta),
            gamma: format_fixed(o.gamma),
        }
    }
}

/// Formatted magnitudes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedMagnitudes {
    pub accel_magnitude: String,
    pub rotation_magnitude: String,
}

impl From<&Magnitudes> for FormattedMagnitudes {
    fn from(m: &Magnitudes) -> Self {
        Self {
            accel_magnitude: format_fixed(m.accel_magnitude),
            rotation_magnitude: format_fixed(m.rotation_magnitude),
        }
    }
}

/// The full output record, produced once per sensor event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub accel: FormattedVector,
    pub rotation: FormattedVector,
    pub orientation: FormattedOrientation,
    pub screen_orientation: ScreenOrientationInfo,
    pub magnitudes: FormattedMagnitudes,
}

impl Snapshot {
    /// Format the given state into a snapshot.
    pub fn capture(
        accel: &Vector3,
        rotation: &Vector3,
        orientation: &Orientation,
        screen_orientation: ScreenOrientationInfo,
    ) -> Self {
        Self {
            accel: accel.into(),
            rotation: rotation.into(),
            orientation: orientation.into(),
            screen_orientation,
            magnitudes: (&Magnitudes::of(accel, rotation)).into(),
        }
    }

    /// Serialize as a single JSON line.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
