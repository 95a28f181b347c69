//! Tri-axis vectors and device orientation.

use serde::{Deserialize, Serialize};

/// A tri-axis sample in the screen frame.
///
/// Used for both acceleration (m/s²) and rotation rate (deg/s).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm. Never negative.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Device orientation angles in degrees.
///
/// `alpha` is the compass heading in `[0, 360)`, `beta` the front/back tilt
/// in `[-180, 180]` and `gamma` the left/right tilt in `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Orientation {
    pub const ZERO: Orientation = Orientation {
        alpha: 0.0,
        beta: 0.0,
        gamma: 0.0,
    };

    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// Derived magnitudes over the current acceleration and rotation state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Magnitudes {
    pub accel_magnitude: f64,
    pub rotation_magnitude: f64,
}

impl Magnitudes {
    pub fn of(accel: &Vector3, rotation: &Vector3) -> Self {
        Self {
            accel_magnitude: accel.magnitude(),
            rotation_magnitude: rotation.magnitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_is_euclidean_norm() {
        assert_eq!(Vector3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
        assert_eq!(Vector3::new(-3.0, -4.0, 0.0).magnitude(), 5.0);
        assert_eq!(Vector3::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn magnitudes_cover_both_vectors() {
        let m = Magnitudes::of(&Vector3::new(0.0, 9.81, 0.0), &Vector3::new(2.0, 3.0, 6.0));
        assert!((m.accel_magnitude - 9.81).abs() < 1e-12);
        assert!((m.rotation_magnitude - 7.0).abs() < 1e-12);
    }
}
