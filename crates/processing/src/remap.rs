//! Orientation-aware axis remapping.
//!
//! Device sensors report in the device frame. When the screen is rotated a
//! quarter turn into landscape, the device X/Y axes swap meaning relative to
//! the screen, and one of them flips sign so that "up" on screen stays "up".
//! In portrait the device and screen frames coincide.

use motionflow_model::{Orientation, RawAcceleration, RawRotation, Vector3};

use crate::normalize::{normalize_accel, normalize_rotation, RotationAxis, ToScalar};

/// Remap acceleration into the screen frame.
pub fn remap_acceleration(raw: &RawAcceleration, landscape: bool) -> Vector3 {
    if landscape {
        Vector3 {
            x: normalize_accel(&raw.y),
            y: normalize_accel(-raw.x.to_scalar()),
            z: normalize_accel(&raw.z),
        }
    } else {
        Vector3 {
            x: normalize_accel(&raw.x),
            y: normalize_accel(&raw.y),
            z: normalize_accel(&raw.z),
        }
    }
}

/// Remap rotation rate into the screen frame.
///
/// Components land on x/y/z and are bounded with the rule of the raw axis
/// they came from.
pub fn remap_rotation_rate(raw: &RawRotation, landscape: bool) -> Vector3 {
    if landscape {
        Vector3 {
            x: normalize_rotation(&raw.beta, RotationAxis::Beta),
            y: normalize_rotation(-raw.alpha.to_scalar(), RotationAxis::Alpha),
            z: normalize_rotation(&raw.gamma, RotationAxis::Gamma),
        }
    } else {
        Vector3 {
            x: normalize_rotation(&raw.alpha, RotationAxis::Alpha),
            y: normalize_rotation(&raw.beta, RotationAxis::Beta),
            z: normalize_rotation(&raw.gamma, RotationAxis::Gamma),
        }
    }
}

/// Remap device orientation angles into the screen frame.
pub fn remap_orientation(raw: &RawRotation, landscape: bool) -> Orientation {
    if landscape {
        Orientation {
            alpha: normalize_rotation(&raw.beta, RotationAxis::Beta),
            beta: normalize_rotation(-raw.alpha.to_scalar(), RotationAxis::Alpha),
            gamma: normalize_rotation(&raw.gamma, RotationAxis::Gamma),
        }
    } else {
        Orientation {
            alpha: normalize_rotation(&raw.alpha, RotationAxis::Alpha),
            beta: normalize_rotation(&raw.beta, RotationAxis::Beta),
            gamma: normalize_rotation(&raw.gamma, RotationAxis::Gamma),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::ACCEL_MAX;
    use motionflow_model::RawScalar;

    #[test]
    fn acceleration_landscape_swaps_and_negates() {
        let raw = RawAcceleration::new(1.0, 2.0, 3.0);
        assert_eq!(remap_acceleration(&raw, true), Vector3::new(2.0, -1.0, 3.0));
        assert_eq!(remap_acceleration(&raw, false), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn landscape_twice_is_not_identity() {
        let once = remap_acceleration(&RawAcceleration::new(1.0, 2.0, 3.0), true);
        let twice = remap_acceleration(&RawAcceleration::new(once.x, once.y, once.z), true);
        assert_eq!(twice, Vector3::new(-1.0, -2.0, 3.0));
    }

    #[test]
    fn acceleration_is_clamped_and_coerced() {
        let raw = RawAcceleration {
            x: RawScalar::from("abc"),
            y: RawScalar::from(-1000.0),
            z: RawScalar::missing(),
        };
        assert_eq!(
            remap_acceleration(&raw, false),
            Vector3::new(0.0, -ACCEL_MAX, 0.0)
        );
        // -NaN is still invalid after the landscape sign flip.
        assert_eq!(remap_acceleration(&raw, true), Vector3::new(-ACCEL_MAX, 0.0, 0.0));
    }

    #[test]
    fn rotation_rate_remap() {
        let raw = RawRotation::new(10.0, 20.0, 30.0);
        assert_eq!(remap_rotation_rate(&raw, false), Vector3::new(10.0, 20.0, 30.0));
        // y = wrap(-alpha) = 350
        assert_eq!(remap_rotation_rate(&raw, true), Vector3::new(20.0, 350.0, 30.0));
    }

    #[test]
    fn orientation_remap_bounds_by_source_axis() {
        let raw = RawRotation::new(-30.0, 200.0, -120.0);
        assert_eq!(
            remap_orientation(&raw, false),
            Orientation::new(330.0, 180.0, -90.0)
        );
        assert_eq!(
            remap_orientation(&raw, true),
            Orientation::new(180.0, 30.0, -90.0)
        );
    }
}
