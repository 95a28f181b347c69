//! Numeric coercion and bounding.
//!
//! Every value leaving this module is finite and inside its physical range.
//! Input that cannot be read as a number normalizes to 0.

use motionflow_model::RawScalar;

/// Standard gravity used to express acceleration bounds (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Acceleration bound: ±16 g.
pub const ACCEL_MAX: f64 = STANDARD_GRAVITY * 16.0;

/// Rotation-rate bound (deg/s) for axes without a dedicated range.
pub const ROTATION_MAX: f64 = 2000.0;

/// Front/back tilt bound (degrees).
pub const BETA_MAX: f64 = 180.0;

/// Left/right tilt bound (degrees).
pub const GAMMA_MAX: f64 = 90.0;

/// Values that can be read as a number. Unreadable values return NaN.
pub trait ToScalar {
    fn to_scalar(&self) -> f64;
}

impl ToScalar for f64 {
    fn to_scalar(&self) -> f64 {
        *self
    }
}

impl ToScalar for f32 {
    fn to_scalar(&self) -> f64 {
        f64::from(*self)
    }
}

impl ToScalar for i32 {
    fn to_scalar(&self) -> f64 {
        f64::from(*self)
    }
}

impl ToScalar for i64 {
    fn to_scalar(&self) -> f64 {
        *self as f64
    }
}

impl ToScalar for str {
    fn to_scalar(&self) -> f64 {
        RawScalar::from(self).as_f64()
    }
}

impl ToScalar for String {
    fn to_scalar(&self) -> f64 {
        self.as_str().to_scalar()
    }
}

impl ToScalar for RawScalar {
    fn to_scalar(&self) -> f64 {
        self.as_f64()
    }
}

impl<T: ToScalar + ?Sized> ToScalar for &T {
    fn to_scalar(&self) -> f64 {
        (**self).to_scalar()
    }
}

impl<T: ToScalar> ToScalar for Option<T> {
    fn to_scalar(&self) -> f64 {
        self.as_ref().map_or(f64::NAN, ToScalar::to_scalar)
    }
}

/// Rotation axis, selecting the bounding rule in [`normalize_rotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    /// Compass heading, wrapped into `[0, 360)`.
    Alpha,
    /// Front/back tilt, clamped to `[-180, 180]`.
    Beta,
    /// Left/right tilt, clamped to `[-90, 90]`.
    Gamma,
    /// Any other axis, clamped to `[-ROTATION_MAX, ROTATION_MAX]`.
    Rate,
}

impl RotationAxis {
    /// Map an axis label; unknown labels use the generic rate bound.
    pub fn from_label(label: &str) -> Self {
        match label {
            "alpha" => RotationAxis::Alpha,
            "beta" => RotationAxis::Beta,
            "gamma" => RotationAxis::Gamma,
            _ => RotationAxis::Rate,
        }
    }
}

/// Clamp `value` into `[min, max]`.
///
/// NaN clamps to `min`. Unlike [`f64::clamp`] this never panics.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Normalize an acceleration component to `[-ACCEL_MAX, ACCEL_MAX]`.
pub fn normalize_accel(value: impl ToScalar) -> f64 {
    let v = value.to_scalar();
    if v.is_nan() {
        return 0.0;
    }
    clamp(v, -ACCEL_MAX, ACCEL_MAX)
}

/// Normalize a rotation/angle component for the given axis.
pub fn normalize_rotation(value: impl ToScalar, axis: RotationAxis) -> f64 {
    let v = value.to_scalar();
    if v.is_nan() {
        return 0.0;
    }
    match axis {
        RotationAxis::Alpha => wrap_degrees(v),
        RotationAxis::Beta => clamp(v, -BETA_MAX, BETA_MAX),
        RotationAxis::Gamma => clamp(v, -GAMMA_MAX, GAMMA_MAX),
        RotationAxis::Rate => clamp(v, -ROTATION_MAX, ROTATION_MAX),
    }
}

/// Wrap degrees into `[0, 360)`, non-negative for negative input.
fn wrap_degrees(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    let wrapped = v.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
