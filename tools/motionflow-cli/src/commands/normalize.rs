//! Normalize a single value.

use motionflow_model::format_fixed;
use motionflow_processing::{normalize_accel, normalize_rotation, RotationAxis};

/// Which bounding rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AxisArg {
    Accel,
    Alpha,
    Beta,
    Gamma,
    Rate,
}

pub fn run(axis: AxisArg, value: String) -> anyhow::Result<()> {
    let normalized = match axis {
        AxisArg::Accel => normalize_accel(&value),
        AxisArg::Alpha => normalize_rotation(&value, RotationAxis::Alpha),
        AxisArg::Beta => normalize_rotation(&value, RotationAxis::Beta),
        AxisArg::Gamma => normalize_rotation(&value, RotationAxis::Gamma),
        AxisArg::Rate => normalize_rotation(&value, RotationAxis::Rate),
    };
    println!("{}", format_fixed(normalized));
    Ok(())
}
