//! Motionflow Processing Core
//!
//! Turns raw host sensor samples into bounded, screen-aligned values:
//! - **Normalize:** Coerce loosely-typed input and clamp it to physical bounds
//! - **Remap:** Swap/negate device axes to follow landscape screen rotation
//! - **Aggregate:** Keep the latest state and format a snapshot per event
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod aggregator;
pub mod normalize;
pub mod remap;

pub use aggregator::SampleAggregator;
pub use normalize::{clamp, normalize_accel, normalize_rotation, RotationAxis, ToScalar};
