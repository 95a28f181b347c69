//! Motionflow Data Model
//!
//! Defines the data contracts shared by every Motionflow crate:
//! - **Vectors:** Tri-axis acceleration/rotation values and device orientation
//! - **Events:** Raw samples delivered by the host sensor source
//! - **Snapshots:** The formatted, read-only record delivered to clients
//!
//! Acceleration is in m/s² (gravity included), rotation rate in deg/s and
//! orientation angles in degrees.

pub mod event;
pub mod snapshot;
pub mod vector;

pub use event::*;
pub use snapshot::*;
pub use vector::*;
