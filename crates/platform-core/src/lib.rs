//! Motionflow platform core contracts.
//!
//! This crate describes the host collaborators the sensor pipeline relies on
//! without coupling to a concrete platform:
//! - **Screen:** orientation descriptor with a viewport fallback
//! - **Permissions:** optional per-category grant authority
//! - **Capabilities:** one-shot probe of what the host offers

pub mod capabilities;
pub mod permissions;
pub mod screen;

pub use capabilities::*;
pub use permissions::*;
pub use screen::*;
