//! Error types shared across Motionflow crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Permission category a host may gate separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    Motion,
    Orientation,
}

impl PermissionCategory {
    /// Order in which categories are requested during initialization.
    pub const REQUEST_ORDER: [PermissionCategory; 2] =
        [PermissionCategory::Motion, PermissionCategory::Orientation];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionCategory::Motion => "motion",
            PermissionCategory::Orientation => "orientation",
        }
    }
}

impl fmt::Display for PermissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PermissionCategory {
    type Err = MotionflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "motion" => Ok(PermissionCategory::Motion),
            "orientation" => Ok(PermissionCategory::Orientation),
            other => Err(MotionflowError::config(format!(
                "unknown permission category '{other}' (expected motion|orientation)"
            ))),
        }
    }
}

/// Top-level error type for Motionflow operations.
#[derive(Debug, thiserror::Error)]
pub enum MotionflowError {
    /// The host exposes neither motion nor orientation events.
    #[error("Unsupported host: {message}")]
    Unsupported { message: String },

    /// The user or platform refused a permission grant.
    #[error("Permission denied: {category}")]
    PermissionDenied { category: PermissionCategory },

    /// `listen()` outside the `Ready`/`Stopped` states, or `run()` while not listening.
    #[error("Sensor tracker is not ready; call init() and then listen() once")]
    NotInitialized,

    #[error("Sensor source error: {message}")]
    Source { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MotionflowError.
pub type MotionflowResult<T> = Result<T, MotionflowError>;

impl MotionflowError {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    pub fn permission_denied(category: PermissionCategory) -> Self {
        Self::PermissionDenied { category }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether retrying the same call without caller action can succeed.
    ///
    /// Capability and permission failures are terminal until the caller
    /// intervenes (for example with a fresh user gesture).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Unsupported { .. } | Self::PermissionDenied { .. } | Self::NotInitialized
        )
    }
}
