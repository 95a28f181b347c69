//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MotionflowError, MotionflowResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Screen used when the host does not describe one.
    pub screen: ScreenDefaults,

    /// Replay/polling parameters.
    pub replay: ReplayDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default screen description for hosts without a screen descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenDefaults {
    /// Viewport width in CSS pixels.
    pub width: u32,

    /// Viewport height in CSS pixels.
    pub height: u32,

    /// Platform orientation type (e.g. "portrait-primary"). `None` means
    /// the platform orientation API is absent and the viewport heuristic applies.
    pub orientation_type: Option<String>,

    /// Platform-reported orientation angle in degrees.
    pub angle: f64,
}

/// Polling parameters for pull-based sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayDefaults {
    /// Sleep between empty polls, in milliseconds.
    pub poll_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "motionflow_tracker=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ScreenDefaults {
    fn default() -> Self {
        Self {
            width: 390,
            height: 844,
            orientation_type: None,
            angle: 0.0,
        }
    }
}

impl Default for ReplayDefaults {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is an error, so the caller can report it once logging is up.
    pub fn load() -> MotionflowResult<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> MotionflowResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            MotionflowError::config(format!("invalid config at {}: {e}", path.display()))
        })
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("motionflow").join("config.json")
}
