//! Configuration types and YAML loading for the Ashfall simulation.
//!
//! The canonical configuration lives in `ashfall-config.yaml` at the
//! project root. This module defines the clock and logging sections and a
//! generic loader; other crates contribute their own sections (the survival
//! engine owns `SurvivalConfig`) and the engine binary stitches them into a
//! single document.

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Read and deserialize a YAML document from disk.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, or
/// [`ConfigError::Yaml`] if the content does not match `T`.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_yaml(&contents)
}

/// Deserialize a YAML document from a string.
///
/// # Errors
///
/// Returns [`ConfigError::Yaml`] if the content does not match `T`.
pub fn parse_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T, ConfigError> {
    Ok(serde_yml::from_str(yaml)?)
}

/// Clock and calendar configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeConfig {
    /// Game seconds that pass per real second at normal speed.
    #[serde(default = "default_base_time_scale")]
    pub base_time_scale: f64,

    /// First hour of the day stage (inclusive).
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,

    /// First hour of the night stage (the day window is half-open).
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u32,

    /// Game time in seconds at which a new game starts.
    #[serde(default = "default_start_time")]
    pub start_time: f64,

    /// Real-second budget for accelerated work and sleep.
    #[serde(default = "default_work_time_real_seconds")]
    pub work_time_real_seconds: f64,

    /// Length of one season in days.
    #[serde(default = "default_days_per_season")]
    pub days_per_season: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            base_time_scale: default_base_time_scale(),
            day_start_hour: default_day_start_hour(),
            day_end_hour: default_day_end_hour(),
            start_time: default_start_time(),
            work_time_real_seconds: default_work_time_real_seconds(),
            days_per_season: default_days_per_season(),
        }
    }
}

/// Diagnostic logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// 10 minutes of game time per 6 real seconds.
const fn default_base_time_scale() -> f64 {
    100.0
}

const fn default_day_start_hour() -> u32 {
    6
}

const fn default_day_end_hour() -> u32 {
    20
}

// 6:00:01 on day 0.
const fn default_start_time() -> f64 {
    21_601.0
}

const fn default_work_time_real_seconds() -> f64 {
    3.0
}

const fn default_days_per_season() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_owned()
}
