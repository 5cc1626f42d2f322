//! The `ashfall-config.yaml` document.
//!
//! Each section is owned by the crate that uses it; this module only
//! stitches them together and adds the `run` section for the headless
//! frame loop.

use std::path::Path;

use ashfall_core::config::{self, ConfigError, LoggingConfig, TimeConfig};
use ashfall_survival::SurvivalConfig;
use ashfall_types::SleepDuration;
use serde::Deserialize;

/// Root configuration structure mirroring `ashfall-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Clock and calendar.
    #[serde(default)]
    pub time: TimeConfig,

    /// Decay, temperature, and sleep balance.
    #[serde(default)]
    pub survival: SurvivalConfig,

    /// Diagnostic logging.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Headless run parameters.
    #[serde(default)]
    pub run: RunConfig,
}

impl EngineConfig {
    /// Load from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        config::parse_yaml(yaml)
    }
}

/// How the headless loop drives the simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Number of frames to run (default: 3600).
    #[serde(default = "default_frames")]
    pub frames: u32,

    /// Real seconds per frame (default: 1/60).
    #[serde(default = "default_frame_seconds")]
    pub frame_seconds: f64,

    /// Sleep between frames so the run takes real time.
    #[serde(default)]
    pub paced: bool,

    /// Frames between progress log lines (default: 600).
    #[serde(default = "default_report_every")]
    pub report_every: u32,

    /// Level of the bed given to the player, if any (default: 0).
    #[serde(default = "default_bed_level")]
    pub bed_level: Option<i32>,

    /// Go to sleep on the first frame.
    #[serde(default)]
    pub sleep: Option<SleepDuration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_seconds: default_frame_seconds(),
            paced: false,
            report_every: default_report_every(),
            bed_level: default_bed_level(),
            sleep: None,
        }
    }
}

const fn default_frames() -> u32 {
    3_600
}

const fn default_frame_seconds() -> f64 {
    1.0 / 60.0
}

const fn default_report_every() -> u32 {
    600
}

#[allow(clippy::unnecessary_wraps)]
const fn default_bed_level() -> Option<i32> {
    Some(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let parsed = EngineConfig::parse("{}");
        assert_eq!(parsed.ok(), Some(EngineConfig::default()));
    }

    #[test]
    fn run_section_parses() {
        let yaml = "\
run:
  frames: 10
  frame_seconds: 0.5
  sleep: untilMorning
  bed_level: ~
time:
  base_time_scale: 50
";
        let parsed = EngineConfig::parse(yaml);
        assert!(parsed.is_ok());
        if let Ok(cfg) = parsed {
            assert_eq!(cfg.run.frames, 10);
            assert!((cfg.run.frame_seconds - 0.5).abs() < f64::EPSILON);
            assert_eq!(cfg.run.sleep, Some(SleepDuration::UntilMorning));
            assert_eq!(cfg.run.bed_level, None);
            assert_eq!(cfg.run.report_every, 600);
            assert!((cfg.time.base_time_scale - 50.0).abs() < f64::EPSILON);
            assert_eq!(cfg.survival, SurvivalConfig::default());
        }
    }

    #[test]
    fn shipped_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../ashfall-config.yaml");
        let parsed = EngineConfig::from_file(&path);
        assert!(parsed.is_ok(), "{parsed:?}");
    }
}
