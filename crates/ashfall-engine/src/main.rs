//! Headless driver for the Ashfall survival simulation.
//!
//! Loads `ashfall-config.yaml` (or the path in `ASHFALL_CONFIG`), wires a
//! clock and decay engine to an in-memory player, and runs a fixed number
//! of frames. Progress is reported through `tracing`; the final clock save
//! payload is printed to stdout as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulation
//! 4. Run the frame loop until the frame budget is spent or the player dies
//! 5. Print the save payload

mod config;
mod error;

use std::path::PathBuf;
use std::time::Duration;

use ashfall_core::LoggingConfig;
use ashfall_survival::{InMemoryHost, Simulation};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "ashfall-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is rejected.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // Logging depends on the config, so the config is loaded first and
    // the outcome is reported once the subscriber is up.
    let (config, source) = load_config()?;
    init_tracing(&config.logging);
    info!(config = source, "ashfall-engine starting");

    let bed_building_id = config.survival.bed_building_id;
    let mut host = InMemoryHost::new();
    if let Some(level) = config.run.bed_level {
        host = host.with_building(bed_building_id, level, true);
    }

    let mut sim = Simulation::new(host, &config.time, config.survival.clone())?;
    info!(
        frames = config.run.frames,
        frame_seconds = config.run.frame_seconds,
        base_time_scale = config.time.base_time_scale,
        paced = config.run.paced,
        "Simulation initialized"
    );

    if let Some(duration) = config.run.sleep {
        if !sim.start_sleep(duration) {
            warn!(%duration, bed_building_id, "Could not fall asleep");
        }
    }

    let mut ticker = config
        .run
        .paced
        .then(|| tokio::time::interval(Duration::from_secs_f64(config.run.frame_seconds.max(0.001))));

    let report_every = config.run.report_every.max(1);
    let mut frames_run: u32 = 0;
    while frames_run < config.run.frames {
        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }
        sim.update(config.run.frame_seconds);
        frames_run = frames_run.saturating_add(1);

        if frames_run.checked_rem(report_every) == Some(0) {
            let snapshot = sim.snapshot();
            info!(
                frame = frames_run,
                time = %snapshot.parts,
                stage = %snapshot.stage,
                season = ?snapshot.season,
                accelerated = snapshot.accelerated,
                "Progress"
            );
        }

        if !sim.host().death_overlays.is_empty() {
            break;
        }
    }

    let host = sim.host();
    info!(
        frames = frames_run,
        died = ?host.death_overlays.first(),
        log_lines = host.logs.len(),
        "Simulation finished"
    );

    println!("{}", serde_json::to_string(&sim.save())?);
    Ok(())
}

/// Load configuration from disk.
///
/// Returns the config and a description of where it came from. A missing
/// file falls back to defaults.
fn load_config() -> Result<(EngineConfig, String), EngineError> {
    let path = std::env::var_os("ASHFALL_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = EngineConfig::from_file(&path)?;
        Ok((config, path.display().to_string()))
    } else {
        Ok((EngineConfig::default(), "defaults".to_owned()))
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
