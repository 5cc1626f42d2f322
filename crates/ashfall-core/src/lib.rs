//! Game clock, callback scheduler, and configuration for the Ashfall
//! survival simulation.
//!
//! The host render loop feeds real-time deltas into a [`Clock`], which
//! turns them into game time and drives every registered timer callback.
//! Everything time-dependent in the game, from hourly attribute decay to
//! sleep, is expressed as callbacks on this one clock.
//!
//! # Modules
//!
//! - [`boundary`] -- Anchoring of hourly, per-minute, and daily callbacks.
//! - [`clock`] -- The [`Clock`]: time, scale, pausing, acceleration,
//!   registration, and save/restore.
//! - [`config`] -- Configuration loading from `ashfall-config.yaml` into
//!   strongly-typed structs.
//! - [`scheduler`] -- [`Callback`] builder and the generational arena that
//!   owns registered callbacks.
//!
//! [`Clock`]: clock::Clock
//! [`Callback`]: scheduler::Callback

pub mod boundary;
pub mod clock;
pub mod config;
pub mod scheduler;

pub use clock::{Clock, ClockError, DEFAULT_PRIORITY, DayNightCallbacks};
pub use config::{ConfigError, LoggingConfig, TimeConfig};
pub use scheduler::{Callback, CallbackId, CallbackInfo, Repeat};
