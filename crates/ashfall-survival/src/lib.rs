//! Attribute decay, death detection, and sleep for the Ashfall survival
//! simulation.
//!
//! The [`DecayEngine`] consumes hourly and per-minute ticks from the game
//! clock. Each hour it decays the player's attributes through range-keyed
//! effect tables and moves body temperature toward its target; each minute
//! it checks for death. It also runs the sleep state machine, which blends
//! time acceleration with a batch recovery applied at wake.
//!
//! # Modules
//!
//! - [`config`] -- [`SurvivalConfig`] loaded from the `survival` section.
//! - [`death`] -- Death conditions and the UI hand-off.
//! - [`decay`] -- Attribute primitive, range effects, hourly decay.
//! - [`effects`] -- Effect table rows and the stock tables.
//! - [`engine`] -- [`DecayEngine`] construction and clock wiring.
//! - [`error`] -- [`SurvivalError`].
//! - [`memory`] -- [`InMemoryHost`] for headless runs and tests.
//! - [`ports`] -- Collaborator traits implemented by the host.
//! - [`range`] -- Interval strings used by the effect tables.
//! - [`simulation`] -- [`Simulation`], a clock and engine wired together.
//! - [`sleep`] -- The sleep state machine.
//! - [`temperature`] -- Target temperature and heating.
//!
//! [`DecayEngine`]: engine::DecayEngine
//! [`SurvivalConfig`]: config::SurvivalConfig
//! [`SurvivalError`]: error::SurvivalError
//! [`InMemoryHost`]: memory::InMemoryHost
//! [`Simulation`]: simulation::Simulation

pub mod config;
pub mod death;
pub mod decay;
pub mod effects;
pub mod engine;
pub mod error;
pub mod memory;
pub mod ports;
pub mod range;
pub mod simulation;
pub mod sleep;
pub mod temperature;

pub use config::{SleepConfig, SurvivalConfig};
pub use effects::{AttributeRangeEffect, AttributeRangeInfo};
pub use engine::{DecayCallbacks, DecayEngine, SurvivalClock};
pub use error::SurvivalError;
pub use memory::InMemoryHost;
pub use ports::{AttributeRepository, BuildingRepository, LogSink, SurvivalHost, UiHandoff, WeatherRepository};
pub use simulation::{Simulation, SimulationError};
