//! Shared type definitions for the Ashfall survival simulation.
//!
//! This crate is the single source of truth for the value types exchanged
//! between the clock, the survival engine, and the host. Types flow
//! downstream to `TypeScript` via `ts-rs` for the UI layer.
//!
//! # Modules
//!
//! - [`time`] -- Decomposed game time, day/night stage, and season
//! - [`attributes`] -- Player attributes and death reasons
//! - [`state`] -- Save payloads, snapshots, and collaborator records

pub mod attributes;
pub mod state;
pub mod time;

// Re-export all public types at crate root for convenience.
pub use attributes::{Attribute, DeathReason};
pub use state::{BuildingState, ClockSave, ClockSnapshot, SleepDuration, SleepState, WeatherEffect};
pub use time::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, Season, Stage, TimeParts};
