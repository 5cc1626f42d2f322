//! Snapshot and collaborator payload types.
//!
//! These structs cross the boundary between the simulation core and its
//! host: clock save payloads, sleep snapshots, and the small records read
//! from the building and weather repositories.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::time::{Season, Stage, TimeParts};

/// Persisted clock state. Only game time survives a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClockSave {
    /// Game time in whole seconds.
    pub time: u64,
}

/// Read-only view of the clock for UI hosts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClockSnapshot {
    /// Current game time in seconds.
    pub time: f64,
    /// Decomposed current time.
    pub parts: TimeParts,
    /// Current day/night stage.
    pub stage: Stage,
    /// Current season.
    pub season: Season,
    /// Whether at least one pause is outstanding.
    pub paused: bool,
    /// Game seconds per real second.
    pub time_scale: f64,
    /// Whether an acceleration window is active.
    pub accelerated: bool,
}

/// How long the player asked to sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SleepDuration {
    /// Exactly one game hour.
    #[serde(rename = "1hour")]
    OneHour,
    /// Exactly four game hours.
    #[serde(rename = "4hours")]
    FourHours,
    /// Until the next day-start hour.
    #[serde(rename = "untilMorning")]
    UntilMorning,
}

impl core::fmt::Display for SleepDuration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OneHour => write!(f, "1hour"),
            Self::FourHours => write!(f, "4hours"),
            Self::UntilMorning => write!(f, "untilMorning"),
        }
    }
}

/// A copy of the sleep state machine's public fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SleepState {
    /// Whether the player is currently asleep.
    pub is_sleeping: bool,
    /// Game time at which sleep began.
    pub start_time: f64,
    /// Game time at which sleep is scheduled to end.
    pub end_time: f64,
    /// Vigour restored per slept hour.
    pub vigour_recovery_per_hour: f64,
    /// Health restored per slept hour.
    pub hp_recovery_per_hour: f64,
}

/// A building as seen by the survival core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildingState {
    /// Upgrade level. Negative means not yet built.
    pub level: i32,
    /// Whether the building is currently working (lit, fuelled, usable).
    pub active: bool,
}

/// Attribute deltas contributed by the current weather.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WeatherEffect {
    /// Hourly vigour delta.
    #[serde(default)]
    pub vigour: Option<f64>,
    /// Hourly spirit delta.
    #[serde(default)]
    pub spirit: Option<f64>,
    /// Offset added to the target temperature.
    #[serde(default)]
    pub temperature: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_save_payload_shape() {
        let json = serde_json::to_string(&ClockSave { time: 21_601 }).unwrap_or_default();
        assert_eq!(json, r#"{"time":21601}"#);
    }

    #[test]
    fn sleep_duration_wire_names() {
        let parsed: Result<SleepDuration, _> = serde_json::from_str("\"untilMorning\"");
        assert_eq!(parsed.ok(), Some(SleepDuration::UntilMorning));
        let json = serde_json::to_string(&SleepDuration::FourHours).unwrap_or_default();
        assert_eq!(json, "\"4hours\"");
    }

    #[test]
    fn weather_fields_are_optional() {
        let parsed: Result<WeatherEffect, _> = serde_json::from_str(r#"{"spirit": -1}"#);
        let weather = parsed.unwrap_or_default();
        assert_eq!(weather.vigour, None);
        assert_eq!(weather.spirit, Some(-1.0));
    }
}
