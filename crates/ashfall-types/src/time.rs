//! Game-time value types: decomposed time, day/night stage, and season.
//!
//! Game time itself is a plain `f64` count of seconds since day 0 at
//! 00:00:00. Everything here is derived from that number with fixed
//! divisions; nothing is stored independently.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Seconds in one minute.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// A game time broken into days, hours, minutes, and seconds.
///
/// For non-negative times produced by [`TimeParts::from_seconds`] the
/// fields satisfy `h in 0..24` and `m, s in 0..60`. Arbitrary field values
/// are still accepted by [`TimeParts::to_seconds`], which simply sums them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TimeParts {
    /// Whole days since day 0.
    pub d: i64,
    /// Hour of the day.
    pub h: i64,
    /// Minute of the hour.
    pub m: i64,
    /// Second of the minute.
    pub s: i64,
}

impl TimeParts {
    /// Decompose a game time in seconds.
    ///
    /// Each component is floored, so fractional seconds are dropped.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_seconds(time: f64) -> Self {
        let d = (time / SECONDS_PER_DAY).floor();
        let day_time = time.rem_euclid(SECONDS_PER_DAY);
        let h = (day_time / SECONDS_PER_HOUR).floor();
        let hour_time = day_time.rem_euclid(SECONDS_PER_HOUR);
        let m = (hour_time / SECONDS_PER_MINUTE).floor();
        let s = hour_time.rem_euclid(SECONDS_PER_MINUTE).floor();
        Self {
            d: d as i64,
            h: h as i64,
            m: m as i64,
            s: s as i64,
        }
    }

    /// Recombine the parts into seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_seconds(self) -> f64 {
        (self.d as f64) * SECONDS_PER_DAY
            + (self.h as f64) * SECONDS_PER_HOUR
            + (self.m as f64) * SECONDS_PER_MINUTE
            + (self.s as f64)
    }
}

impl core::fmt::Display for TimeParts {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}d {}h {}m {}s", self.d, self.h, self.m, self.s)
    }
}

/// Day or night, derived from the hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Stage {
    /// Inside the `[day_start, day_end)` window.
    Day,
    /// Outside the day window.
    Night,
}

impl Stage {
    /// Classify an hour of day against a `[day_start, day_end)` window.
    pub fn from_hour(hour: i64, day_start: u32, day_end: u32) -> Self {
        if hour >= i64::from(day_start) && hour < i64::from(day_end) {
            Self::Day
        } else {
            Self::Night
        }
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Night => write!(f, "night"),
        }
    }
}

/// One of the four blocks of the season cycle.
///
/// The discriminant order is the cycle order: a fresh game starts in
/// autumn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// Season index 0.
    Autumn,
    /// Season index 1.
    Winter,
    /// Season index 2.
    Spring,
    /// Season index 3.
    Summer,
}

impl Season {
    /// Number of seasons in one cycle.
    pub const COUNT: u32 = 4;

    /// Derive the season for a day number given the season length in days.
    ///
    /// `days_per_season` of zero is treated as one.
    pub fn from_day(day: i64, days_per_season: u32) -> Self {
        let len = i64::from(days_per_season.max(1));
        let cycle = len.saturating_mul(i64::from(Self::COUNT));
        let day_in_cycle = day.rem_euclid(cycle);
        match day_in_cycle.checked_div(len).unwrap_or(0) {
            0 => Self::Autumn,
            1 => Self::Winter,
            2 => Self::Spring,
            _ => Self::Summer,
        }
    }

    /// Zero-based position in the cycle.
    pub const fn index(self) -> usize {
        match self {
            Self::Autumn => 0,
            Self::Winter => 1,
            Self::Spring => 2,
            Self::Summer => 3,
        }
    }
}
