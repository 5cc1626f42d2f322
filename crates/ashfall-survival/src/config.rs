//! Tunables for attribute decay, temperature, and sleep.
//!
//! These values live under the `survival` key of `ashfall-config.yaml`.
//! Every field has a default, so an empty section reproduces the stock
//! game balance.

use ashfall_types::Season;
use serde::Deserialize;

use crate::effects::{self, EffectTables};
use crate::error::SurvivalError;

/// Configuration for the decay engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SurvivalConfig {
    /// Starve delta applied on each hour, indexed by `hour mod 6`
    /// (default: `[-4, -3, -1, -2, -2, -4]`).
    #[serde(default = "default_change_by_time")]
    pub change_by_time: [f64; 6],

    /// `[base, day_modifier, night_modifier]` per season in cycle order
    /// (autumn, winter, spring, summer).
    #[serde(default = "default_season_temperature")]
    pub season_temperature: [[f64; 3]; 4],

    /// Temperature added by an active heat source (default: 13).
    #[serde(default = "default_heating_bonus")]
    pub heating_bonus: f64,

    /// Building id of the bed (default: 9).
    #[serde(default = "default_bed_building_id")]
    pub bed_building_id: u32,

    /// Building id of the fireplace (default: 5).
    #[serde(default = "default_fireplace_building_id")]
    pub fireplace_building_id: u32,

    /// Building id of the electric stove (default: 21).
    #[serde(default = "default_electric_stove_building_id")]
    pub electric_stove_building_id: u32,

    /// Lowest value temperature may be clamped to (default: -2).
    #[serde(default = "default_temperature_floor")]
    pub temperature_floor: f64,

    /// Sleep recovery tunables.
    #[serde(default)]
    pub sleep: SleepConfig,

    /// Range-keyed effect tables. Attributes missing here have no effects.
    #[serde(default = "effects::default_tables")]
    pub effects: EffectTables,
}

impl SurvivalConfig {
    /// `[base, day_modifier, night_modifier]` for a season.
    pub fn season_temperature(&self, season: Season) -> [f64; 3] {
        self.season_temperature
            .get(season.index())
            .copied()
            .unwrap_or_default()
    }

    /// Reject values that would make the simulation meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`SurvivalError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), SurvivalError> {
        let non_finite = self
            .change_by_time
            .iter()
            .chain(self.season_temperature.iter().flatten())
            .chain([&self.heating_bonus, &self.temperature_floor])
            .any(|value| !value.is_finite());
        if non_finite {
            return Err(SurvivalError::InvalidConfig {
                reason: "decay and temperature values must be finite".to_owned(),
            });
        }
        self.sleep.validate()
    }
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            change_by_time: default_change_by_time(),
            season_temperature: default_season_temperature(),
            heating_bonus: default_heating_bonus(),
            bed_building_id: default_bed_building_id(),
            fireplace_building_id: default_fireplace_building_id(),
            electric_stove_building_id: default_electric_stove_building_id(),
            temperature_floor: default_temperature_floor(),
            sleep: SleepConfig::default(),
            effects: effects::default_tables(),
        }
    }
}

/// Bed rate weights and per-hour recovery factors.
///
/// `bed_rate = level * level_weight + starve_ratio * starve_weight +
/// spirit_ratio * spirit_weight`, then recovery per hour is
/// `bed_rate * vigour_per_rate` and `bed_rate * hp_per_rate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SleepConfig {
    /// Weight of the bed level (default: 0.5).
    #[serde(default = "default_level_weight")]
    pub level_weight: f64,

    /// Weight of `starve / starve_max` (default: 0.2).
    #[serde(default = "default_starve_weight")]
    pub starve_weight: f64,

    /// Weight of `spirit / spirit_max` (default: 0.3).
    #[serde(default = "default_spirit_weight")]
    pub spirit_weight: f64,

    /// Vigour restored per hour per unit of bed rate (default: 12).
    #[serde(default = "default_vigour_per_rate")]
    pub vigour_per_rate: f64,

    /// Health restored per hour per unit of bed rate (default: 20).
    #[serde(default = "default_hp_per_rate")]
    pub hp_per_rate: f64,
}

impl SleepConfig {
    fn validate(&self) -> Result<(), SurvivalError> {
        let values = [
            self.level_weight,
            self.starve_weight,
            self.spirit_weight,
            self.vigour_per_rate,
            self.hp_per_rate,
        ];
        if values.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(SurvivalError::InvalidConfig {
                reason: "sleep weights and recovery factors must be non-negative".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            level_weight: default_level_weight(),
            starve_weight: default_starve_weight(),
            spirit_weight: default_spirit_weight(),
            vigour_per_rate: default_vigour_per_rate(),
            hp_per_rate: default_hp_per_rate(),
        }
    }
}

const fn default_change_by_time() -> [f64; 6] {
    [-4.0, -3.0, -1.0, -2.0, -2.0, -4.0]
}

const fn default_season_temperature() -> [[f64; 3]; 4] {
    [
        [15.0, 2.0, -2.0],
        [0.0, 2.0, -2.0],
        [10.0, 2.0, -2.0],
        [18.0, 5.0, 0.0],
    ]
}

const fn default_heating_bonus() -> f64 {
    13.0
}

const fn default_bed_building_id() -> u32 {
    9
}

const fn default_fireplace_building_id() -> u32 {
    5
}

const fn default_electric_stove_building_id() -> u32 {
    21
}

const fn default_temperature_floor() -> f64 {
    -2.0
}

const fn default_level_weight() -> f64 {
    0.5
}

const fn default_starve_weight() -> f64 {
    0.2
}

const fn default_spirit_weight() -> f64 {
    0.3
}

const fn default_vigour_per_rate() -> f64 {
    12.0
}

const fn default_hp_per_rate() -> f64 {
    20.0
}
