//! In-memory host implementing every survival port with plain fields.

use std::collections::BTreeMap;

use ashfall_types::{Attribute, BuildingState, DeathReason, WeatherEffect};
use serde::Serialize;

use crate::ports::{AttributeRepository, BuildingRepository, LogSink, UiHandoff, WeatherRepository};

/// A self-contained player, base, and UI for headless runs and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InMemoryHost {
    /// Current attribute values.
    pub values: BTreeMap<Attribute, f64>,
    /// Attribute upper bounds.
    pub maxes: BTreeMap<Attribute, f64>,
    /// Buildings by id.
    pub buildings: BTreeMap<u32, BuildingState>,
    /// The current weather.
    pub weather: WeatherEffect,
    /// Every death overlay requested, in order.
    pub death_overlays: Vec<DeathReason>,
    /// Every player-facing log line, in order.
    pub logs: Vec<String>,
}

impl InMemoryHost {
    /// A fresh player with no buildings and calm weather.
    pub fn new() -> Self {
        let start = [
            (Attribute::Hp, 100.0, 100.0),
            (Attribute::Spirit, 50.0, 100.0),
            (Attribute::Starve, 50.0, 100.0),
            (Attribute::Vigour, 50.0, 100.0),
            (Attribute::Injury, 0.0, 100.0),
            (Attribute::Infect, 0.0, 100.0),
            (Attribute::Water, 50.0, 100.0),
            (Attribute::Virus, 0.0, 100.0),
            (Attribute::Temperature, 20.0, 100.0),
        ];
        Self {
            values: start.iter().map(|(attr, value, _)| (*attr, *value)).collect(),
            maxes: start.iter().map(|(attr, _, max)| (*attr, *max)).collect(),
            buildings: BTreeMap::new(),
            weather: WeatherEffect::default(),
            death_overlays: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Set an attribute value, builder style.
    #[must_use]
    pub fn with_value(mut self, attribute: Attribute, value: f64) -> Self {
        self.values.insert(attribute, value);
        self
    }

    /// Add or replace a building, builder style.
    #[must_use]
    pub fn with_building(mut self, id: u32, level: i32, active: bool) -> Self {
        self.buildings.insert(id, BuildingState { level, active });
        self
    }

    /// Replace the weather, builder style.
    #[must_use]
    pub const fn with_weather(mut self, weather: WeatherEffect) -> Self {
        self.weather = weather;
        self
    }
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeRepository for InMemoryHost {
    fn get(&self, attribute: Attribute) -> f64 {
        self.values.get(&attribute).copied().unwrap_or(0.0)
    }

    fn max(&self, attribute: Attribute) -> f64 {
        self.maxes.get(&attribute).copied().unwrap_or(0.0)
    }

    fn set(&mut self, attribute: Attribute, value: f64) {
        self.values.insert(attribute, value);
    }
}

impl BuildingRepository for InMemoryHost {
    fn building(&self, id: u32) -> Option<BuildingState> {
        self.buildings.get(&id).copied()
    }
}

impl WeatherRepository for InMemoryHost {
    fn weather(&self) -> WeatherEffect {
        self.weather
    }
}

impl UiHandoff for InMemoryHost {
    fn show_death_overlay(&mut self, reason: DeathReason) {
        self.death_overlays.push(reason);
    }
}

impl LogSink for InMemoryHost {
    fn add_log(&mut self, message: &str) {
        self.logs.push(message.to_owned());
    }
}
