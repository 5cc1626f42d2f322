//! Collaborator traits consumed by the decay engine.
//!
//! The engine never owns player data, buildings, weather, or UI. It reads
//! and writes them through these narrow ports, which the host implements.
//! [`InMemoryHost`] is a plain-field implementation for headless runs and
//! tests.
//!
//! [`InMemoryHost`]: crate::memory::InMemoryHost

use ashfall_types::{Attribute, BuildingState, DeathReason, WeatherEffect};

/// Player attribute storage.
pub trait AttributeRepository {
    /// Current value of an attribute.
    fn get(&self, attribute: Attribute) -> f64;

    /// Upper bound of an attribute.
    fn max(&self, attribute: Attribute) -> f64;

    /// Overwrite an attribute. The engine clamps before calling.
    fn set(&mut self, attribute: Attribute, value: f64);
}

/// Read access to the player's buildings.
pub trait BuildingRepository {
    /// The building with this id, or `None` if it does not exist.
    fn building(&self, id: u32) -> Option<BuildingState>;
}

/// Read access to the current weather.
pub trait WeatherRepository {
    /// Deltas contributed by the current weather.
    fn weather(&self) -> WeatherEffect;
}

/// The UI collaborator that presents the end of the game.
pub trait UiHandoff {
    /// Show the death overlay. Fire-and-forget: the engine does not wait.
    fn show_death_overlay(&mut self, reason: DeathReason);
}

/// The in-game message log shown to the player.
pub trait LogSink {
    /// Append a player-facing message.
    fn add_log(&mut self, message: &str);
}

/// Everything the decay engine needs from its host.
pub trait SurvivalHost: AttributeRepository + BuildingRepository + WeatherRepository + UiHandoff + LogSink {}

impl<T> SurvivalHost for T where T: AttributeRepository + BuildingRepository + WeatherRepository + UiHandoff + LogSink {}
