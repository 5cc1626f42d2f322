//! Body temperature model.
//!
//! Each hour the player's temperature moves to the target in one step. The
//! target depends on the current season, stage, heating, and weather. The
//! temperature range effect is applied after the step.

use ashfall_types::{Attribute, Season, Stage};
use tracing::trace;

use crate::engine::DecayEngine;
use crate::ports::SurvivalHost;

impl<H: SurvivalHost + 'static> DecayEngine<H> {
    /// Warmth from working heat sources.
    ///
    /// An electric stove gives the full bonus and a fireplace on top of it
    /// adds half again. A fireplace alone gives the full bonus.
    pub fn heating_bonus(&self) -> f64 {
        let working = |id: u32| {
            self.host
                .building(id)
                .is_some_and(|building| building.active && building.level >= 0)
        };
        let bonus = self.config.heating_bonus;
        match (
            working(self.config.electric_stove_building_id),
            working(self.config.fireplace_building_id),
        ) {
            (true, true) => bonus + bonus / 2.0,
            (true, false) | (false, true) => bonus,
            (false, false) => 0.0,
        }
    }

    /// The temperature the player converges to this hour.
    pub fn target_temperature(&self, stage: Stage, season: Season) -> f64 {
        let [base, day_modifier, night_modifier] = self.config.season_temperature(season);
        let modifier = match stage {
            Stage::Day => day_modifier,
            Stage::Night => night_modifier,
        };
        let weather = self.host.weather().temperature.unwrap_or(0.0);
        base + modifier + self.heating_bonus() + weather
    }

    /// Move temperature to the target, then apply its range effect.
    pub fn update_temperature(&mut self, stage: Stage, season: Season) {
        let target = self.target_temperature(stage, season);
        let current = self.host.get(Attribute::Temperature);
        self.change_attribute(Attribute::Temperature, target - current);
        trace!(%stage, ?season, target, current, "Temperature updated");
        self.apply_range_effect(Attribute::Temperature);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ashfall_types::WeatherEffect;

    use super::*;
    use crate::config::SurvivalConfig;
    use crate::memory::InMemoryHost;
    use crate::ports::AttributeRepository;

    fn engine(host: InMemoryHost) -> DecayEngine<InMemoryHost> {
        DecayEngine::new(host, SurvivalConfig::default()).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn season_and_stage_select_base() {
        let engine = engine(InMemoryHost::new());
        assert!(approx(engine.target_temperature(Stage::Day, Season::Autumn), 17.0));
        assert!(approx(engine.target_temperature(Stage::Night, Season::Winter), -2.0));
        assert!(approx(engine.target_temperature(Stage::Day, Season::Summer), 23.0));
        assert!(approx(engine.target_temperature(Stage::Night, Season::Summer), 18.0));
    }

    #[test]
    fn heating_combinations() {
        let none = engine(InMemoryHost::new());
        assert!(approx(none.heating_bonus(), 0.0));

        let fire = engine(InMemoryHost::new().with_building(5, 0, true));
        assert!(approx(fire.heating_bonus(), 13.0));

        let stove = engine(InMemoryHost::new().with_building(21, 1, true));
        assert!(approx(stove.heating_bonus(), 13.0));

        let both = engine(
            InMemoryHost::new()
                .with_building(21, 1, true)
                .with_building(5, 0, true),
        );
        assert!(approx(both.heating_bonus(), 19.5));

        let cold = engine(InMemoryHost::new().with_building(5, 0, false));
        assert!(approx(cold.heating_bonus(), 0.0));
    }

    #[test]
    fn converges_in_one_step() {
        let weather = WeatherEffect {
            temperature: Some(-4.0),
            ..WeatherEffect::default()
        };
        let host = InMemoryHost::new()
            .with_value(Attribute::Temperature, 60.0)
            .with_building(5, 0, true)
            .with_weather(weather);
        let mut engine = engine(host);
        engine.update_temperature(Stage::Night, Season::Spring);
        // 10 - 2 + 13 - 4
        assert!(approx(engine.host().get(Attribute::Temperature), 17.0));
        // Again: already at target, stays put.
        engine.update_temperature(Stage::Night, Season::Spring);
        assert!(approx(engine.host().get(Attribute::Temperature), 17.0));
    }

    #[test]
    fn cold_band_adds_infect() {
        let mut engine = engine(InMemoryHost::new());
        engine.update_temperature(Stage::Night, Season::Winter);
        assert!(approx(engine.host().get(Attribute::Temperature), -2.0));
        assert!(approx(engine.host().get(Attribute::Infect), 1.0));
    }

    #[test]
    fn target_below_floor_clamps() {
        let weather = WeatherEffect {
            temperature: Some(-30.0),
            ..WeatherEffect::default()
        };
        let mut engine = engine(InMemoryHost::new().with_weather(weather));
        engine.update_temperature(Stage::Night, Season::Winter);
        assert!(approx(engine.host().get(Attribute::Temperature), -2.0));
    }
}
