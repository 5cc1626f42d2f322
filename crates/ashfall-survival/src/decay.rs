//! Hourly attribute decay and the attribute-change primitive.
//!
//! Every change the engine makes to a player attribute goes through
//! [`DecayEngine::change_attribute`], which rounds and clamps.
//!
//! # Hourly order
//!
//! 1. Starve delta from the `change_by_time` cycle (`hour mod 6`)
//! 2. Range effects of starve, infect, vigour, injury
//! 3. Temperature convergence, then the temperature range effect
//! 4. Weather deltas for vigour and spirit

use ashfall_types::Attribute;
use tracing::{debug, trace};

use crate::effects::{AttributeRangeInfo, Effect};
use crate::engine::{DecayEngine, SurvivalClock};
use crate::ports::SurvivalHost;

/// Round half up, so `2.5 -> 3` and `-2.5 -> -2`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Attributes whose range effects [`DecayEngine::apply_attribute_range_effects`]
/// evaluates, in order.
const RANGE_EFFECT_ORDER: [Attribute; 8] = [
    Attribute::Starve,
    Attribute::Infect,
    Attribute::Vigour,
    Attribute::Injury,
    Attribute::Water,
    Attribute::Spirit,
    Attribute::Virus,
    Attribute::Temperature,
];

impl<H: SurvivalHost + 'static> DecayEngine<H> {
    /// Apply one hour of decay.
    pub fn process_hourly_decay(&mut self, clock: &SurvivalClock<H>) {
        let hour = clock.format_time(None).h;
        let cycle = self.config.change_by_time;
        let index = usize::try_from(hour.rem_euclid(6)).unwrap_or(0);
        let starve_delta = cycle.get(index).copied().unwrap_or(0.0);
        if starve_delta != 0.0 {
            self.change_attribute(Attribute::Starve, starve_delta);
        }

        self.apply_range_effect(Attribute::Starve);
        self.apply_range_effect(Attribute::Infect);
        self.apply_range_effect(Attribute::Vigour);
        self.apply_range_effect(Attribute::Injury);

        self.update_temperature(clock.stage(), clock.season());

        let weather = self.host.weather();
        if let Some(delta) = weather.vigour {
            self.change_attribute(Attribute::Vigour, delta);
        }
        if let Some(delta) = weather.spirit {
            self.change_attribute(Attribute::Spirit, delta);
        }

        debug!(
            hour,
            starve_delta,
            hp = self.host.get(Attribute::Hp),
            starve = self.host.get(Attribute::Starve),
            temperature = self.host.get(Attribute::Temperature),
            "Hourly decay applied"
        );
    }

    /// Evaluate the range effect of every attribute once.
    ///
    /// Temperature contributes only its range effect here; convergence
    /// toward the target temperature happens in the hourly tick.
    pub fn apply_attribute_range_effects(&mut self) {
        for attribute in RANGE_EFFECT_ORDER {
            self.apply_range_effect(attribute);
        }
    }

    /// Change an attribute by `delta`, rounding and clamping the result.
    ///
    /// While asleep, a vigour change on full vigour is dropped; if health is
    /// also full, one spirit is lost instead.
    pub fn change_attribute(&mut self, attribute: Attribute, delta: f64) {
        if attribute == Attribute::Vigour
            && self.sleep.is_sleeping()
            && self.host.get(Attribute::Vigour) >= self.host.max(Attribute::Vigour)
        {
            if self.host.get(Attribute::Hp) >= self.host.max(Attribute::Hp) {
                self.change_attribute(Attribute::Spirit, -1.0);
            }
            return;
        }

        let floor = if attribute == Attribute::Temperature {
            self.config.temperature_floor
        } else {
            0.0
        };
        let max = self.host.max(attribute);
        let before = self.host.get(attribute);
        let value = round_half_up(before + delta).min(max).max(floor);
        self.host.set(attribute, value);
        trace!(%attribute, before, delta, after = value, "Attribute changed");
    }

    /// The effect-table row whose range contains `value`.
    pub fn get_attr_range_info(&self, attribute: Attribute, value: f64) -> Option<AttributeRangeInfo> {
        self.tables.get(&attribute)?.lookup(value).cloned()
    }

    pub(crate) fn apply_range_effect(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Infect => self.apply_infect_effect(),
            Attribute::Injury => {
                let value = self.host.get(Attribute::Injury);
                if let Some(info) = self.get_attr_range_info(attribute, value) {
                    let in_bind = self.in_bind;
                    self.apply_effect(&info.effect, |attr| {
                        !(in_bind && matches!(attr, Attribute::Infect | Attribute::Spirit))
                    });
                }
            }
            _ => {
                let value = self.host.get(attribute);
                if let Some(info) = self.get_attr_range_info(attribute, value) {
                    self.apply_effect(&info.effect, |_| true);
                }
            }
        }
    }

    /// Infection damages health in proportion to the infect level and
    /// marks the damage as a possible cause of death.
    fn apply_infect_effect(&mut self) {
        let infect = self.host.get(Attribute::Infect);
        if let Some(info) = self.get_attr_range_info(Attribute::Infect, infect) {
            for (&attribute, &delta) in &info.effect {
                match attribute {
                    Attribute::Hp => {
                        let damage = (delta * infect / 100.0).ceil();
                        self.change_attribute(Attribute::Hp, damage);
                        self.death_caused_infection = true;
                    }
                    Attribute::Infect | Attribute::Spirit if self.in_cure => {}
                    _ => self.change_attribute(attribute, delta),
                }
            }
        }
        // The flag only survives a tick that left the player dead.
        if self.host.get(Attribute::Hp) > 0.0 {
            self.death_caused_infection = false;
        }
    }

    fn apply_effect(&mut self, effect: &Effect, mut allow: impl FnMut(Attribute) -> bool) {
        for (&attribute, &delta) in effect {
            if allow(attribute) {
                self.change_attribute(attribute, delta);
            }
        }
    }
}
