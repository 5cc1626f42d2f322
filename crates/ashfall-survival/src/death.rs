//! Death conditions.
//!
//! The player dies when health reaches 0 or the virus load reaches its
//! maximum. A health death is attributed to infection when the infection
//! tick that drained the last health point set the sticky flag.
//!
//! On death the clock is paused and the UI is told once per death. The engine does
//! not wait for the UI; what happens next is up to the host.

use ashfall_types::{Attribute, DeathReason};
use tracing::{debug, info};

use crate::engine::{DecayEngine, SurvivalClock};
use crate::ports::SurvivalHost;

/// Classify a player state. Pure; inspects values only.
pub fn evaluate_death(hp: f64, virus: f64, virus_max: f64, caused_by_infection: bool) -> Option<DeathReason> {
    if hp <= 0.0 {
        if caused_by_infection {
            return Some(DeathReason::Infection);
        }
        return Some(DeathReason::HpZero);
    }
    if virus >= virus_max {
        return Some(DeathReason::VirusOverload);
    }
    None
}

impl<H: SurvivalHost + 'static> DecayEngine<H> {
    /// Why the player is dead, or `None` while alive.
    pub fn death_reason(&self) -> Option<DeathReason> {
        evaluate_death(
            self.host.get(Attribute::Hp),
            self.host.get(Attribute::Virus),
            self.host.max(Attribute::Virus),
            self.death_caused_infection,
        )
    }

    /// Check for death and hand it off.
    ///
    /// A death is handed off once: the clock is paused and the UI is told.
    /// If the host resumes the clock while the player is still dead, the
    /// next check pauses it again. Once the player is alive the hand-off is
    /// re-armed, so a later death is reported as well.
    pub fn check_death_conditions(&mut self, clock: &mut SurvivalClock<H>) -> Option<DeathReason> {
        let Some(reason) = self.death_reason() else {
            if self.death_reported {
                debug!(time = clock.now(), "Player revived");
            }
            self.death_reported = false;
            self.death_caused_infection = false;
            return None;
        };
        if !self.death_reported || !clock.is_paused() {
            self.death_reported = true;
            clock.pause();
            self.host.show_death_overlay(reason);
            info!(%reason, time = clock.now(), day = clock.day_number(), "Player died");
        }
        Some(reason)
    }

    /// Whether the player's current attributes are lethal.
    pub fn is_dead(&self) -> bool {
        self.death_reason().is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ashfall_core::TimeConfig;

    use super::*;
    use crate::config::SurvivalConfig;
    use crate::memory::InMemoryHost;
    use crate::ports::AttributeRepository;

    #[test]
    fn alive_player_has_no_reason() {
        assert_eq!(evaluate_death(1.0, 0.0, 100.0, false), None);
        assert_eq!(evaluate_death(50.0, 99.0, 100.0, true), None);
    }

    #[test]
    fn zero_hp_reason_depends_on_flag() {
        assert_eq!(evaluate_death(0.0, 0.0, 100.0, false), Some(DeathReason::HpZero));
        assert_eq!(evaluate_death(0.0, 0.0, 100.0, true), Some(DeathReason::Infection));
    }

    #[test]
    fn hp_takes_precedence_over_virus() {
        assert_eq!(evaluate_death(0.0, 100.0, 100.0, false), Some(DeathReason::HpZero));
        assert_eq!(evaluate_death(10.0, 100.0, 100.0, false), Some(DeathReason::VirusOverload));
    }

    #[test]
    fn check_pauses_and_hands_off_once() {
        let host = InMemoryHost::new().with_value(Attribute::Virus, 100.0);
        let mut engine = DecayEngine::new(host, SurvivalConfig::default()).unwrap();
        let mut clock: SurvivalClock<InMemoryHost> = SurvivalClock::new(&TimeConfig::default()).unwrap();

        assert_eq!(engine.check_death_conditions(&mut clock), Some(DeathReason::VirusOverload));
        assert_eq!(engine.check_death_conditions(&mut clock), Some(DeathReason::VirusOverload));
        assert!(clock.is_paused());
        clock.resume();
        assert!(!clock.is_paused());
        assert_eq!(engine.host().death_overlays, vec![DeathReason::VirusOverload]);
        assert!(engine.is_dead());
    }

    #[test]
    fn check_on_living_player_is_noop() {
        let mut engine = DecayEngine::new(InMemoryHost::new(), SurvivalConfig::default()).unwrap();
        let mut clock: SurvivalClock<InMemoryHost> = SurvivalClock::new(&TimeConfig::default()).unwrap();
        assert_eq!(engine.check_death_conditions(&mut clock), None);
        assert!(!clock.is_paused());
        assert!(engine.host().death_overlays.is_empty());
        assert!(!engine.is_dead());
    }

    #[test]
    fn revived_player_can_die_again() {
        let host = InMemoryHost::new().with_value(Attribute::Hp, 0.0);
        let mut engine = DecayEngine::new(host, SurvivalConfig::default()).unwrap();
        let mut clock: SurvivalClock<InMemoryHost> = SurvivalClock::new(&TimeConfig::default()).unwrap();

        assert_eq!(engine.check_death_conditions(&mut clock), Some(DeathReason::HpZero));
        assert!(clock.is_paused());

        engine.host_mut().set(Attribute::Hp, 50.0);
        assert!(!engine.is_dead());
        clock.resume();
        assert_eq!(engine.check_death_conditions(&mut clock), None);

        engine.host_mut().set(Attribute::Hp, 0.0);
        assert!(engine.is_dead());
        assert_eq!(engine.check_death_conditions(&mut clock), Some(DeathReason::HpZero));
        assert!(clock.is_paused());
        assert_eq!(
            engine.host().death_overlays,
            vec![DeathReason::HpZero, DeathReason::HpZero]
        );
    }

    #[test]
    fn resuming_while_still_dead_pauses_again() {
        let host = InMemoryHost::new().with_value(Attribute::Hp, 0.0);
        let mut engine = DecayEngine::new(host, SurvivalConfig::default()).unwrap();
        let mut clock: SurvivalClock<InMemoryHost> = SurvivalClock::new(&TimeConfig::default()).unwrap();

        engine.check_death_conditions(&mut clock);
        clock.resume();
        assert_eq!(engine.check_death_conditions(&mut clock), Some(DeathReason::HpZero));
        assert!(clock.is_paused());
        assert_eq!(engine.host().death_overlays.len(), 2);
    }
}
