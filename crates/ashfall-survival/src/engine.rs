//! The decay engine and its clock wiring.
//!
//! [`DecayEngine`] owns the sleep state and the transient cure, bind, and
//! infection-death flags. It does not own the clock: operations that read
//! time, pause, or schedule take the clock as a parameter, and the engine
//! is itself the target the clock hands to every callback.
//!
//! The behavior is split across sibling modules: [`crate::decay`] holds the
//! attribute primitive and hourly decay, [`crate::temperature`] the heat
//! model, [`crate::death`] death detection, and [`crate::sleep`] the sleep
//! state machine.

use std::collections::BTreeMap;

use ashfall_core::{CallbackId, Clock};
use ashfall_types::Attribute;
use tracing::{debug, info};

use crate::config::SurvivalConfig;
use crate::effects::{self, CompiledTable};
use crate::error::SurvivalError;
use crate::ports::SurvivalHost;
use crate::sleep::SleepTracker;

/// The clock type that drives a decay engine.
pub type SurvivalClock<H> = Clock<DecayEngine<H>>;

/// Priority of the hourly decay callback.
pub const HOURLY_DECAY_PRIORITY: i32 = 0;

/// Priority of the minute death check. Lower than decay, so a death caused
/// by the hourly tick is caught in the same update.
pub const DEATH_CHECK_PRIORITY: i32 = -10;

/// Handles of the callbacks registered by [`DecayEngine::install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecayCallbacks {
    /// Hourly decay at the top of every hour.
    pub hourly: CallbackId,
    /// Death check at the top of every minute.
    pub death_check: CallbackId,
}

/// Attribute decay, death detection, and sleep over a host's player data.
#[derive(Debug)]
pub struct DecayEngine<H> {
    pub(crate) host: H,
    pub(crate) config: SurvivalConfig,
    pub(crate) tables: BTreeMap<Attribute, CompiledTable>,
    pub(crate) sleep: SleepTracker,
    pub(crate) in_cure: bool,
    pub(crate) in_bind: bool,
    pub(crate) death_caused_infection: bool,
    pub(crate) death_reported: bool,
    pub(crate) callbacks: Option<DecayCallbacks>,
}

impl<H: SurvivalHost + 'static> DecayEngine<H> {
    /// Build an engine, compiling every effect table.
    ///
    /// # Errors
    ///
    /// Returns [`SurvivalError::InvalidRange`] if a range string is
    /// malformed, or [`SurvivalError::InvalidConfig`] if a tunable is out
    /// of its domain.
    pub fn new(host: H, config: SurvivalConfig) -> Result<Self, SurvivalError> {
        config.validate()?;
        let tables = effects::compile_tables(&config.effects)?;
        debug!(tables = tables.len(), "Effect tables compiled");
        Ok(Self {
            host,
            config,
            tables,
            sleep: SleepTracker::default(),
            in_cure: false,
            in_bind: false,
            death_caused_infection: false,
            death_reported: false,
            callbacks: None,
        })
    }

    /// Register hourly decay and the minute death check on `clock`.
    ///
    /// Installing twice replaces the earlier registration.
    pub fn install(&mut self, clock: &mut SurvivalClock<H>) -> DecayCallbacks {
        self.uninstall(clock);
        let hourly = clock.add_timer_callback_hour_by_hour(
            |engine: &mut Self, clock: &mut SurvivalClock<H>| engine.process_hourly_decay(clock),
            Some(HOURLY_DECAY_PRIORITY),
        );
        let death_check = clock.add_timer_callback_minute_by_minute(
            |engine: &mut Self, clock: &mut SurvivalClock<H>| {
                engine.check_death_conditions(clock);
            },
            Some(DEATH_CHECK_PRIORITY),
        );
        let callbacks = DecayCallbacks { hourly, death_check };
        self.callbacks = Some(callbacks);
        info!("Survival callbacks installed");
        callbacks
    }

    /// Remove the callbacks registered by [`DecayEngine::install`].
    pub fn uninstall(&mut self, clock: &mut SurvivalClock<H>) {
        if let Some(callbacks) = self.callbacks.take() {
            clock.remove_timer_callback(callbacks.hourly);
            clock.remove_timer_callback(callbacks.death_check);
            debug!("Survival callbacks removed");
        }
    }

    /// The handles of the installed callbacks, if any.
    pub const fn callbacks(&self) -> Option<DecayCallbacks> {
        self.callbacks
    }

    /// Mark the player as under medicine: infection stops raising infect
    /// and lowering spirit.
    pub const fn set_is_in_cure(&mut self, in_cure: bool) {
        self.in_cure = in_cure;
    }

    /// Mark wounds as bound: injury stops raising infect and lowering
    /// spirit.
    pub const fn set_is_in_bind(&mut self, in_bind: bool) {
        self.in_bind = in_bind;
    }

    /// Whether the cure flag is set.
    pub const fn is_in_cure(&self) -> bool {
        self.in_cure
    }

    /// Whether the bind flag is set.
    pub const fn is_in_bind(&self) -> bool {
        self.in_bind
    }

    /// The host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably. Attribute edits made here bypass clamping.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The active configuration.
    pub const fn config(&self) -> &SurvivalConfig {
        &self.config
    }

    /// Consume the engine and return its host.
    pub fn into_host(self) -> H {
        self.host
    }
}
