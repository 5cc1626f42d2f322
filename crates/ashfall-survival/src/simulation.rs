//! A clock and decay engine wired together.
//!
//! The engine is the clock's callback target, so the two are kept side by
//! side and every operation that needs both borrows them as disjoint
//! fields. Hosts drive the whole simulation with [`Simulation::update`].

use ashfall_core::{ClockError, TimeConfig};
use ashfall_types::{ClockSave, ClockSnapshot, DeathReason, SleepDuration, SleepState};
use tracing::info;

use crate::config::SurvivalConfig;
use crate::engine::{DecayEngine, SurvivalClock};
use crate::error::SurvivalError;
use crate::ports::SurvivalHost;

/// Errors that can occur when assembling a [`Simulation`].
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The clock configuration was rejected.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The survival configuration was rejected.
    #[error("survival error: {source}")]
    Survival {
        /// The underlying survival error.
        #[from]
        source: SurvivalError,
    },
}

/// The game clock plus the decay engine it drives.
#[derive(Debug)]
pub struct Simulation<H> {
    clock: SurvivalClock<H>,
    engine: DecayEngine<H>,
}

impl<H: SurvivalHost + 'static> Simulation<H> {
    /// Build the clock and engine and install the survival callbacks.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if either configuration is invalid.
    pub fn new(host: H, time: &TimeConfig, survival: SurvivalConfig) -> Result<Self, SimulationError> {
        let mut clock = SurvivalClock::new(time)?;
        let mut engine = DecayEngine::new(host, survival)?;
        engine.install(&mut clock);
        info!(time = clock.now(), stage = %clock.stage(), "Simulation ready");
        Ok(Self { clock, engine })
    }

    /// Advance by a real-time frame delta.
    pub fn update(&mut self, dt: f64) {
        self.clock.update(dt, &mut self.engine);
    }

    /// Jump to the next stage boundary.
    pub fn skip_stage(&mut self) {
        self.clock.skip_stage(&mut self.engine);
    }

    /// See [`DecayEngine::start_sleep`].
    pub fn start_sleep(&mut self, duration: SleepDuration) -> bool {
        self.engine.start_sleep(&mut self.clock, duration)
    }

    /// See [`DecayEngine::end_sleep`].
    pub fn end_sleep(&mut self) {
        self.engine.end_sleep(&mut self.clock);
    }

    /// See [`DecayEngine::check_death_conditions`].
    pub fn check_death_conditions(&mut self) -> Option<DeathReason> {
        self.engine.check_death_conditions(&mut self.clock)
    }

    /// Current sleep state.
    pub const fn sleep_state(&self) -> SleepState {
        self.engine.get_sleep_state()
    }

    /// Add one pause.
    pub const fn pause(&mut self) {
        self.clock.pause();
    }

    /// Release one pause.
    pub const fn resume(&mut self) {
        self.clock.resume();
    }

    /// Persist the clock.
    pub fn save(&self) -> ClockSave {
        self.clock.save()
    }

    /// Restore the clock from a save payload.
    ///
    /// Sleep is not persisted, so any sleep in progress ends without
    /// recovery. The survival callbacks are then re-anchored to the
    /// restored time: the next decay fires at the next hour boundary and
    /// the next death check at the next minute.
    pub fn restore(&mut self, save: Option<&ClockSave>) {
        self.engine.end_sleep(&mut self.clock);
        self.clock.restore(save);
        self.engine.install(&mut self.clock);
    }

    /// Clock state for the UI.
    pub fn snapshot(&self) -> ClockSnapshot {
        self.clock.snapshot()
    }

    /// The clock.
    pub const fn clock(&self) -> &SurvivalClock<H> {
        &self.clock
    }

    /// The clock, mutably, for pausing and accelerating.
    pub const fn clock_mut(&mut self) -> &mut SurvivalClock<H> {
        &mut self.clock
    }

    /// The engine.
    pub const fn engine(&self) -> &DecayEngine<H> {
        &self.engine
    }

    /// The engine, mutably, for cure/bind flags and attribute edits.
    pub const fn engine_mut(&mut self) -> &mut DecayEngine<H> {
        &mut self.engine
    }

    /// The host.
    pub const fn host(&self) -> &H {
        self.engine.host()
    }
}
