//! Sleep state machine.
//!
//! ```text
//! Awake --start_sleep--> Asleep --callback end--> (apply recovery) --> Awake
//!                          |
//!                          +--end_sleep (early)--> Awake, recovery forfeited
//! ```
//!
//! Recovery is computed when sleep starts and applied in one batch at
//! wake, capped at each attribute's maximum. Sleeping asks the clock to
//! fit the whole sleep into the work-time budget.

use ashfall_core::{Callback, CallbackId, boundary::HOUR};
use ashfall_types::{Attribute, SleepDuration, SleepState};
use tracing::{debug, info};

use crate::engine::{DecayEngine, SurvivalClock};
use crate::ports::SurvivalHost;

/// Sleep bookkeeping owned by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SleepTracker {
    state: SleepState,
    pending_vigour: f64,
    pending_hp: f64,
    callback: Option<CallbackId>,
}

impl SleepTracker {
    pub(crate) const fn is_sleeping(&self) -> bool {
        self.state.is_sleeping
    }
}

/// `value / max`, or 0 when `max` is not positive.
fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 { value / max } else { 0.0 }
}

impl<H: SurvivalHost + 'static> DecayEngine<H> {
    /// Sleep quality of the bed, or `None` if there is no usable bed.
    pub fn bed_rate(&self) -> Option<f64> {
        let bed = self.host.building(self.config.bed_building_id)?;
        if bed.level < 0 || !bed.active {
            return None;
        }
        let weights = &self.config.sleep;
        let starve = ratio(self.host.get(Attribute::Starve), self.host.max(Attribute::Starve));
        let spirit = ratio(self.host.get(Attribute::Spirit), self.host.max(Attribute::Spirit));
        Some(
            f64::from(bed.level) * weights.level_weight
                + starve * weights.starve_weight
                + spirit * weights.spirit_weight,
        )
    }

    /// Fall asleep for `duration`.
    ///
    /// Returns `false` without changing anything if there is no usable bed
    /// or the player is already asleep.
    pub fn start_sleep(&mut self, clock: &mut SurvivalClock<H>, duration: SleepDuration) -> bool {
        if self.sleep.is_sleeping() {
            debug!(%duration, "Already sleeping");
            return false;
        }
        let Some(rate) = self.bed_rate() else {
            debug!(%duration, "No usable bed");
            return false;
        };

        let vigour_per_hour = rate * self.config.sleep.vigour_per_rate;
        let hp_per_hour = rate * self.config.sleep.hp_per_rate;
        let sleep_seconds = match duration {
            SleepDuration::OneHour => HOUR,
            SleepDuration::FourHours => 4.0 * HOUR,
            SleepDuration::UntilMorning => clock.time_from_now_to_morning(),
        };
        let hours = sleep_seconds / HOUR;
        let now = clock.now();

        let callback = Callback::new(sleep_seconds)
            .on_end(|engine: &mut Self, clock: &mut SurvivalClock<H>| engine.wake(clock));
        let id = clock.add_timer_callback(callback, None, None);

        self.sleep = SleepTracker {
            state: SleepState {
                is_sleeping: true,
                start_time: now,
                end_time: now + sleep_seconds,
                vigour_recovery_per_hour: vigour_per_hour,
                hp_recovery_per_hour: hp_per_hour,
            },
            pending_vigour: (vigour_per_hour * hours).ceil(),
            pending_hp: (hp_per_hour * hours).ceil(),
            callback: Some(id),
        };

        let message = format!("You lie down and sleep for {hours:.1} hours.");
        self.host.add_log(&message);
        info!(
            %duration,
            bed_rate = rate,
            sleep_seconds,
            vigour = self.sleep.pending_vigour,
            hp = self.sleep.pending_hp,
            "Sleep started"
        );

        clock.accelerate_work_time(sleep_seconds);
        true
    }

    /// Wake up now.
    ///
    /// Does nothing when awake. Waking early forfeits the pending recovery;
    /// an acceleration window already running is left alone.
    pub fn end_sleep(&mut self, clock: &mut SurvivalClock<H>) {
        if !self.sleep.is_sleeping() {
            return;
        }
        if let Some(id) = self.sleep.callback {
            clock.remove_timer_callback(id);
        }
        self.sleep = SleepTracker::default();
        info!(time = clock.now(), "Sleep ended");
    }

    /// A copy of the public sleep state.
    pub const fn get_sleep_state(&self) -> SleepState {
        self.sleep.state
    }

    /// Fraction of the current sleep already elapsed, in `[0, 1]`.
    pub fn sleep_progress(&self, clock: &SurvivalClock<H>) -> Option<f64> {
        let state = self.sleep.state;
        if !state.is_sleeping {
            return None;
        }
        let total = state.end_time - state.start_time;
        if total <= 0.0 {
            return Some(1.0);
        }
        Some(((clock.now() - state.start_time) / total).clamp(0.0, 1.0))
    }

    /// End of the sleep callback: apply the batch recovery, then wake.
    fn wake(&mut self, clock: &mut SurvivalClock<H>) {
        let vigour = self.restore_capped(Attribute::Vigour, self.sleep.pending_vigour);
        let hp = self.restore_capped(Attribute::Hp, self.sleep.pending_hp);
        self.host
            .add_log(&format!("You wake up rested: +{vigour} vigour, +{hp} health."));
        info!(vigour, hp, "Sleep recovery applied");
        self.end_sleep(clock);
    }

    /// Raise an attribute by `amount` without exceeding its max. Returns the
    /// amount actually gained.
    fn restore_capped(&mut self, attribute: Attribute, amount: f64) -> f64 {
        let current = self.host.get(attribute);
        let max = self.host.max(attribute);
        let value = (current + amount).min(max).max(current);
        self.host.set(attribute, value);
        value - current
    }
}
