//! Game clock: time, scale, pausing, acceleration, and callback dispatch.
//!
//! The clock is the single source of truth for game time. A host render
//! loop calls [`Clock::update`] once per frame with the real-time delta;
//! the clock scales it into game seconds, advances time, and drives every
//! registered callback.
//!
//! # Tick order
//!
//! 1. Advance the real-time anchor and game time.
//! 2. Process callbacks in priority order: `process(dt)`, then `end()` for
//!    every callback whose end time has been reached.
//! 3. Close the acceleration window if its end time has been reached.
//! 4. Re-arm ended callbacks at the current time, or remove them when
//!    their repeats are used up.
//! 5. Refresh the cached stage and season.
//!
//! A callback whose end time is passed fires `end()` at most once per
//! update, however many intervals the delta spans. Re-arming starts the
//! next interval at the current time, not at the missed boundary.

use ashfall_types::{ClockSave, ClockSnapshot, Season, Stage, TimeParts};
use tracing::{debug, info, warn};

use crate::boundary::{self, DAY, HOUR, MINUTE};
use crate::config::TimeConfig;
use crate::scheduler::{Callback, CallbackArena, CallbackId, CallbackInfo, Repeat};

/// Default priority of convenience registrations.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Errors that can occur when constructing a clock.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Invalid time configuration (e.g. an empty day window).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// An active acceleration window.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Acceleration {
    /// Game time at which the scale reverts to base.
    end_time: f64,
}

/// The pair of handles returned by [`Clock::add_timer_callback_day_and_night`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayNightCallbacks {
    /// Fires at the start of the day stage.
    pub day: CallbackId,
    /// Fires at the start of the night stage.
    pub night: CallbackId,
}

/// Game clock driving a set of callbacks over a target of type `T`.
///
/// `T` is whatever the callbacks need mutable access to; it is passed into
/// [`Clock::update`] by the host and handed to every handler.
pub struct Clock<T> {
    /// Game time in seconds.
    time: f64,

    /// Real seconds accumulated by `update`, anchored to game time on restore.
    real_time: f64,

    /// Scale at normal speed.
    base_time_scale: f64,

    /// Current game seconds per real second.
    time_scale: f64,

    /// Outstanding `pause` calls.
    pause_count: u32,

    acceleration: Option<Acceleration>,

    day_start_hour: u32,
    day_end_hour: u32,
    days_per_season: u32,
    work_time_real_seconds: f64,

    /// Cached stage, refreshed after every time change.
    stage: Stage,

    /// Cached season, refreshed after every time change.
    season: Season,

    callbacks: CallbackArena<T>,
}

impl<T> core::fmt::Debug for Clock<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Clock")
            .field("time", &self.time)
            .field("time_scale", &self.time_scale)
            .field("pause_count", &self.pause_count)
            .field("acceleration", &self.acceleration)
            .field("stage", &self.stage)
            .field("season", &self.season)
            .field("callbacks", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}

impl<T> Clock<T> {
    /// Create a clock at the configured start time with no callbacks.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the base scale or work-time
    /// budget is not positive, the day window is empty or extends past
    /// 24:00, or the season length is zero.
    pub fn new(config: &TimeConfig) -> Result<Self, ClockError> {
        if !config.base_time_scale.is_finite() || config.base_time_scale <= 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: "base_time_scale must be a positive number".to_owned(),
            });
        }
        if config.day_start_hour >= config.day_end_hour || config.day_end_hour > 24 {
            return Err(ClockError::InvalidConfig {
                reason: format!(
                    "day window [{}, {}) must be non-empty and within 0..=24",
                    config.day_start_hour, config.day_end_hour
                ),
            });
        }
        if !config.work_time_real_seconds.is_finite() || config.work_time_real_seconds <= 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: "work_time_real_seconds must be a positive number".to_owned(),
            });
        }
        if config.days_per_season == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "days_per_season must be at least 1".to_owned(),
            });
        }
        if !config.start_time.is_finite() || config.start_time < 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: "start_time must be a non-negative number".to_owned(),
            });
        }

        let mut clock = Self {
            time: config.start_time,
            real_time: config.start_time / config.base_time_scale,
            base_time_scale: config.base_time_scale,
            time_scale: config.base_time_scale,
            pause_count: 0,
            acceleration: None,
            day_start_hour: config.day_start_hour,
            day_end_hour: config.day_end_hour,
            days_per_season: config.days_per_season,
            work_time_real_seconds: config.work_time_real_seconds,
            stage: Stage::Day,
            season: Season::Autumn,
            callbacks: CallbackArena::default(),
        };
        clock.refresh_calendar();
        Ok(clock)
    }

    // ---------------------------------------------------------------------
    // Ticking
    // ---------------------------------------------------------------------

    /// Advance the clock by a real-time delta and drive due callbacks.
    ///
    /// Does nothing while paused. Negative or non-finite deltas are ignored.
    pub fn update(&mut self, dt: f64, target: &mut T) {
        if self.is_paused() {
            return;
        }
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "Ignoring invalid frame delta");
            return;
        }
        self.real_time += dt;
        let dt_game = dt * self.time_scale;
        self.update_time(dt_game, target);
    }

    /// Advance game time directly by `dt_game` seconds and drive callbacks.
    ///
    /// This bypasses the pause check and the time scale; [`Clock::update`]
    /// and [`Clock::skip_stage`] are built on it.
    pub fn update_time(&mut self, dt_game: f64, target: &mut T) {
        self.time += dt_game;

        let mut ended = Vec::new();
        for id in self.callbacks.ordered_ids() {
            // Already removed by an earlier handler this tick.
            let Some(mut handlers) = self.callbacks.take_handlers(id) else {
                continue;
            };

            if let Some(process) = handlers.on_process.as_mut() {
                process(target, self, dt_game);
            }

            let reached = self
                .callbacks
                .get(id)
                .is_some_and(|info| self.time >= info.end_time);
            if reached {
                if let Some(end) = handlers.on_end.as_mut() {
                    end(target, self);
                }
                self.callbacks.record_end(id);
                ended.push(id);
            }

            self.callbacks.restore_handlers(id, handlers);
        }

        if let Some(acceleration) = self.acceleration
            && self.time >= acceleration.end_time
        {
            info!(
                time = self.time,
                accelerate_end_time = acceleration.end_time,
                time_scale_before = self.time_scale,
                time_scale_after = self.base_time_scale,
                "Acceleration ended"
            );
            self.acceleration = None;
            self.time_scale = self.base_time_scale;
        }

        for id in ended {
            self.callbacks.rearm_or_remove(id, self.time);
        }
        self.callbacks.compact();

        self.refresh_calendar();
    }

    /// Jump straight to the next stage boundary.
    ///
    /// Before the day starts this is today's day start, during the day it
    /// is today's day end, and after dark it is tomorrow's day start. The
    /// jump is a single time step, so callbacks behave as after one very
    /// long frame.
    pub fn skip_stage(&mut self, target: &mut T) {
        let now = self.format_time(None);
        let (day, hour) = if now.h < i64::from(self.day_start_hour) {
            (now.d, self.day_start_hour)
        } else if now.h < i64::from(self.day_end_hour) {
            (now.d, self.day_end_hour)
        } else {
            (now.d.saturating_add(1), self.day_start_hour)
        };
        let end_time = TimeParts {
            d: day,
            h: i64::from(hour),
            m: 0,
            s: 0,
        }
        .to_seconds();
        let dt_game = end_time - self.time;
        debug!(from = self.time, to = end_time, "Skipping to next stage");
        self.update_time(dt_game, target);
    }

    // ---------------------------------------------------------------------
    // Pausing
    // ---------------------------------------------------------------------

    /// Add one pause. Every call must be matched by [`Clock::resume`].
    pub const fn pause(&mut self) {
        self.pause_count = self.pause_count.saturating_add(1);
    }

    /// Release one pause. Extra calls are ignored.
    pub const fn resume(&mut self) {
        self.pause_count = self.pause_count.saturating_sub(1);
    }

    /// Whether any pause is outstanding.
    pub const fn is_paused(&self) -> bool {
        self.pause_count > 0
    }

    // ---------------------------------------------------------------------
    // Reading time
    // ---------------------------------------------------------------------

    /// Current game time in seconds.
    pub const fn now(&self) -> f64 {
        self.time
    }

    /// Decompose `time`, or the current time when `None`.
    pub fn format_time(&self, time: Option<f64>) -> TimeParts {
        TimeParts::from_seconds(time.unwrap_or(self.time))
    }

    /// Current day/night stage.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Current season.
    pub const fn season(&self) -> Season {
        self.season
    }

    /// One-based day counter for display.
    pub fn day_number(&self) -> i64 {
        self.format_time(None).d.saturating_add(1)
    }

    /// Current time of day as `HH:MM`.
    pub fn hour_string(&self) -> String {
        let parts = self.format_time(None);
        format!("{:02}:{:02}", parts.h, parts.m)
    }

    /// Game seconds until the next day-start hour.
    ///
    /// Before the day starts that is today's day start, otherwise
    /// tomorrow's.
    pub fn time_from_now_to_morning(&self) -> f64 {
        let now = self.format_time(None);
        let day = if now.h < i64::from(self.day_start_hour) {
            now.d
        } else {
            now.d.saturating_add(1)
        };
        let morning = TimeParts {
            d: day,
            h: i64::from(self.day_start_hour),
            m: 0,
            s: 0,
        }
        .to_seconds();
        morning - self.time
    }

    /// First hour of the day stage.
    pub const fn day_start_hour(&self) -> u32 {
        self.day_start_hour
    }

    /// First hour of the night stage.
    pub const fn day_end_hour(&self) -> u32 {
        self.day_end_hour
    }

    /// Current game seconds per real second.
    pub const fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Game seconds per real second at normal speed.
    pub const fn base_time_scale(&self) -> f64 {
        self.base_time_scale
    }

    /// Whether an acceleration window is active.
    pub const fn is_accelerated(&self) -> bool {
        self.acceleration.is_some()
    }

    /// Game time at which the active acceleration window closes.
    pub fn accelerate_end_time(&self) -> Option<f64> {
        self.acceleration.map(|acceleration| acceleration.end_time)
    }

    /// Real seconds accumulated by [`Clock::update`].
    pub const fn real_time(&self) -> f64 {
        self.real_time
    }

    /// Everything a UI host needs to draw the clock.
    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            time: self.time,
            parts: self.format_time(None),
            stage: self.stage,
            season: self.season,
            paused: self.is_paused(),
            time_scale: self.time_scale,
            accelerated: self.is_accelerated(),
        }
    }

    // ---------------------------------------------------------------------
    // Acceleration
    // ---------------------------------------------------------------------

    /// Make `duration` game seconds pass in `real_seconds` real seconds.
    ///
    /// Negative durations are refused. A second window is refused while one
    /// is active unless `force` is set.
    pub fn accelerate(&mut self, duration: f64, real_seconds: f64, force: bool) {
        if self.is_accelerated() && !force {
            debug!("Already accelerated, skipping");
            return;
        }
        if !real_seconds.is_finite() || real_seconds <= 0.0 || !duration.is_finite() || duration < 0.0 {
            warn!(duration, real_seconds, "Refusing acceleration with invalid parameters");
            return;
        }
        self.time_scale = duration / real_seconds;
        self.open_window(duration);
        info!(
            duration,
            real_seconds,
            time_scale = self.time_scale,
            accelerate_end_time = self.time + duration,
            "Time accelerated"
        );
    }

    /// Run `factor` times faster than normal for `duration` game seconds.
    ///
    /// Refused while another window is active unless `force` is set.
    pub fn accelerate_by_factor(&mut self, duration: f64, factor: f64, force: bool) {
        if self.is_accelerated() && !force {
            debug!("Already accelerated, skipping");
            return;
        }
        if !factor.is_finite() || factor <= 0.0 || !duration.is_finite() || duration < 0.0 {
            warn!(duration, factor, "Refusing acceleration with invalid parameters");
            return;
        }
        self.open_window(duration);
        self.time_scale = self.base_time_scale * factor;
        info!(
            duration,
            factor,
            time_scale = self.time_scale,
            accelerate_end_time = self.time + duration,
            "Time accelerated by factor"
        );
    }

    /// Fit `duration` game seconds into the work-time budget when it would
    /// otherwise take longer than the budget at the current scale.
    pub fn accelerate_work_time(&mut self, duration: f64) {
        if duration / self.time_scale > self.work_time_real_seconds {
            self.accelerate(duration, self.work_time_real_seconds, false);
        }
    }

    const fn open_window(&mut self, duration: f64) {
        self.acceleration = Some(Acceleration {
            end_time: self.time + duration,
        });
    }

    // ---------------------------------------------------------------------
    // Callback registration
    // ---------------------------------------------------------------------

    /// Register a callback starting at `start_time` (default: now).
    ///
    /// Callbacks are processed by descending priority, then by insertion
    /// order.
    pub fn add_timer_callback(
        &mut self,
        callback: Callback<T>,
        start_time: Option<f64>,
        priority: Option<i32>,
    ) -> CallbackId {
        let start = start_time.unwrap_or(self.time);
        self.callbacks
            .insert(callback, start, priority.unwrap_or(DEFAULT_PRIORITY))
    }

    /// Fire `f` every hour at `minute:second` past the hour.
    pub fn add_timer_callback_by_hour<F>(
        &mut self,
        minute: u32,
        second: u32,
        f: F,
        priority: Option<i32>,
    ) -> CallbackId
    where
        F: FnMut(&mut T, &mut Self) + 'static,
    {
        let offset = f64::from(minute).mul_add(MINUTE, f64::from(second));
        self.add_repeating(HOUR, offset, f, priority)
    }

    /// Fire `f` at the top of every hour.
    pub fn add_timer_callback_hour_by_hour<F>(&mut self, f: F, priority: Option<i32>) -> CallbackId
    where
        F: FnMut(&mut T, &mut Self) + 'static,
    {
        self.add_timer_callback_by_hour(0, 0, f, priority)
    }

    /// Fire `f` every minute at `second` past the minute.
    pub fn add_timer_callback_by_minute<F>(
        &mut self,
        second: u32,
        f: F,
        priority: Option<i32>,
    ) -> CallbackId
    where
        F: FnMut(&mut T, &mut Self) + 'static,
    {
        self.add_repeating(MINUTE, f64::from(second), f, priority)
    }

    /// Fire `f` at the start of every minute.
    pub fn add_timer_callback_minute_by_minute<F>(&mut self, f: F, priority: Option<i32>) -> CallbackId
    where
        F: FnMut(&mut T, &mut Self) + 'static,
    {
        self.add_timer_callback_by_minute(0, f, priority)
    }

    /// Fire `f` every day at `hour:minute`.
    pub fn add_timer_callback_day_by_day<F>(
        &mut self,
        hour: u32,
        minute: u32,
        f: F,
        priority: Option<i32>,
    ) -> CallbackId
    where
        F: FnMut(&mut T, &mut Self) + 'static,
    {
        let offset = f64::from(hour).mul_add(HOUR, f64::from(minute) * MINUTE);
        self.add_repeating(DAY, offset, f, priority)
    }

    /// Fire `f(Stage::Day)` at day start and `f(Stage::Night)` at day end.
    ///
    /// Returns both handles so they can be removed together.
    pub fn add_timer_callback_day_and_night<F>(
        &mut self,
        f: F,
        priority: Option<i32>,
    ) -> DayNightCallbacks
    where
        F: FnMut(&mut T, &mut Self, Stage) + Clone + 'static,
    {
        let mut on_day = f.clone();
        let mut on_night = f;
        let day = self.add_timer_callback_day_by_day(
            self.day_start_hour,
            0,
            move |target, clock| on_day(target, clock, Stage::Day),
            priority,
        );
        let night = self.add_timer_callback_day_by_day(
            self.day_end_hour,
            0,
            move |target, clock| on_night(target, clock, Stage::Night),
            priority,
        );
        DayNightCallbacks { day, night }
    }

    /// Remove a callback. Returns `false` if the handle is stale.
    pub fn remove_timer_callback(&mut self, id: CallbackId) -> bool {
        self.callbacks.remove(id)
    }

    /// Remove both callbacks of a day/night pair.
    pub fn remove_timer_callback_day_and_night(&mut self, callbacks: DayNightCallbacks) {
        self.callbacks.remove(callbacks.day);
        self.callbacks.remove(callbacks.night);
    }

    /// Whether the handle refers to a live callback.
    pub fn has_timer_callback(&self, id: CallbackId) -> bool {
        self.callbacks.contains(id)
    }

    /// Schedule details of a live callback.
    pub fn timer_callback_info(&self, id: CallbackId) -> Option<CallbackInfo> {
        self.callbacks.get(id).copied()
    }

    /// Number of live callbacks.
    pub fn timer_callback_count(&self) -> usize {
        self.callbacks.len()
    }

    fn add_repeating<F>(&mut self, period: f64, offset: f64, f: F, priority: Option<i32>) -> CallbackId
    where
        F: FnMut(&mut T, &mut Self) + 'static,
    {
        let anchor = boundary::previous_boundary(self.time, period, offset);
        let callback = Callback::new(period).repeat(Repeat::Forever).on_end(f);
        self.add_timer_callback(callback, Some(anchor), priority)
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Persist game time (whole seconds).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn save(&self) -> ClockSave {
        ClockSave {
            time: self.time.max(0.0).floor() as u64,
        }
    }

    /// Reload game time from a save payload.
    ///
    /// A missing payload, or one with time zero, keeps the current time.
    /// Either way the stage, season, and real-time anchor are re-derived.
    #[allow(clippy::cast_precision_loss)]
    pub fn restore(&mut self, save: Option<&ClockSave>) {
        if let Some(save) = save
            && save.time > 0
        {
            self.time = save.time as f64;
        }
        self.real_time = self.time / self.time_scale;
        self.refresh_calendar();
        info!(time = self.time, stage = %self.stage, season = ?self.season, "Clock restored");
    }

    fn refresh_calendar(&mut self) {
        let parts = self.format_time(None);
        let stage = Stage::from_hour(parts.h, self.day_start_hour, self.day_end_hour);
        let season = Season::from_day(parts.d, self.days_per_season);
        if stage != self.stage {
            debug!(from = %self.stage, to = %stage, time = self.time, "Stage changed");
            self.stage = stage;
        }
        if season != self.season {
            debug!(from = ?self.season, to = ?season, day = parts.d, "Season changed");
            self.season = season;
        }
    }
}
