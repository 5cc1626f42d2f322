//! Boundary math for anchoring repeating callbacks.
//!
//! A repeating callback registered mid-period is anchored at the most
//! recent boundary strictly before "now", so the first firing happens at
//! the next boundary instead of one full period later. When "now" sits
//! exactly on a boundary the anchor moves one period back, which makes
//! registration at startup idempotent with registration one tick later.

use ashfall_types::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Period of an hourly callback.
pub const HOUR: f64 = SECONDS_PER_HOUR;

/// Period of a minute callback.
pub const MINUTE: f64 = SECONDS_PER_MINUTE;

/// Period of a daily callback.
pub const DAY: f64 = SECONDS_PER_DAY;

/// Most recent time `offset + k * period` that is strictly before `now`.
///
/// `offset` positions the boundary inside the period, for example
/// `8 * HOUR + 30 * MINUTE` with a `DAY` period is "08:30 every day".
/// A non-positive period returns `now` unchanged.
pub fn previous_boundary(now: f64, period: f64, offset: f64) -> f64 {
    if period.is_nan() || period <= 0.0 {
        return now;
    }
    let k = ((now - offset) / period).floor();
    let candidate = k.mul_add(period, offset);
    if candidate >= now {
        candidate - period
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn hourly_anchor_is_top_of_current_hour() {
        // 06:00:01 anchors at 06:00:00.
        let now = 6.0 * HOUR + 1.0;
        assert!(approx(previous_boundary(now, HOUR, 0.0), 6.0 * HOUR));
    }

    #[test]
    fn exact_boundary_moves_back_one_period() {
        let now = 7.0 * HOUR;
        assert!(approx(previous_boundary(now, HOUR, 0.0), 6.0 * HOUR));
        let now = 7.0 * HOUR + 3.0 * MINUTE;
        assert!(approx(previous_boundary(now, MINUTE, 0.0), 7.0 * HOUR + 2.0 * MINUTE));
    }

    #[test]
    fn fractional_now_keeps_current_boundary() {
        let now = 2.0 * HOUR + 0.25;
        assert!(approx(previous_boundary(now, HOUR, 0.0), 2.0 * HOUR));
    }

    #[test]
    fn minute_anchor_wraps_across_hour() {
        // 07:00:00 exactly anchors at 06:59:00.
        let now = 7.0 * HOUR;
        assert!(approx(previous_boundary(now, MINUTE, 0.0), 6.0 * HOUR + 59.0 * MINUTE));
    }

    #[test]
    fn daily_anchor_later_in_day_goes_to_yesterday() {
        // At 06:00:01 on day 3, the most recent 20:00 was on day 2.
        let now = 3.0 * DAY + 6.0 * HOUR + 1.0;
        let anchor = previous_boundary(now, DAY, 20.0 * HOUR);
        assert!(approx(anchor, 2.0 * DAY + 20.0 * HOUR));
    }

    #[test]
    fn daily_anchor_earlier_in_day_is_today() {
        let now = 3.0 * DAY + 9.0 * HOUR;
        let anchor = previous_boundary(now, DAY, HOUR + 5.0 * MINUTE);
        assert!(approx(anchor, 3.0 * DAY + HOUR + 5.0 * MINUTE));
    }

    #[test]
    fn daily_anchor_on_day_zero_can_be_negative() {
        let now = 6.0 * HOUR + 1.0;
        let anchor = previous_boundary(now, DAY, 20.0 * HOUR);
        assert!(approx(anchor, -4.0 * HOUR));
    }

    #[test]
    fn anchor_is_always_strictly_before_now_and_within_one_period() {
        let mut now = 0.5;
        while now < 3.0 * DAY {
            for (period, offset) in [(MINUTE, 0.0), (HOUR, 0.0), (DAY, 6.0 * HOUR)] {
                let anchor = previous_boundary(now, period, offset);
                assert!(anchor < now);
                assert!(now - anchor <= period + 1e-9);
            }
            now += 977.3;
        }
    }

    #[test]
    fn non_positive_period_is_identity() {
        assert!(approx(previous_boundary(42.0, 0.0, 0.0), 42.0));
        assert!(approx(previous_boundary(42.0, -5.0, 0.0), 42.0));
    }
}
