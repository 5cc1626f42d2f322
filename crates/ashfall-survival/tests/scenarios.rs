//! End-to-end scenarios driving a full [`Simulation`] frame by frame.
//!
//! Each test builds an in-memory host, wires it to a clock with the stock
//! configuration, and advances with real-time frame deltas the way a
//! render loop would.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(clippy::unwrap_used, clippy::float_cmp)]

use ashfall_core::TimeConfig;
use ashfall_survival::{AttributeRepository, InMemoryHost, Simulation, SurvivalConfig};
use ashfall_types::{Attribute, ClockSave, DeathReason, SleepDuration, Stage};

fn simulation(host: InMemoryHost) -> Simulation<InMemoryHost> {
    Simulation::new(host, &TimeConfig::default(), SurvivalConfig::default()).unwrap()
}

fn value(sim: &Simulation<InMemoryHost>, attribute: Attribute) -> f64 {
    sim.host().get(attribute)
}

/// Run `frames` updates of `dt` real seconds.
fn run(sim: &mut Simulation<InMemoryHost>, frames: u32, dt: f64) {
    for _ in 0..frames {
        sim.update(dt);
    }
}

// =============================================================================
// Hourly decay
// =============================================================================

#[test]
fn one_hour_of_frames_applies_one_decay() {
    let mut sim = simulation(InMemoryHost::new());
    // 06:00:01 -> 07:00:01 in 50-game-second frames.
    run(&mut sim, 72, 0.5);

    assert_eq!(sim.clock().format_time(None).h, 7);
    // Hour 7 is index 1 of the cycle: starve -3.
    assert_eq!(value(&sim, Attribute::Starve), 47.0);
    // Starve (25,50] costs 2 spirit and vigour (25,50] costs 1.
    assert_eq!(value(&sim, Attribute::Spirit), 47.0);
    // Autumn day target: 15 + 2.
    assert_eq!(value(&sim, Attribute::Temperature), 17.0);
    assert_eq!(value(&sim, Attribute::Hp), 100.0);
}

#[test]
fn starve_is_clamped_at_zero() {
    let mut sim = simulation(InMemoryHost::new().with_value(Attribute::Starve, 2.0));
    run(&mut sim, 72, 0.5);
    assert_eq!(value(&sim, Attribute::Starve), 0.0);
}

#[test]
fn hourly_step_closes_a_six_point_gap() {
    // Autumn day target is 15 + 2 = 17; start six below it.
    let mut sim = simulation(InMemoryHost::new().with_value(Attribute::Temperature, 11.0));
    run(&mut sim, 72, 0.5);
    assert_eq!(value(&sim, Attribute::Temperature), 17.0);
    // 17 is above the cold band, so no infect is added.
    assert_eq!(value(&sim, Attribute::Infect), 0.0);
}

#[test]
fn restored_winter_night_with_fire_converges_at_the_next_hour() {
    let mut sim = simulation(InMemoryHost::new().with_building(5, 0, true));
    // Day 30, 20:59:50.
    sim.restore(Some(&ClockSave {
        time: 30 * 86_400 + 21 * 3_600 - 10,
    }));
    assert_eq!(sim.clock().stage(), Stage::Night);

    sim.update(0.05);
    assert_eq!(value(&sim, Attribute::Temperature), 20.0);
    assert_eq!(value(&sim, Attribute::Starve), 50.0);

    // Crosses 21:00.
    sim.update(0.1);
    // Winter night: 0 - 2, plus 13 from the fireplace.
    assert_eq!(value(&sim, Attribute::Temperature), 11.0);
    let starve_after_first = value(&sim, Attribute::Starve);
    assert_eq!(starve_after_first, 48.0);

    sim.update(0.1);
    assert_eq!(value(&sim, Attribute::Starve), starve_after_first);
}

#[test]
fn restoring_an_earlier_save_keeps_decay_and_death_running() {
    let mut sim = simulation(InMemoryHost::new());
    // Day 3, 12:00:00 is itself an hour boundary: hour 12 decays on the
    // first frame (cycle index 0, starve -4).
    sim.restore(Some(&ClockSave {
        time: 3 * 86_400 + 12 * 3_600,
    }));
    sim.update(0.1);
    assert_eq!(value(&sim, Attribute::Starve), 46.0);

    // Back to day 1, 12:00:30, then three hours of frames.
    sim.restore(Some(&ClockSave {
        time: 86_400 + 12 * 3_600 + 30,
    }));
    run(&mut sim, 216, 0.5);
    let now = sim.clock().format_time(None);
    assert_eq!((now.d, now.h), (1, 15));
    // Hours 13, 14, 15: -3, -1, -2.
    assert_eq!(value(&sim, Attribute::Starve), 40.0);

    sim.engine_mut().host_mut().set(Attribute::Hp, 0.0);
    run(&mut sim, 20, 0.5);
    assert!(sim.clock().is_paused());
    assert_eq!(sim.host().death_overlays, vec![DeathReason::HpZero]);
}

#[test]
fn restoring_a_later_save_waits_for_the_next_hour() {
    let mut sim = simulation(InMemoryHost::new());
    // Day 2, 09:30:00.
    sim.restore(Some(&ClockSave {
        time: 2 * 86_400 + 9 * 3_600 + 30 * 60,
    }));
    sim.update(0.01);
    assert_eq!(value(&sim, Attribute::Starve), 50.0);

    // 09:30:01 -> 10:00:01. Hour 10 is cycle index 4: starve -2.
    run(&mut sim, 36, 0.5);
    assert_eq!(sim.clock().format_time(None).h, 10);
    assert_eq!(value(&sim, Attribute::Starve), 48.0);
}

#[test]
fn restoring_mid_sleep_ends_the_sleep() {
    let host = InMemoryHost::new()
        .with_building(9, 0, true)
        .with_value(Attribute::Hp, 80.0);
    let mut sim = simulation(host);
    assert!(sim.start_sleep(SleepDuration::OneHour));
    sim.restore(Some(&ClockSave {
        time: 86_400 + 8 * 3_600,
    }));
    assert!(!sim.sleep_state().is_sleeping);
    run(&mut sim, 40, 0.1);
    assert_eq!(value(&sim, Attribute::Hp), 80.0);
}

#[test]
fn save_payload_is_whole_seconds() {
    let mut sim = simulation(InMemoryHost::new());
    sim.update(0.123);
    let json = serde_json::to_string(&sim.save()).unwrap();
    assert_eq!(json, r#"{"time":21613}"#);
}

// =============================================================================
// Sleep
// =============================================================================

#[test]
fn sleep_needs_a_working_bed() {
    let mut sim = simulation(InMemoryHost::new().with_building(9, 0, false));
    assert!(!sim.start_sleep(SleepDuration::OneHour));
    assert!(!sim.sleep_state().is_sleeping);
    assert!(!sim.clock().is_accelerated());
    assert!(sim.host().logs.is_empty());
}

#[test]
fn one_hour_sleep_recovers_in_one_batch() {
    let host = InMemoryHost::new()
        .with_building(9, 0, true)
        .with_value(Attribute::Hp, 80.0);
    let mut sim = simulation(host);

    assert!(sim.start_sleep(SleepDuration::OneHour));
    let state = sim.sleep_state();
    assert_eq!(state.vigour_recovery_per_hour, 3.0);
    assert_eq!(state.hp_recovery_per_hour, 5.0);
    // 3600 game seconds in the 3 real-second budget.
    assert_eq!(sim.clock().time_scale(), 1_200.0);

    // Half way through nothing has been recovered yet.
    run(&mut sim, 15, 0.1);
    assert!(sim.sleep_state().is_sleeping);
    assert_eq!(value(&sim, Attribute::Vigour), 50.0);
    assert_eq!(value(&sim, Attribute::Hp), 80.0);

    run(&mut sim, 25, 0.1);
    assert!(!sim.sleep_state().is_sleeping);
    assert_eq!(value(&sim, Attribute::Vigour), 53.0);
    assert_eq!(value(&sim, Attribute::Hp), 85.0);
    assert!(!sim.clock().is_accelerated());
    assert_eq!(sim.clock().time_scale(), 100.0);
    assert_eq!(sim.host().logs.len(), 2);
}

#[test]
fn recovery_is_capped_at_max() {
    let host = InMemoryHost::new()
        .with_building(9, 0, true)
        .with_value(Attribute::Hp, 98.0)
        .with_value(Attribute::Vigour, 99.0);
    let mut sim = simulation(host);
    assert!(sim.start_sleep(SleepDuration::OneHour));
    run(&mut sim, 40, 0.1);
    assert_eq!(value(&sim, Attribute::Hp), 100.0);
    assert_eq!(value(&sim, Attribute::Vigour), 100.0);
}

#[test]
fn sleeping_until_morning_wakes_at_day_start() {
    let host = InMemoryHost::new().with_building(9, 1, true);
    let mut sim = simulation(host);
    sim.restore(Some(&ClockSave {
        time: 22 * 3_600,
    }));
    assert!(sim.start_sleep(SleepDuration::UntilMorning));

    run(&mut sim, 60, 0.1);
    assert!(!sim.sleep_state().is_sleeping);
    let now = sim.clock().format_time(None);
    assert_eq!((now.d, now.h), (1, 6));
    assert_eq!(sim.clock().stage(), Stage::Day);
}

#[test]
fn ending_sleep_early_forfeits_recovery() {
    let host = InMemoryHost::new()
        .with_building(9, 0, true)
        .with_value(Attribute::Hp, 80.0);
    let mut sim = simulation(host);
    assert!(sim.start_sleep(SleepDuration::FourHours));
    run(&mut sim, 5, 0.1);
    sim.end_sleep();
    run(&mut sim, 200, 0.1);
    assert_eq!(value(&sim, Attribute::Hp), 80.0);
    assert!(!sim.sleep_state().is_sleeping);
}

// =============================================================================
// Death
// =============================================================================

#[test]
fn zero_health_pauses_once_and_hands_off() {
    let mut sim = simulation(InMemoryHost::new());
    sim.engine_mut().host_mut().set(Attribute::Hp, 0.0);

    // Past the next minute boundary.
    run(&mut sim, 10, 0.1);
    assert!(sim.clock().is_paused());
    assert_eq!(sim.host().death_overlays, vec![DeathReason::HpZero]);

    let frozen = sim.clock().now();
    run(&mut sim, 100, 0.1);
    assert_eq!(sim.clock().now(), frozen);
    assert_eq!(sim.host().death_overlays.len(), 1);
}

#[test]
fn revived_player_is_reported_again_on_second_death() {
    let mut sim = simulation(InMemoryHost::new());
    sim.engine_mut().host_mut().set(Attribute::Hp, 0.0);
    run(&mut sim, 10, 0.1);
    assert!(sim.clock().is_paused());

    // The host revives the player and carries on.
    sim.engine_mut().host_mut().set(Attribute::Hp, 50.0);
    sim.resume();
    run(&mut sim, 1, 0.1);
    assert!(!sim.engine().is_dead());

    sim.engine_mut().host_mut().set(Attribute::Hp, 0.0);
    run(&mut sim, 20, 0.1);
    assert!(sim.clock().is_paused());
    assert_eq!(
        sim.host().death_overlays,
        vec![DeathReason::HpZero, DeathReason::HpZero]
    );
}

#[test]
fn lethal_infection_is_reported_as_infection() {
    let host = InMemoryHost::new()
        .with_value(Attribute::Hp, 5.0)
        .with_value(Attribute::Infect, 80.0);
    let mut sim = simulation(host);
    run(&mut sim, 80, 0.5);
    assert!(sim.clock().is_paused());
    assert_eq!(sim.host().death_overlays, vec![DeathReason::Infection]);
    assert_eq!(sim.check_death_conditions(), Some(DeathReason::Infection));
    assert_eq!(sim.host().death_overlays.len(), 1);
}

#[test]
fn virus_overload_is_detected_within_a_minute() {
    let host = InMemoryHost::new().with_value(Attribute::Virus, 100.0);
    let mut sim = simulation(host);
    run(&mut sim, 1, 0.6);
    assert_eq!(sim.host().death_overlays, vec![DeathReason::VirusOverload]);
}

// =============================================================================
// Cure and bind
// =============================================================================

#[test]
fn cure_stops_infection_from_spreading() {
    let host = InMemoryHost::new().with_value(Attribute::Infect, 60.0);
    let mut sim = simulation(host);
    sim.engine_mut().set_is_in_cure(true);
    run(&mut sim, 72, 0.5);
    assert_eq!(value(&sim, Attribute::Infect), 60.0);
    // ceil(-12 * 0.6) = -7
    assert_eq!(value(&sim, Attribute::Hp), 93.0);
}
