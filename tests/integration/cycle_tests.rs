//! End-to-end dispensing cycles on a single station.
//!
//! Drives `AppService` through the mock panel at a 50 ms tick and checks
//! phase timing, outputs, status rows and emitted events.

use crate::mock_hw::{ActuatorCall, Rig};

use dronefill::app::events::AppEvent;
use dronefill::config::SystemConfig;
use dronefill::drivers::led_gradient::{COLOUR_ALERT, COLOUR_BLUE, COLOUR_OFF};
use dronefill::fsm::StateId;

fn state(rig: &Rig) -> StateId {
    rig.app.active_station().state()
}

/// Dial `liters`, let one tick latch it, then press start.  Returns the
/// time the cycle began.
fn start_with(rig: &mut Rig, liters: u16) -> u32 {
    rig.dial(liters);
    rig.step();
    rig.press_start()
}

// ── Normal cycle ──────────────────────────────────────────────

#[test]
fn boot_screen_shows_station_and_target() {
    let mut rig = Rig::single();
    assert_eq!(rig.display.clears, 1);
    assert_eq!(rig.display.row(0), "station 1");

    rig.dial(45);
    rig.step();
    assert_eq!(rig.display.row(1), "liters: 45");
    assert_eq!(state(&rig), StateId::Idle);
    assert!(!rig.hw(0).any_output_on());
}

#[test]
fn full_cycle_delivers_target_in_capped_batches() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 45);
    assert_eq!(t0, 100);
    assert_eq!(state(&rig), StateId::FillingMix);

    // 20 L at 300 ms/L
    rig.run_through(t0 + 6_000 - 50);
    assert_eq!(state(&rig), StateId::FillingMix);
    rig.step();
    assert_eq!(state(&rig), StateId::PumpingDrone);

    // pump 20, fill 20, pump 20, fill 5, pump 5
    rig.run_through(t0 + 12_000);
    assert_eq!(state(&rig), StateId::FillingMix);
    assert_eq!(rig.app.active_station().delivered_liters(), 20);

    rig.run_through(t0 + 24_000);
    assert_eq!(state(&rig), StateId::FillingMix);
    assert_eq!(rig.app.active_station().batch_liters(), 5);

    rig.run_through(t0 + 27_000);
    assert_eq!(state(&rig), StateId::Cooldown);
    assert_eq!(rig.app.active_station().delivered_liters(), 45);
    assert_eq!(rig.display.row(2), "pump off ");
    assert_eq!(rig.hw(0).led, COLOUR_OFF);

    assert_eq!(rig.sink.batches(0), vec![20, 20, 5]);
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::CycleComplete {
                station: 0,
                delivered_liters: 45
            }
        )),
        1
    );
}

#[test]
fn cooldown_returns_to_idle_after_one_second() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 5);

    // 5 L: 1500 ms fill + 1500 ms pump
    rig.run_through(t0 + 3_000);
    assert_eq!(state(&rig), StateId::Cooldown);

    rig.run_through(t0 + 3_950);
    assert_eq!(state(&rig), StateId::Cooldown);
    rig.step();
    assert_eq!(state(&rig), StateId::Idle);
    assert_eq!(rig.display.row(2), "ready again");

    // Full redraw on the tick after the return to idle
    let clears = rig.display.clears;
    rig.step();
    assert_eq!(rig.display.clears, clears + 1);
    assert_eq!(rig.display.row(0), "station 1");
    assert_eq!(rig.display.row(2), "ready again");
}

#[test]
fn outputs_follow_the_phase() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 30);

    let hw = rig.hw(0);
    assert!(hw.mix_pump && hw.valves && !hw.drone_pump);
    assert_eq!(hw.led, COLOUR_BLUE);

    rig.run_through(t0 + 6_000);
    let hw = rig.hw(0);
    assert!(!hw.mix_pump && !hw.valves && hw.drone_pump);

    rig.run_through(t0 + 12_000);
    let hw = rig.hw(0);
    assert!(hw.mix_pump && hw.valves && !hw.drone_pump);

    // 10 L remaining: 3 s fill, 3 s pump
    rig.run_through(t0 + 18_000);
    assert_eq!(state(&rig), StateId::Cooldown);
    assert!(!rig.hw(0).any_output_on());
}

#[test]
fn status_row_counts_down_remaining_liters() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 20);
    rig.run_through(t0 + 12_000);

    let history = rig.display.history(2);
    assert_eq!(history.first().copied(), Some("mix <- 20"));
    assert!(history.contains(&"mix <- 19"));
    assert!(history.contains(&"mix <- 0"));
    assert!(history.contains(&"pump on <- 20"));
    assert!(history.contains(&"pump on <- 1"));
    assert_eq!(history.last().copied(), Some("pump off "));

    // Each figure is written once, not on every tick
    let nineteen = history.iter().filter(|t| **t == "mix <- 19").count();
    assert_eq!(nineteen, 1);
}

#[test]
fn only_changed_outputs_are_rewritten() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 10);
    let calls_after_start = rig.hw(0).calls.len();

    rig.run_through(t0 + 2_000);
    let during_fill = &rig.hw(0).calls[calls_after_start..];
    assert!(
        !during_fill
            .iter()
            .any(|c| matches!(c, ActuatorCall::MixPump(_) | ActuatorCall::Valves(_))),
        "steady fill should not re-command the mix pump: {:?}",
        during_fill
    );
}

#[test]
fn lower_dial_after_cycle_keeps_delivery_within_target() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 45);
    rig.run_through(t0 + 28_000);
    assert_eq!(state(&rig), StateId::Idle);
    assert_eq!(rig.app.active_station().delivered_liters(), 45);

    rig.dial(10);
    rig.step();
    let station = rig.app.active_station();
    assert_eq!(station.target_liters(), 10);
    assert!(station.delivered_liters() <= station.target_liters());
    assert_eq!(rig.display.row(1), "liters: 10");

    // The next cycle runs from zero against the new target
    rig.press_start();
    assert_eq!(state(&rig), StateId::FillingMix);
    assert_eq!(rig.app.active_station().delivered_liters(), 0);
    assert_eq!(rig.sink.batches(0), vec![20, 20, 5, 10]);
}

// ── Overflow switches ─────────────────────────────────────────

#[test]
fn mix_tank_full_switches_to_pumping_with_full_batch() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 10);

    rig.run_through(t0 + 1_000);
    rig.hw_mut(0).mix_full = true;
    rig.step();
    rig.hw_mut(0).mix_full = false;

    assert_eq!(state(&rig), StateId::PumpingDrone);
    assert_eq!(rig.app.active_station().batch_liters(), 20);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::MixTankFull { station: 0 })),
        1
    );

    // The pump runs for the full 20 L but delivery is capped at the target
    let pump_start = rig.now - 50;
    rig.run_through(pump_start + 6_000 - 50);
    assert_eq!(state(&rig), StateId::PumpingDrone);
    rig.step();
    assert_eq!(state(&rig), StateId::Cooldown);
    assert_eq!(rig.app.active_station().delivered_liters(), 10);
}

#[test]
fn drone_overflow_closes_cycle_with_alert() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 45);

    rig.run_through(t0 + 7_000);
    assert_eq!(state(&rig), StateId::PumpingDrone);
    rig.hw_mut(0).drone_full = true;
    rig.step();

    assert_eq!(state(&rig), StateId::Cooldown);
    let station = rig.app.active_station();
    assert_eq!(station.delivered_liters(), 45);
    assert!(station.record().alert);
    assert_eq!(rig.hw(0).led, COLOUR_ALERT);
    assert!(!rig.hw(0).any_output_on());
    assert_eq!(rig.display.row(2), "filled in ");
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::DroneOverflow { station: 0 })),
        1
    );

    rig.hw_mut(0).drone_full = false;
    rig.steps(21);
    assert_eq!(state(&rig), StateId::Idle);
    assert!(!rig.app.active_station().record().alert);
    assert_eq!(rig.hw(0).led, COLOUR_OFF);
}

#[test]
fn drone_switch_ignored_while_filling() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 45);
    rig.hw_mut(0).drone_full = true;
    rig.run_through(t0 + 3_000);
    assert_eq!(state(&rig), StateId::FillingMix);
}

// ── Operator input ────────────────────────────────────────────

#[test]
fn start_while_busy_is_ignored() {
    let mut rig = Rig::single();
    start_with(&mut rig, 45);
    rig.steps(10);

    rig.press_start();
    assert_eq!(state(&rig), StateId::FillingMix);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::CycleStarted { .. })),
        1
    );
}

#[test]
fn start_during_cooldown_is_ignored() {
    let mut rig = Rig::single();
    let t0 = start_with(&mut rig, 5);
    rig.run_through(t0 + 3_000);
    assert_eq!(state(&rig), StateId::Cooldown);

    rig.press_start();
    assert_eq!(state(&rig), StateId::Cooldown);
}

#[test]
fn dial_is_frozen_during_a_cycle() {
    let mut rig = Rig::single();
    start_with(&mut rig, 45);

    rig.dial(80);
    rig.steps(20);
    assert_eq!(rig.app.active_station().target_liters(), 45);
    assert_eq!(rig.display.row(1), "liters: 45");
}

#[test]
fn held_start_button_fires_once() {
    let mut rig = Rig::single();
    rig.dial(5);
    rig.step();
    rig.panel.start = true;
    // Hold through a whole 5 L cycle and its cooldown
    rig.steps(100);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::CycleStarted { .. })),
        1
    );
    assert_eq!(state(&rig), StateId::Idle);
}

#[test]
fn start_command_bypasses_the_button() {
    use dronefill::app::commands::AppCommand;

    let mut rig = Rig::single();
    rig.dial(10);
    rig.step();
    rig.app.handle_command(
        AppCommand::StartCycle,
        rig.now,
        &mut rig.display,
        &mut rig.sink,
    );
    assert_eq!(state(&rig), StateId::FillingMix);
    assert_eq!(rig.display.row(2), "mix <- 10");
}

// ── Timing edge cases ─────────────────────────────────────────

#[test]
fn cycle_survives_clock_wraparound() {
    let mut rig = Rig::single();
    rig.now = u32::MAX - 1_999;
    let t0 = start_with(&mut rig, 10);

    // 3 s fill straddles the wrap
    rig.steps(58);
    assert_eq!(state(&rig), StateId::FillingMix);
    assert!(rig.now < t0, "clock should have wrapped");

    rig.steps(200);
    assert_eq!(state(&rig), StateId::Idle);
    assert_eq!(rig.app.active_station().delivered_liters(), 10);
}

#[test]
fn custom_calibration_changes_phase_length() {
    let config = SystemConfig {
        ms_per_liter: 100,
        tank_capacity_liters: 5,
        ..SystemConfig::default()
    };
    let mut rig = Rig::new(config);
    let t0 = start_with(&mut rig, 12);

    // 5 L at 100 ms/L
    rig.run_through(t0 + 500);
    assert_eq!(state(&rig), StateId::PumpingDrone);

    rig.run_through(t0 + 5_000);
    assert_eq!(rig.sink.batches(0), vec![5, 5, 2]);
}
