//! Multi-station operation through the shared panel and display.

use crate::mock_hw::Rig;

use dronefill::app::commands::AppCommand;
use dronefill::app::events::AppEvent;
use dronefill::config::SystemConfig;
use dronefill::fsm::StateId;

fn two_stations() -> Rig {
    Rig::new(SystemConfig {
        station_count: 2,
        ..SystemConfig::default()
    })
}

fn select_next(rig: &mut Rig) {
    rig.app
        .handle_command(AppCommand::SelectNext, rig.now, &mut rig.display, &mut rig.sink);
}

#[test]
fn switch_press_moves_cursor_round_robin() {
    let mut rig = two_stations();
    assert_eq!(rig.app.active_index(), 0);

    rig.press_switch();
    assert_eq!(rig.app.active_index(), 1);
    assert_eq!(rig.display.row(0), "station 2");

    rig.press_switch();
    assert_eq!(rig.app.active_index(), 0);
    assert_eq!(rig.display.row(0), "station 1");

    let selected: Vec<usize> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match *e {
            AppEvent::StationSelected { station } => Some(station),
            _ => None,
        })
        .collect();
    assert_eq!(selected, vec![1, 0]);
}

#[test]
fn held_switch_selects_once() {
    let mut rig = two_stations();
    rig.panel.switch = true;
    rig.steps(20);
    assert_eq!(rig.app.active_index(), 1);
}

#[test]
fn single_station_switch_redraws_in_place() {
    let mut rig = Rig::single();
    let clears = rig.display.clears;
    rig.press_switch();
    assert_eq!(rig.app.active_index(), 0);
    assert_eq!(rig.display.clears, clears + 1);
    assert_eq!(rig.display.row(0), "station 1");
}

#[test]
fn background_station_is_frozen_mid_cycle() {
    let mut rig = two_stations();
    rig.dial(45);
    rig.step();
    let t0 = rig.press_start();
    rig.run_through(t0 + 1_000);
    assert_eq!(rig.app.station(0).unwrap().state(), StateId::FillingMix);

    let cached = rig.app.station(0).unwrap().status().to_string();
    assert!(cached.starts_with("mix <- "), "got {cached:?}");

    rig.press_switch();
    assert_eq!(rig.display.row(0), "station 2");

    // Well past station 1's fill deadline
    rig.run_through(t0 + 10_000);
    let s1 = rig.app.station(0).unwrap();
    assert_eq!(s1.state(), StateId::FillingMix);
    assert_eq!(s1.delivered_liters(), 0);
    assert_eq!(s1.status(), cached);
    assert!(rig.hw(0).mix_pump && rig.hw(0).valves);

    // Switching back redraws from the cache before anything moves
    select_next(&mut rig);
    assert_eq!(rig.app.active_index(), 0);
    assert_eq!(rig.display.row(0), "station 1");
    assert_eq!(rig.display.row(1), "liters: 45");
    assert_eq!(rig.display.row(2), cached);

    // First tick back sees the expired phase
    rig.step();
    assert_eq!(rig.app.station(0).unwrap().state(), StateId::PumpingDrone);
    assert_eq!(rig.display.row(2), "pump on <- 20");
}

#[test]
fn stations_keep_independent_targets_and_cycles() {
    let mut rig = two_stations();
    rig.dial(45);
    rig.step();
    rig.press_start();

    rig.press_switch();
    rig.dial(10);
    rig.step();
    assert_eq!(rig.display.row(1), "liters: 10");
    rig.press_start();

    let s1 = rig.app.station(0).unwrap();
    let s2 = rig.app.station(1).unwrap();
    assert_eq!((s1.target_liters(), s2.target_liters()), (45, 10));
    assert_eq!(s1.state(), StateId::FillingMix);
    assert_eq!(s2.state(), StateId::FillingMix);
    assert!(rig.hw(1).mix_pump);

    // Station 2 finishes on its own; station 1 never moves
    rig.steps(200);
    assert_eq!(rig.app.station(1).unwrap().state(), StateId::Idle);
    assert_eq!(rig.app.station(1).unwrap().delivered_liters(), 10);
    assert_eq!(rig.app.station(0).unwrap().state(), StateId::FillingMix);
    assert_eq!(rig.sink.batches(1), vec![10]);
    assert_eq!(rig.sink.batches(0), vec![20]);
}

#[test]
fn start_applies_to_the_active_station_only() {
    let mut rig = two_stations();
    rig.press_switch();
    rig.dial(5);
    rig.step();
    rig.press_start();

    assert_eq!(rig.app.station(0).unwrap().state(), StateId::Idle);
    assert_eq!(rig.app.station(1).unwrap().state(), StateId::FillingMix);
    assert!(!rig.hw(0).any_output_on());
    assert!(rig.sink.events.contains(&AppEvent::CycleStarted {
        station: 1,
        target_liters: 5,
    }));
}

#[test]
fn mismatched_hardware_count_is_rejected() {
    use crate::mock_hw::MockStation;
    use dronefill::app::service::AppService;

    let config = SystemConfig {
        station_count: 2,
        ..SystemConfig::default()
    };
    assert!(AppService::new(config, [MockStation::new()]).is_err());
}
