//! Fuzz target: `AppService::tick`
//!
//! Interprets the input as a stream of panel samples, level-switch states
//! and clock steps for a two-station service.  Asserts that no tick
//! panics, the pumps of a station are never both on, and no station ever
//! reports more delivered than it was asked for.
//!
//! cargo fuzz run fuzz_station_cycle

#![no_main]

use dronefill::app::events::AppEvent;
use dronefill::app::ports::{
    ActuatorPort, DisplayPort, EventSink, PanelPort, PanelSnapshot, SensorPort,
};
use dronefill::app::service::AppService;
use dronefill::config::SystemConfig;
use dronefill::drivers::led_gradient::Rgb;
use dronefill::fsm::context::LevelSnapshot;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Hw {
    levels: LevelSnapshot,
    mix_pump: bool,
    drone_pump: bool,
}

impl SensorPort for Hw {
    fn read_levels(&mut self) -> LevelSnapshot {
        self.levels
    }
}

impl ActuatorPort for Hw {
    fn set_mix_pump(&mut self, on: bool) {
        self.mix_pump = on;
    }
    fn set_drone_pump(&mut self, on: bool) {
        self.drone_pump = on;
    }
    fn set_valves(&mut self, _open: bool) {}
    fn set_led(&mut self, _colour: Rgb) {}
}

struct Screen;

impl DisplayPort for Screen {
    fn write_line(&mut self, _col: u8, row: u8, text: &str) {
        assert!(row < 4);
        assert!(text.len() <= 20, "line overflows the display: {text:?}");
    }
    fn clear(&mut self) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

struct Panel(PanelSnapshot);

impl PanelPort for Panel {
    fn read(&mut self) -> PanelSnapshot {
        self.0
    }
}

fuzz_target!(|data: &[u8]| {
    let config = SystemConfig {
        station_count: 2,
        ..SystemConfig::default()
    };
    let Ok(mut app) = AppService::new(config, [Hw::default(), Hw::default()]) else {
        return;
    };
    let mut screen = Screen;
    let mut sink = Discard;
    app.start(&mut screen, &mut sink);

    let mut now = 0u32;
    for chunk in data.chunks_exact(4) {
        let flags = chunk[0];
        let dial = u16::from_le_bytes([chunk[1], chunk[2]]);
        now = now.wrapping_add(u32::from(chunk[3]) * 40);

        let active = app.active_index();
        if let Some(station) = app.station_mut(active) {
            station.hardware_mut().levels = LevelSnapshot {
                mix_full: flags & 0x04 != 0,
                drone_full: flags & 0x08 != 0,
            };
        }

        let mut panel = Panel(PanelSnapshot {
            start_pressed: flags & 0x01 != 0,
            switch_pressed: flags & 0x02 != 0,
            dial_raw: dial,
        });
        app.tick(now, &mut panel, &mut screen, &mut sink);

        for station in app.stations() {
            let hw = station.hardware();
            assert!(!(hw.mix_pump && hw.drone_pump));
            assert!(station.delivered_liters() <= station.target_liters());
        }
    }
});
