//! Mock adapters for integration tests.
//!
//! Records every actuator call and display write so tests can assert on
//! the full history without touching real GPIO, LEDC or I²C.

use dronefill::app::events::AppEvent;
use dronefill::app::ports::{
    ActuatorPort, DisplayPort, EventSink, PanelPort, PanelSnapshot, SensorPort,
};
use dronefill::app::service::AppService;
use dronefill::config::SystemConfig;
use dronefill::drivers::led_gradient::{COLOUR_OFF, Rgb};
use dronefill::fsm::context::LevelSnapshot;
use dronefill::sensors::dial::target_from_raw;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    MixPump(bool),
    DronePump(bool),
    Valves(bool),
    Led(Rgb),
}

// ── MockStation ───────────────────────────────────────────────

/// One station's sensors and outputs.  Level switches are plain fields the
/// test flips; outputs mirror the last command received.
pub struct MockStation {
    pub mix_full: bool,
    pub drone_full: bool,
    pub mix_pump: bool,
    pub drone_pump: bool,
    pub valves: bool,
    pub led: Rgb,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockStation {
    pub fn new() -> Self {
        Self {
            mix_full: false,
            drone_full: false,
            mix_pump: false,
            drone_pump: false,
            valves: false,
            led: COLOUR_OFF,
            calls: Vec::new(),
        }
    }

    pub fn any_output_on(&self) -> bool {
        self.mix_pump || self.drone_pump || self.valves
    }
}

impl Default for MockStation {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockStation {
    fn read_levels(&mut self) -> LevelSnapshot {
        LevelSnapshot {
            mix_full: self.mix_full,
            drone_full: self.drone_full,
        }
    }
}

impl ActuatorPort for MockStation {
    fn set_mix_pump(&mut self, on: bool) {
        self.mix_pump = on;
        self.calls.push(ActuatorCall::MixPump(on));
    }

    fn set_drone_pump(&mut self, on: bool) {
        self.drone_pump = on;
        self.calls.push(ActuatorCall::DronePump(on));
    }

    fn set_valves(&mut self, open: bool) {
        self.valves = open;
        self.calls.push(ActuatorCall::Valves(open));
    }

    fn set_led(&mut self, colour: Rgb) {
        self.led = colour;
        self.calls.push(ActuatorCall::Led(colour));
    }
}

// ── RecordingDisplay ──────────────────────────────────────────

/// Four-row character screen.  Keeps the visible text plus a write log.
#[derive(Default)]
pub struct RecordingDisplay {
    pub rows: [String; 4],
    pub writes: Vec<(u8, String)>,
    pub clears: usize,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn row(&self, row: u8) -> &str {
        &self.rows[row as usize]
    }

    /// Every text ever written to `row`, oldest first.
    pub fn history(&self, row: u8) -> Vec<&str> {
        self.writes
            .iter()
            .filter(|(r, _)| *r == row)
            .map(|(_, t)| t.as_str())
            .collect()
    }
}

impl DisplayPort for RecordingDisplay {
    fn write_line(&mut self, col: u8, row: u8, text: &str) {
        let Some(line) = self.rows.get_mut(row as usize) else {
            return;
        };
        let keep: String = line.chars().take(col as usize).collect();
        *line = keep + text;
        self.writes.push((row, text.to_string()));
    }

    fn clear(&mut self) {
        self.rows = Default::default();
        self.clears += 1;
    }
}

// ── ScriptedPanel ─────────────────────────────────────────────

/// Front panel whose inputs are set directly by the test.
#[derive(Default)]
pub struct ScriptedPanel {
    pub start: bool,
    pub switch: bool,
    pub dial_raw: u16,
}

impl PanelPort for ScriptedPanel {
    fn read(&mut self) -> PanelSnapshot {
        PanelSnapshot {
            start_pressed: self.start,
            switch_pressed: self.switch,
            dial_raw: self.dial_raw,
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn batches(&self, station: usize) -> Vec<u16> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                AppEvent::BatchStarted {
                    station: s,
                    batch_liters,
                } if s == station => Some(batch_liters),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub const TICK_MS: u32 = 50;

/// The service wired to mock adapters, driven at a fixed tick period.
pub struct Rig {
    pub app: AppService<MockStation>,
    pub panel: ScriptedPanel,
    pub display: RecordingDisplay,
    pub sink: RecordingSink,
    /// Timestamp of the next tick.
    pub now: u32,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(config: SystemConfig) -> Self {
        let stations = (0..config.station_count).map(|_| MockStation::new());
        let mut app = AppService::new(config, stations).expect("valid rig config");
        let mut display = RecordingDisplay::default();
        let mut sink = RecordingSink::default();
        app.start(&mut display, &mut sink);
        Self {
            app,
            panel: ScriptedPanel::default(),
            display,
            sink,
            now: 0,
        }
    }

    /// Single station, default calibration.
    pub fn single() -> Self {
        Self::new(SystemConfig::default())
    }

    /// Set the dial to the first raw position yielding `liters`.
    pub fn dial(&mut self, liters: u16) {
        let config = self.app.config().clone();
        self.panel.dial_raw = (0..=config.dial_raw_max)
            .find(|&raw| target_from_raw(raw, &config) == liters)
            .expect("target reachable on the dial");
    }

    pub fn step(&mut self) {
        self.app
            .tick(self.now, &mut self.panel, &mut self.display, &mut self.sink);
        self.now = self.now.wrapping_add(TICK_MS);
    }

    pub fn steps(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Tick until the clock has passed `t` (the tick at `t` included).
    pub fn run_through(&mut self, t: u32) {
        while self.now <= t {
            self.step();
        }
    }

    /// Hold start long enough to settle, then let go.  Returns the
    /// timestamp at which the press was accepted.
    pub fn press_start(&mut self) -> u32 {
        self.panel.start = true;
        self.step();
        let accepted = self.now;
        self.step();
        self.panel.start = false;
        self.step();
        accepted
    }

    pub fn press_switch(&mut self) {
        self.panel.switch = true;
        self.step();
        self.panel.switch = false;
        self.step();
    }

    pub fn hw(&self, station: usize) -> &MockStation {
        self.app.station(station).expect("station exists").hardware()
    }

    pub fn hw_mut(&mut self, station: usize) -> &mut MockStation {
        self.app
            .station_mut(station)
            .expect("station exists")
            .hardware_mut()
    }
}
