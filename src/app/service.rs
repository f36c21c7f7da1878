//! Application service: the hexagonal core.
//!
//! [`AppService`] owns every [`Station`], the active-station cursor and the
//! front panel debouncers.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!   PanelPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//! DisplayPort ◀── │  stations[] · cursor    │
//!                 │  start/switch buttons   │
//!                 └──────────┬──────────────┘
//!                            ▼
//!              Station<H: SensorPort + ActuatorPort>
//! ```
//!
//! Only the active station is ticked.  The others keep their phase, timers
//! and outputs untouched until the operator switches back to them.

use heapless::Vec;
use log::{debug, info};

use crate::config::{MAX_STATIONS, SystemConfig};
use crate::drivers::button::{EdgeButton, StartButton};
use crate::error::Error;
use crate::fsm::context::StationEvent;
use crate::sensors::dial::target_from_raw;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, DisplayPort, EventSink, PanelPort, SensorPort};
use super::station::Station;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService<H> {
    config: SystemConfig,
    stations: Vec<Station<H>, MAX_STATIONS>,
    /// Index of the station shown on the display and driven by the panel.
    active: usize,
    start_button: StartButton,
    switch_button: EdgeButton,
}

impl<H: SensorPort + ActuatorPort> AppService<H> {
    /// Build the service from a validated configuration and one hardware
    /// adapter per station.  Every output is forced off.
    ///
    /// The number of adapters must equal `config.station_count`.
    pub fn new(config: SystemConfig, hardware: impl IntoIterator<Item = H>) -> Result<Self, Error> {
        config.validate()?;

        let mut stations = Vec::new();
        for (index, hw) in hardware.into_iter().enumerate() {
            if stations
                .push(Station::new(index, config.clone(), hw))
                .is_err()
            {
                return Err(Error::Config("more station hardware than MAX_STATIONS"));
            }
        }
        if stations.len() != usize::from(config.station_count) {
            return Err(Error::Config(
                "station hardware count does not match station_count",
            ));
        }

        Ok(Self {
            start_button: StartButton::new(config.start_settle_ms),
            switch_button: EdgeButton::new(config.switch_debounce_ms),
            config,
            stations,
            active: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Draw the initial screen for the first station.
    pub fn start(&mut self, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        self.stations[self.active].render(display);
        sink.emit(&AppEvent::Started {
            station: self.active,
        });
        info!(
            "AppService started with {} station(s), station {} active",
            self.stations.len(),
            self.active + 1
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one pass of the control loop:
    /// switch button → forced redraw → active station (dial, phases) →
    /// start button → display flush → events.
    pub fn tick(
        &mut self,
        now_ms: u32,
        panel: &mut impl PanelPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        let input = panel.read();

        // 1. Station switch (press edge only)
        if self
            .switch_button
            .tick(input.switch_pressed, now_ms)
            .is_some()
        {
            self.select_next(display, sink);
        }

        // 2. Redraw if the active station asked for it
        let idx = self.active;
        let config = &self.config;
        let station = &mut self.stations[idx];
        if station.needs_refresh() {
            station.render(display);
        }

        // 3. Dial → target (idle only), then advance the phase
        let dial_target = station
            .state()
            .is_ready_to_start()
            .then(|| target_from_raw(input.dial_raw, config));
        if let Some((from, to)) = station.tick(now_ms, dial_target) {
            sink.emit(&AppEvent::StateChanged {
                station: idx,
                from,
                to,
            });
        }

        // 4. Start button
        if self
            .start_button
            .tick(input.start_pressed, now_ms)
            .is_some()
        {
            self.start_active(now_ms, sink);
        }

        // 5. Push status rows written this tick, forward station events
        self.stations[idx].flush(display);
        self.forward_events(idx, sink);
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u32,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::StartCycle => {
                self.start_active(now_ms, sink);
                let idx = self.active;
                self.stations[idx].flush(display);
                self.forward_events(idx, sink);
            }
            AppCommand::SelectNext => self.select_next(display, sink),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_station(&self) -> &Station<H> {
        &self.stations[self.active]
    }

    pub fn station(&self, index: usize) -> Option<&Station<H>> {
        self.stations.get(index)
    }

    pub fn station_mut(&mut self, index: usize) -> Option<&mut Station<H>> {
        self.stations.get_mut(index)
    }

    pub fn stations(&self) -> &[Station<H>] {
        &self.stations
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn select_next(&mut self, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        self.stations[self.active].discard_pending();
        self.active = (self.active + 1) % self.stations.len();

        let station = &mut self.stations[self.active];
        station.render(display);
        info!(
            "station {} selected ({:?})",
            self.active + 1,
            station.state()
        );
        sink.emit(&AppEvent::StationSelected {
            station: self.active,
        });
    }

    fn start_active(&mut self, now_ms: u32, sink: &mut impl EventSink) {
        let idx = self.active;
        let station = &mut self.stations[idx];
        let before = station.state();

        if !station.start_cycle(now_ms) {
            debug!("start ignored: station {} is {:?}", idx + 1, before);
            return;
        }

        sink.emit(&AppEvent::CycleStarted {
            station: idx,
            target_liters: station.target_liters(),
        });
        sink.emit(&AppEvent::StateChanged {
            station: idx,
            from: before,
            to: station.state(),
        });
    }

    fn forward_events(&mut self, idx: usize, sink: &mut impl EventSink) {
        for event in self.stations[idx].take_events() {
            let event = match event {
                StationEvent::BatchStarted { batch_liters } => AppEvent::BatchStarted {
                    station: idx,
                    batch_liters,
                },
                StationEvent::MixTankFull => AppEvent::MixTankFull { station: idx },
                StationEvent::DroneOverflow => AppEvent::DroneOverflow { station: idx },
                StationEvent::CycleComplete { delivered_liters } => AppEvent::CycleComplete {
                    station: idx,
                    delivered_liters,
                },
            };
            sink.emit(&event);
        }
    }
}
