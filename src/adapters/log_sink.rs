//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).  Stations are shown
//! one-based, as on the display.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match *event {
            AppEvent::Started { station } => {
                info!("START | station={}", station + 1);
            }
            AppEvent::StationSelected { station } => {
                info!("SELECT | station={}", station + 1);
            }
            AppEvent::StateChanged { station, from, to } => {
                info!("STATE | station={} | {:?} -> {:?}", station + 1, from, to);
            }
            AppEvent::CycleStarted {
                station,
                target_liters,
            } => {
                info!("CYCLE | station={} | target={}L", station + 1, target_liters);
            }
            AppEvent::BatchStarted {
                station,
                batch_liters,
            } => {
                info!("BATCH | station={} | batch={}L", station + 1, batch_liters);
            }
            AppEvent::MixTankFull { station } => {
                warn!("LEVEL | station={} | mix tank full", station + 1);
            }
            AppEvent::DroneOverflow { station } => {
                warn!("LEVEL | station={} | drone reservoir overflow", station + 1);
            }
            AppEvent::CycleComplete {
                station,
                delivered_liters,
            } => {
                info!(
                    "DONE | station={} | delivered={}L",
                    station + 1,
                    delivered_liters
                );
            }
        }
    }
}
