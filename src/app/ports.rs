//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (station hardware, front panel, display, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Port methods do not return errors: adapters log and absorb
//! peripheral failures so the control loop keeps running.

use crate::drivers::led_gradient::{COLOUR_OFF, Rgb};
use crate::fsm::context::LevelSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for one station's overflow switches.
pub trait SensorPort {
    fn read_levels(&mut self) -> LevelSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for one station's outputs.  Arguments are intent
/// (`true` = running / open); relay polarity is the adapter's concern.
pub trait ActuatorPort {
    fn set_mix_pump(&mut self, on: bool);

    fn set_drone_pump(&mut self, on: bool);

    /// Both mix-line valves move together.
    fn set_valves(&mut self, open: bool);

    fn set_led(&mut self, colour: Rgb);

    /// Pumps off, valves closed, LED dark.
    fn all_off(&mut self) {
        self.set_mix_pump(false);
        self.set_drone_pump(false);
        self.set_valves(false);
        self.set_led(COLOUR_OFF);
    }
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character display)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Overwrite `row` from `col` to the end of the line with `text`.
    fn write_line(&mut self, col: u8, row: u8, text: &str);

    fn clear(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Front panel port (driven adapter: operator controls → domain)
// ───────────────────────────────────────────────────────────────

/// One sample of the shared operator controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelSnapshot {
    /// Start button is held down.
    pub start_pressed: bool,
    /// Station-switch button is held down.
    pub switch_pressed: bool,
    /// Raw dial ADC reading, 0 to `dial_raw_max`.
    pub dial_raw: u16,
}

pub trait PanelPort {
    fn read(&mut self) -> PanelSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
