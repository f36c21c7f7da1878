//! Front panel adapter: start button, station-switch button and the dial.
//!
//! Both buttons are active-low with pull-ups, so a LOW pin means pressed.
//! A pin that fails to read counts as released; a failed dial conversion
//! repeats the previous sample.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::{PanelPort, PanelSnapshot};
use crate::sensors::dial::RawAnalog;

pub struct FrontPanel<S, W, A> {
    start: S,
    switch: W,
    dial: A,
    last_dial_raw: u16,
}

impl<S, W, A> FrontPanel<S, W, A>
where
    S: InputPin,
    W: InputPin,
    A: RawAnalog,
{
    pub fn new(start: S, switch: W, dial: A) -> Self {
        Self {
            start,
            switch,
            dial,
            last_dial_raw: 0,
        }
    }
}

fn is_pressed(pin: &mut impl InputPin, name: &str) -> bool {
    pin.is_low().unwrap_or_else(|_| {
        warn!("{} button read failed", name);
        false
    })
}

impl<S, W, A> PanelPort for FrontPanel<S, W, A>
where
    S: InputPin,
    W: InputPin,
    A: RawAnalog,
{
    fn read(&mut self) -> PanelSnapshot {
        match self.dial.read_raw() {
            Some(raw) => self.last_dial_raw = raw,
            None => warn!("dial ADC read failed, holding {}", self.last_dial_raw),
        }
        PanelSnapshot {
            start_pressed: is_pressed(&mut self.start, "start"),
            switch_pressed: is_pressed(&mut self.switch, "switch"),
            dial_raw: self.last_dial_raw,
        }
    }
}
