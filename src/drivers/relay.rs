//! Active-low relay driver for the pumps and valves.
//!
//! The relay boards energise their coil when the input is pulled LOW, so
//! `on()` drives the pin low and `off()` drives it high.  Callers only
//! deal in on/off intent.
//!
//! ## Safety contract
//!
//! A relay is forced off at construction so a freshly booted station never
//! starts with a pump or valve energised.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;

pub struct Relay<P> {
    pin: P,
    energised: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Take ownership of `pin` and drive the relay off.
    pub fn new(pin: P) -> Result<Self, ActuatorError> {
        let mut relay = Self {
            pin,
            energised: true,
        };
        relay.off()?;
        Ok(relay)
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        if on { self.on() } else { self.off() }
    }

    pub fn on(&mut self) -> Result<(), ActuatorError> {
        self.pin
            .set_low()
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.energised = true;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.pin
            .set_high()
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.energised = false;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.energised
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

/// The two dosing valves feeding the mix tank.  They always open and close
/// together.
pub struct ValvePair<A, B> {
    a: Relay<A>,
    b: Relay<B>,
}

impl<A: OutputPin, B: OutputPin> ValvePair<A, B> {
    pub fn new(a: Relay<A>, b: Relay<B>) -> Self {
        Self { a, b }
    }

    /// Drive both valves.  Both are attempted even if the first write fails.
    pub fn set_open(&mut self, open: bool) -> Result<(), ActuatorError> {
        let first = self.a.set(open);
        let second = self.b.set(open);
        first.and(second)
    }

    pub fn is_open(&self) -> bool {
        self.a.is_on() && self.b.is_on()
    }
}
