//! Liquid-level overflow switches for the mix tank and drone reservoir.
//!
//! PNP-output float/capacitive switches drive their input HIGH when liquid
//! reaches them.  A switch only reports "full", it does not measure.

use embedded_hal::digital::InputPin;

use crate::error::SensorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tank {
    /// Intermediate mixing tank filled in the first phase.
    Mix,
    /// The drone's own reservoir.
    Drone,
}

#[derive(Debug, Clone, Copy)]
pub struct LevelReading {
    pub tank: Tank,
    pub liquid_present: bool,
}

pub struct LevelSwitch<P> {
    tank: Tank,
    pin: P,
    last: bool,
}

impl<P: InputPin> LevelSwitch<P> {
    pub fn new(tank: Tank, pin: P) -> Self {
        Self {
            tank,
            pin,
            last: false,
        }
    }

    pub fn read(&mut self) -> Result<LevelReading, SensorError> {
        self.last = self
            .pin
            .is_high()
            .map_err(|_| SensorError::GpioReadFailed)?;
        Ok(LevelReading {
            tank: self.tank,
            liquid_present: self.last,
        })
    }

    /// Most recent successful reading.
    pub fn last_reading(&self) -> bool {
        self.last
    }

    pub fn tank(&self) -> Tank {
        self.tank
    }
}
