//! Hardware adapter: bridges one station's peripherals to the domain ports.
//!
//! Owns the station's level switches, relays and indicator, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  Driver errors stop here:
//! each is logged with `warn!` and the control loop carries on with the
//! last known state.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::led_gradient::Rgb;
use crate::drivers::relay::{Relay, ValvePair};
use crate::drivers::status_led::StatusLed;
use crate::error::Error;
use crate::fsm::context::LevelSnapshot;
use crate::sensors::level::{LevelSwitch, Tank};

/// Raw pin handles for one station, as handed over by `main`.
pub struct StationPins<I, O> {
    pub mix_level: I,
    pub drone_level: I,
    pub mix_pump: O,
    pub drone_pump: O,
    pub valve_a: O,
    pub valve_b: O,
}

/// Concrete adapter that combines one station's hardware behind port traits.
pub struct StationHardware<I, O, P> {
    mix_level: LevelSwitch<I>,
    drone_level: LevelSwitch<I>,
    mix_pump: Relay<O>,
    drone_pump: Relay<O>,
    valves: ValvePair<O, O>,
    led: StatusLed<P, P, P>,
}

impl<I, O, P> StationHardware<I, O, P>
where
    I: InputPin,
    O: OutputPin,
    P: SetDutyCycle,
{
    /// Wrap the pins.  Every relay is driven to OFF here.
    pub fn new(pins: StationPins<I, O>, led: StatusLed<P, P, P>) -> Result<Self, Error> {
        Ok(Self {
            mix_level: LevelSwitch::new(Tank::Mix, pins.mix_level),
            drone_level: LevelSwitch::new(Tank::Drone, pins.drone_level),
            mix_pump: Relay::new(pins.mix_pump)?,
            drone_pump: Relay::new(pins.drone_pump)?,
            valves: ValvePair::new(Relay::new(pins.valve_a)?, Relay::new(pins.valve_b)?),
            led,
        })
    }

    pub fn mix_pump_on(&self) -> bool {
        self.mix_pump.is_on()
    }

    pub fn drone_pump_on(&self) -> bool {
        self.drone_pump.is_on()
    }

    pub fn valves_open(&self) -> bool {
        self.valves.is_open()
    }

    pub fn led_colour(&self) -> Rgb {
        self.led.current_colour()
    }

    fn sample(switch: &mut LevelSwitch<I>) -> bool {
        match switch.read() {
            Ok(reading) => reading.liquid_present,
            Err(e) => {
                warn!("{:?} level switch: {}, keeping last reading", switch.tank(), e);
                switch.last_reading()
            }
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I, O, P> SensorPort for StationHardware<I, O, P>
where
    I: InputPin,
    O: OutputPin,
    P: SetDutyCycle,
{
    fn read_levels(&mut self) -> LevelSnapshot {
        LevelSnapshot {
            mix_full: Self::sample(&mut self.mix_level),
            drone_full: Self::sample(&mut self.drone_level),
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I, O, P> ActuatorPort for StationHardware<I, O, P>
where
    I: InputPin,
    O: OutputPin,
    P: SetDutyCycle,
{
    fn set_mix_pump(&mut self, on: bool) {
        if let Err(e) = self.mix_pump.set(on) {
            warn!("mix pump relay: {}", e);
        }
    }

    fn set_drone_pump(&mut self, on: bool) {
        if let Err(e) = self.drone_pump.set(on) {
            warn!("drone pump relay: {}", e);
        }
    }

    fn set_valves(&mut self, open: bool) {
        if let Err(e) = self.valves.set_open(open) {
            warn!("valve relays: {}", e);
        }
    }

    fn set_led(&mut self, colour: Rgb) {
        if let Err(e) = self.led.set_colour(colour) {
            warn!("status LED: {}", e);
        }
    }
}
