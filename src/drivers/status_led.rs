//! RGB station indicator driver.
//!
//! Three PWM channels drive the R/G/B legs of a discrete RGB LED.  Values
//! are 0–255 per channel.  Common-anode parts light when their cathode is
//! pulled low, so for those the driver writes `255 - value`; the polarity
//! is chosen once at construction.

use embedded_hal::pwm::SetDutyCycle;

use crate::drivers::led_gradient::{COLOUR_OFF, Rgb};
use crate::error::ActuatorError;

pub struct StatusLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    common_anode: bool,
    current: Rgb,
}

impl<R, G, B> StatusLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Take the three channels and switch the LED off.
    pub fn new(red: R, green: G, blue: B, common_anode: bool) -> Result<Self, ActuatorError> {
        let mut led = Self {
            red,
            green,
            blue,
            common_anode,
            current: COLOUR_OFF,
        };
        led.off()?;
        Ok(led)
    }

    pub fn set_colour(&mut self, colour: Rgb) -> Result<(), ActuatorError> {
        let (r, g, b) = (self.level(colour.0), self.level(colour.1), self.level(colour.2));
        self.red
            .set_duty_cycle_fraction(r, 255)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.green
            .set_duty_cycle_fraction(g, 255)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.blue
            .set_duty_cycle_fraction(b, 255)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.current = colour;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.set_colour(COLOUR_OFF)
    }

    /// Last colour written, in logical (non-inverted) terms.
    pub fn current_colour(&self) -> Rgb {
        self.current
    }

    fn level(&self, v: u8) -> u16 {
        if self.common_anode {
            u16::from(255 - v)
        } else {
            u16::from(v)
        }
    }
}
