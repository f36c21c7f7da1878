//! Actuator and display drivers, plus one-shot peripheral setup.

pub mod button;
pub mod hw_init;
pub mod lcd;
pub mod led_gradient;
pub mod relay;
pub mod status_led;
