//! GPIO / peripheral pin assignments for the refill stand controller board.
//!
//! Wiring reference for the board.  Bus settings and the ADC channel are
//! read from here directly; `esp-idf-hal` pins are distinct types, so
//! `main` names each `p.pins.gpioN` by hand and must match the numbers
//! below.  Target is the classic ESP32 (ADC1 on GPIO32–39).

// ---------------------------------------------------------------------------
// Front panel
// ---------------------------------------------------------------------------

/// Target-volume potentiometer wiper.  GPIO33 = ADC1 channel 5.
pub const DIAL_GPIO: i32 = 33;
/// ADC1 channel the dial is sampled on.
pub const DIAL_ADC_CHANNEL: u32 = 5;
/// Start button, active-low with internal pull-up.
pub const START_BUTTON_GPIO: i32 = 19;
/// Station-switch button, active-low with internal pull-up.
pub const SWITCH_BUTTON_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// I²C character LCD (PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// 7-bit address of the PCF8574 expander.
pub const LCD_I2C_ADDR: u8 = 0x27;
pub const LCD_COLS: u8 = 20;
pub const LCD_ROWS: u8 = 4;
/// Bus clock for the backpack (standard mode).
pub const I2C_BAUD_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// Station 1
// ---------------------------------------------------------------------------

/// Drone reservoir overflow switch.  HIGH = liquid present.
pub const STATION1_DRONE_LEVEL_GPIO: i32 = 32;
/// Relay for the transfer pump (mix tank → drone).  Active-low.
pub const STATION1_DRONE_PUMP_GPIO: i32 = 26;
/// Mix tank overflow switch (input-only pin, external pull).  HIGH = liquid.
pub const STATION1_MIX_LEVEL_GPIO: i32 = 34;
/// Relay for the fill pump (supply → mix tank).  Active-low.
pub const STATION1_MIX_PUMP_GPIO: i32 = 25;
/// Relay for valve A (95 % concentrate line).  Active-low.
pub const STATION1_VALVE_A_GPIO: i32 = 27;
/// Relay for valve B (5 % additive line).  Active-low.
pub const STATION1_VALVE_B_GPIO: i32 = 14;

pub const STATION1_LED_R_GPIO: i32 = 15;
pub const STATION1_LED_G_GPIO: i32 = 2;
pub const STATION1_LED_B_GPIO: i32 = 4;
