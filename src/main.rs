//! DroneFill Firmware: Main Entry Point
//!
//! Hexagonal architecture with a fixed-period polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  StationHardware    FrontPanel   LcdDisplay   LogEventSink     │
//! │  (Sensor+Actuator)  (Panel)      (Display)    (EventSink)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Station[] · FSM · status cache · buttons              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::{
    AnyInputPin, AnyOutputPin, Input, InputPin as _, Output, OutputPin as _, PinDriver, Pull,
};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;

use dronefill::adapters::display::LcdDisplay;
use dronefill::adapters::hardware::{StationHardware, StationPins};
use dronefill::adapters::log_sink::LogEventSink;
use dronefill::adapters::panel::FrontPanel;
use dronefill::adapters::time::MonotonicClock;
use dronefill::app::service::AppService;
use dronefill::config::SystemConfig;
use dronefill::drivers::hw_init;
use dronefill::drivers::lcd::Lcd;
use dronefill::drivers::status_led::StatusLed;
use dronefill::error::{DisplayError, Error};
use dronefill::pins;

type LevelPin = PinDriver<'static, AnyInputPin, Input>;
type RelayPin = PinDriver<'static, AnyOutputPin, Output>;

/// Bring the LCD up and show the boot banner.
fn lcd_boot<I, D>(lcd: &mut Lcd<I, D>) -> Result<(), DisplayError>
where
    I: embedded_hal::i2c::I2c,
    D: embedded_hal::delay::DelayNs,
{
    lcd.init()?;
    lcd.set_backlight(true)?;
    lcd.set_cursor(0, 0)?;
    lcd.print("system on")
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  DroneFill v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config.validate()?;

    let p = Peripherals::take()?;

    // ── 2. Display ────────────────────────────────────────────
    let i2c = I2cDriver::new(
        p.i2c0,
        p.pins.gpio21,
        p.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUD_HZ)),
    )?;
    let mut lcd = Lcd::new(i2c, Ets, pins::LCD_I2C_ADDR, pins::LCD_COLS, pins::LCD_ROWS);
    if let Err(e) = lcd_boot(&mut lcd) {
        warn!("LCD init failed: {}, continuing without display", e);
    }
    FreeRtos::delay_ms(500);
    let mut display = LcdDisplay::new(lcd);

    // ── 3. Front panel ────────────────────────────────────────
    hw_init::init_dial_adc(pins::DIAL_ADC_CHANNEL)?;

    let mut start = PinDriver::input(p.pins.gpio19)?;
    start.set_pull(Pull::Up)?;
    let mut switch = PinDriver::input(p.pins.gpio18)?;
    switch.set_pull(Pull::Up)?;
    let mut panel = FrontPanel::new(start, switch, || {
        hw_init::adc1_read(pins::DIAL_ADC_CHANNEL)
    });

    // ── 4. Station 1 ──────────────────────────────────────────
    let timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(config.led_pwm_freq_hz))
            .resolution(Resolution::Bits8),
    )?;
    let led = StatusLed::new(
        LedcDriver::new(p.ledc.channel0, &timer, p.pins.gpio15)?,
        LedcDriver::new(p.ledc.channel1, &timer, p.pins.gpio2)?,
        LedcDriver::new(p.ledc.channel2, &timer, p.pins.gpio4)?,
        config.common_anode,
    )
    .map_err(Error::from)?;

    // GPIO numbers as listed under "Station 1" in `pins`.
    let station1_pins: StationPins<LevelPin, RelayPin> = StationPins {
        mix_level: PinDriver::input(p.pins.gpio34.downgrade_input())?,
        drone_level: PinDriver::input(p.pins.gpio32.downgrade_input())?,
        mix_pump: PinDriver::output(p.pins.gpio25.downgrade_output())?,
        drone_pump: PinDriver::output(p.pins.gpio26.downgrade_output())?,
        valve_a: PinDriver::output(p.pins.gpio27.downgrade_output())?,
        valve_b: PinDriver::output(p.pins.gpio14.downgrade_output())?,
    };
    let station1 = StationHardware::new(station1_pins, led)?;

    // ── 5. Application service ────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut app = AppService::new(config.clone(), [station1])?;
    app.start(&mut display, &mut sink);

    let clock = MonotonicClock::new();
    info!(
        "System ready. Polling every {} ms.",
        config.tick_interval_ms
    );

    // ── 6. Polling loop ───────────────────────────────────────
    loop {
        app.tick(clock.uptime_ms(), &mut panel, &mut display, &mut sink);
        FreeRtos::delay_ms(config.tick_interval_ms);
    }
}
