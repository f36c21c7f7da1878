//! System configuration parameters
//!
//! All tunable parameters for the refill stand.  Values are fixed at build
//! time through [`SystemConfig::default`]; there is no runtime
//! reconfiguration.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Upper bound on the number of stations one controller can switch between.
pub const MAX_STATIONS: usize = 4;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Batching ---
    /// Mix tank volume; the largest batch a single fill can move (liters).
    pub tank_capacity_liters: u16,
    /// Calibrated pump run time per liter (milliseconds).
    pub ms_per_liter: u32,

    // --- Target dial ---
    /// Smallest selectable target volume (liters).
    pub target_min_liters: u16,
    /// Largest selectable target volume (liters).
    pub target_max_liters: u16,
    /// Full-scale raw ADC reading of the dial.
    pub dial_raw_max: u16,

    // --- Timing ---
    /// Dwell after a cycle before a new one may start (milliseconds).
    pub cooldown_ms: u32,
    /// Polling loop period (milliseconds).
    pub tick_interval_ms: u32,
    /// Start button must stay asserted this long to count (milliseconds).
    pub start_settle_ms: u32,
    /// Minimum gap between accepted station-switch presses (milliseconds).
    pub switch_debounce_ms: u32,

    // --- Stations / indicator ---
    /// Number of stations wired to this controller.
    pub station_count: u8,
    /// Common-anode RGB wiring: PWM values are inverted (255 - v).
    pub common_anode: bool,
    /// LEDC frequency for the RGB indicator (Hz).
    pub led_pwm_freq_hz: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Batching
            tank_capacity_liters: 20,
            ms_per_liter: 300,

            // Target dial
            target_min_liters: 1,
            target_max_liters: 100,
            dial_raw_max: 4095, // 12-bit ADC

            // Timing
            cooldown_ms: 1000,
            tick_interval_ms: 50,
            start_settle_ms: 50,
            switch_debounce_ms: 50,

            // Stations / indicator
            station_count: 1,
            common_anode: false,
            led_pwm_freq_hz: 5_000,
        }
    }
}

impl SystemConfig {
    /// Reject parameter sets the dispensing logic cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.tank_capacity_liters == 0 {
            return Err(Error::Config("tank capacity must be non-zero"));
        }
        if self.ms_per_liter == 0 {
            return Err(Error::Config("ms_per_liter must be non-zero"));
        }
        if self.target_min_liters == 0 || self.target_min_liters > self.target_max_liters {
            return Err(Error::Config("target range must satisfy 1 <= min <= max"));
        }
        if self.dial_raw_max == 0 {
            return Err(Error::Config("dial raw range must be non-zero"));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick interval must be non-zero"));
        }
        if self.station_count == 0 || self.station_count as usize > MAX_STATIONS {
            return Err(Error::Config("station count out of range"));
        }
        Ok(())
    }

    /// Pump run time for `liters` at the calibrated rate.
    pub fn duration_for(&self, liters: u16) -> u32 {
        u32::from(liters).saturating_mul(self.ms_per_liter)
    }
}
