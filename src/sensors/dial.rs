//! Target-volume potentiometer.
//!
//! The dial's wiper is sampled by a 12-bit ADC.  The raw reading is mapped
//! linearly onto the selectable volume range with integer arithmetic, so a
//! given wiper position always yields the same target.

use crate::config::SystemConfig;

/// Source of raw analog samples.  `None` means the conversion failed.
pub trait RawAnalog {
    fn read_raw(&mut self) -> Option<u16>;
}

impl<F: FnMut() -> Option<u16>> RawAnalog for F {
    fn read_raw(&mut self) -> Option<u16> {
        self()
    }
}

/// Linear integer map of `x` from `[in_min, in_max]` onto
/// `[out_min, out_max]`.  `x` is clamped to the input range first.
pub fn map_range(x: u32, in_min: u32, in_max: u32, out_min: u32, out_max: u32) -> u32 {
    if in_max <= in_min {
        return out_min;
    }
    let x = x.clamp(in_min, in_max);
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Target liters for a raw dial sample under `config`.
pub fn target_from_raw(raw: u16, config: &SystemConfig) -> u16 {
    map_range(
        u32::from(raw),
        0,
        u32::from(config.dial_raw_max),
        u32::from(config.target_min_liters),
        u32::from(config.target_max_liters),
    ) as u16
}
