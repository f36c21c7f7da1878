//! Sensor subsystem: level switches and the target dial.
//!
//! Each station owns its two [`level::LevelSwitch`]es through its hardware
//! adapter; the dial is shared and read by the front-panel adapter.

pub mod dial;
pub mod level;
