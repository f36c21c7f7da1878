//! Application core: pure domain logic, zero I/O.
//!
//! This module holds the refill station's business rules: per-station
//! dispensing, station switching and front panel handling.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod station;
