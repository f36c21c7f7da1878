//! Inbound commands to the application service.
//!
//! The front panel buttons resolve to these; tests and future remote
//! adapters can issue them directly through
//! [`AppService::handle_command`](super::service::AppService::handle_command).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Begin a dispensing cycle on the active station, if it is idle.
    StartCycle,

    /// Make the next station (round robin) the active one.
    SelectNext,
}
