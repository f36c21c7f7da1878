//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Station indices are
//! zero-based; the display shows them one-based.

use crate::fsm::StateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has drawn its first screen.  Carries the active station.
    Started { station: usize },

    /// The operator switched the active station.
    StationSelected { station: usize },

    /// A station's FSM moved between phases.
    StateChanged {
        station: usize,
        from: StateId,
        to: StateId,
    },

    /// A start press was accepted.
    CycleStarted { station: usize, target_liters: u16 },

    /// A new mix batch began.
    BatchStarted { station: usize, batch_liters: u16 },

    /// The mix tank overflow switch ended a fill early.
    MixTankFull { station: usize },

    /// The drone reservoir overflow switch ended the cycle.
    DroneOverflow { station: usize },

    /// Every batch of the cycle was delivered.
    CycleComplete {
        station: usize,
        delivered_liters: u16,
    },
}
