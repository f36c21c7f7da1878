//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                    │
//! │  ┌──────────────┬───────────┬──────────┬───────────────────┐   │
//! │  │ StateId      │ on_enter  │ on_exit  │ on_update         │   │
//! │  ├──────────────┼───────────┼──────────┼───────────────────┤   │
//! │  │ Idle         │ fn(ctx)   │ -        │ fn(ctx)->Option<> │   │
//! │  │ FillingMix   │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │   │
//! │  │ PumpingDrone │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │   │
//! │  │ Cooldown     │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │   │
//! │  └──────────────┴───────────┴──────────┴───────────────────┘   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the
//! current pointer.  All functions receive `&mut StationContext`, the
//! station's inputs, commands, batch record and screen cache.

pub mod context;
pub mod states;

use context::StationContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Dispensing phase of a station.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// Ready to start; the target follows the dial.
    Idle = 0,
    /// Mix pump and valves on, filling the intermediate tank.
    FillingMix = 1,
    /// Transfer pump on, emptying the mix tank into the drone.
    PumpingDrone = 2,
    /// Settling pause after a finished cycle.
    Cooldown = 3,
}

impl StateId {
    /// Total number of states: used to size the table array.
    pub const COUNT: usize = 4;

    pub fn is_filling_mix(self) -> bool {
        self == Self::FillingMix
    }

    pub fn is_pump_running(self) -> bool {
        self == Self::PumpingDrone
    }

    pub fn is_waiting_before_reset(self) -> bool {
        self == Self::Cooldown
    }

    /// True only when no phase is in progress.
    pub fn is_ready_to_start(self) -> bool {
        self == Self::Idle
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn = fn(&mut StationContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut StationContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine for one station.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut StationContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    pub fn tick(&mut self, ctx: &mut StationContext) {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition from outside the update handlers
    /// (operator start).  A no-op when already in `next`.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut StationContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        self.table[self.current].id
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut StationContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
