//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  IDLE ──[start]──▶ FILLING_MIX ──[deadline | mix full]──▶ PUMPING_DRONE
//!    ▲                    ▲                                     │
//!    │                    └───────────[more to deliver]─────────┤
//!    │                                                          │
//!    └──[1 s]── COOLDOWN ◀──[target reached | drone overflow]───┘
//! ```
//!
//! Volumes are estimated from elapsed pump time at a fixed rate
//! (`ms_per_liter`); the overflow switches cut a phase short.

use super::StateDescriptor;
use super::StateId;
use super::context::{ActuatorCommands, StationContext, StationEvent};
use crate::drivers::led_gradient::{COLOUR_ALERT, COLOUR_OFF};
use log::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once per station at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1: FillingMix
        StateDescriptor {
            id: StateId::FillingMix,
            name: "FillingMix",
            on_enter: Some(fill_enter),
            on_exit: Some(fill_exit),
            on_update: fill_update,
        },
        // Index 2: PumpingDrone
        StateDescriptor {
            id: StateId::PumpingDrone,
            name: "PumpingDrone",
            on_enter: Some(pump_enter),
            on_exit: Some(pump_exit),
            on_update: pump_update,
        },
        // Index 3: Cooldown
        StateDescriptor {
            id: StateId::Cooldown,
            name: "Cooldown",
            on_enter: Some(cooldown_enter),
            on_exit: Some(cooldown_exit),
            on_update: cooldown_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state: waiting for the operator
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut StationContext) {
    ctx.commands = ActuatorCommands::all_off();
    info!("IDLE: target {} L, ready to start", ctx.record.target_liters);
}

fn idle_update(ctx: &mut StationContext) -> Option<StateId> {
    if let Some(target) = ctx.dial_target {
        if target != ctx.record.target_liters {
            debug!("IDLE: target {} -> {} L", ctx.record.target_liters, target);
            ctx.record.target_liters = target;
            // Last cycle's total never reads above a lowered target.
            ctx.record.delivered_liters = ctx.record.delivered_liters.min(target);
        }
        ctx.screen.request_target(target);
    }
    // Leaving Idle is the operator's call; see `Station::start_cycle`.
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  FILLING_MIX state: mix pump and valves on
// ═══════════════════════════════════════════════════════════════════════════

fn fill_enter(ctx: &mut StationContext) {
    let batch = ctx.next_batch();
    ctx.record.batch_liters = batch;
    ctx.begin_phase(ctx.config.duration_for(batch));
    ctx.record.shown_remaining = Some(batch);

    ctx.commands.valves_open = true;
    ctx.commands.mix_pump = true;
    ctx.commands.drone_pump = false;

    ctx.screen.set_status(format_args!("mix <- {batch}"));
    ctx.show_progress(ctx.record.delivered_liters);
    ctx.push_event(StationEvent::BatchStarted {
        batch_liters: batch,
    });

    info!(
        "FILLING_MIX: batch {} L ({} ms), delivered {}/{} L",
        batch,
        ctx.record.phase_duration_ms,
        ctx.record.delivered_liters,
        ctx.record.target_liters
    );
}

fn fill_exit(ctx: &mut StationContext) {
    ctx.commands.mix_pump = false;
    ctx.commands.valves_open = false;
}

fn fill_update(ctx: &mut StationContext) -> Option<StateId> {
    refresh_remaining(ctx, "mix <- ");

    if ctx.levels.mix_full {
        ctx.record.batch_liters = ctx.config.tank_capacity_liters;
        ctx.push_event(StationEvent::MixTankFull);
        warn!(
            "FILLING_MIX: mix tank full after {} ms, batch set to {} L",
            ctx.elapsed_in_phase(),
            ctx.record.batch_liters
        );
        return Some(StateId::PumpingDrone);
    }

    if ctx.phase_deadline_reached() {
        return Some(StateId::PumpingDrone);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  PUMPING_DRONE state: transfer pump on
// ═══════════════════════════════════════════════════════════════════════════

fn pump_enter(ctx: &mut StationContext) {
    let batch = ctx.record.batch_liters;
    ctx.begin_phase(ctx.config.duration_for(batch));
    ctx.record.shown_remaining = Some(batch);

    ctx.commands.drone_pump = true;

    ctx.screen.set_status(format_args!("pump on <- {batch}"));
    ctx.show_progress(ctx.record.delivered_liters);

    info!(
        "PUMPING_DRONE: {} L into drone ({} ms)",
        batch, ctx.record.phase_duration_ms
    );
}

fn pump_exit(ctx: &mut StationContext) {
    ctx.commands.drone_pump = false;
}

fn pump_update(ctx: &mut StationContext) -> Option<StateId> {
    let remaining = refresh_remaining(ctx, "pump on <- ");
    let pumped = ctx.record.batch_liters.saturating_sub(remaining);
    ctx.show_progress(ctx.record.delivered_liters.saturating_add(pumped));

    if ctx.levels.drone_full {
        ctx.record.delivered_liters = ctx.record.target_liters;
        ctx.record.alert = true;
        ctx.commands.led = COLOUR_ALERT;
        ctx.screen.set_status(format_args!("filled in "));
        ctx.push_event(StationEvent::DroneOverflow);
        warn!(
            "PUMPING_DRONE: drone reservoir full, cycle closed at {} L",
            ctx.record.target_liters
        );
        return Some(StateId::Cooldown);
    }

    if !ctx.phase_deadline_reached() {
        return None;
    }

    let delivered = ctx
        .record
        .delivered_liters
        .saturating_add(ctx.record.batch_liters);
    if delivered >= ctx.record.target_liters {
        ctx.record.delivered_liters = ctx.record.target_liters;
        ctx.commands.led = COLOUR_OFF;
        ctx.screen.set_status(format_args!("pump off "));
        ctx.push_event(StationEvent::CycleComplete {
            delivered_liters: ctx.record.delivered_liters,
        });
        info!(
            "PUMPING_DRONE: cycle complete, {} L delivered",
            ctx.record.delivered_liters
        );
        Some(StateId::Cooldown)
    } else {
        ctx.record.delivered_liters = delivered;
        Some(StateId::FillingMix)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  COOLDOWN state: settling pause before the next cycle is allowed
// ═══════════════════════════════════════════════════════════════════════════

fn cooldown_enter(ctx: &mut StationContext) {
    ctx.record.wait_started_ms = ctx.now_ms;
    ctx.commands.mix_pump = false;
    ctx.commands.drone_pump = false;
    ctx.commands.valves_open = false;
    info!("COOLDOWN: {} ms pause", ctx.config.cooldown_ms);
}

fn cooldown_exit(ctx: &mut StationContext) {
    ctx.commands = ActuatorCommands::all_off();
    ctx.record.alert = false;
    ctx.record.shown_remaining = None;
    ctx.screen.set_status(format_args!("ready again"));
    ctx.screen.mark_dirty();
}

fn cooldown_update(ctx: &mut StationContext) -> Option<StateId> {
    let waited = ctx.now_ms.wrapping_sub(ctx.record.wait_started_ms);
    if waited >= ctx.config.cooldown_ms {
        return Some(StateId::Idle);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Recompute the remaining-liters countdown and rewrite the status row
/// only when the figure changed.
fn refresh_remaining(ctx: &mut StationContext, prefix: &str) -> u16 {
    let remaining = ctx.remaining_liters();
    if ctx.record.shown_remaining != Some(remaining) {
        ctx.record.shown_remaining = Some(remaining);
        ctx.screen.set_status(format_args!("{prefix}{remaining}"));
    }
    remaining
}
