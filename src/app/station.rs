//! One dispensing unit: its FSM, its context and its hardware.
//!
//! A `Station` is the unit of ownership.  Each one holds its own sensor and
//! actuator handles, so stations never share peripherals and need no
//! locking.  Inactive stations are simply not ticked: their phase timers
//! and outputs stay exactly as they were until the station is reselected.

use heapless::Vec;
use log::info;

use crate::config::SystemConfig;
use crate::drivers::led_gradient::Rgb;
use crate::fsm::context::{
    ActuatorCommands, EVENT_QUEUE_LEN, StationContext, StationEvent, StationRecord,
};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::ports::{ActuatorPort, DisplayPort, SensorPort};

pub type StationEvents = Vec<StationEvent, EVENT_QUEUE_LEN>;

pub struct Station<H> {
    index: usize,
    fsm: Fsm,
    ctx: StationContext,
    hw: H,
    /// Outputs as last written to the hardware.
    applied: ActuatorCommands,
}

impl<H: SensorPort + ActuatorPort> Station<H> {
    /// Build a station with every output forced off and the FSM in Idle.
    pub fn new(index: usize, config: SystemConfig, mut hw: H) -> Self {
        hw.all_off();
        let mut ctx = StationContext::new(config);
        let mut fsm = Fsm::new(build_state_table(), StateId::Idle);
        fsm.start(&mut ctx);
        Self {
            index,
            fsm,
            ctx,
            hw,
            applied: ActuatorCommands::all_off(),
        }
    }

    /// Sample the level switches, advance the FSM and apply its outputs.
    ///
    /// `dial_target` is consulted only while idle.  Returns the
    /// transition taken, if any.
    pub fn tick(&mut self, now_ms: u32, dial_target: Option<u16>) -> Option<(StateId, StateId)> {
        let before = self.fsm.current_state();

        self.ctx.now_ms = now_ms;
        self.ctx.levels = self.hw.read_levels();
        self.ctx.dial_target = dial_target;
        self.fsm.tick(&mut self.ctx);
        self.ctx.dial_target = None;

        self.apply_outputs();

        let after = self.fsm.current_state();
        (after != before).then_some((before, after))
    }

    /// Begin a dispensing cycle.  Only accepted from Idle; returns whether
    /// the cycle was started.
    pub fn start_cycle(&mut self, now_ms: u32) -> bool {
        if !self.fsm.current_state().is_ready_to_start() {
            return false;
        }

        self.ctx.now_ms = now_ms;
        self.ctx.record.delivered_liters = 0;
        self.ctx.record.alert = false;
        self.ctx.screen.mark_dirty();

        if self.ctx.next_batch() == 0 {
            info!("station {}: nothing to deliver", self.index + 1);
            self.ctx.screen.set_status(format_args!("ready again"));
            self.fsm.force_transition(StateId::Cooldown, &mut self.ctx);
        } else {
            info!(
                "station {}: cycle started, target {} L",
                self.index + 1,
                self.ctx.record.target_liters
            );
            self.fsm.force_transition(StateId::FillingMix, &mut self.ctx);
        }

        self.apply_outputs();
        true
    }

    // ── Screen ────────────────────────────────────────────────

    pub fn needs_refresh(&self) -> bool {
        self.ctx.screen.needs_refresh()
    }

    /// Redraw the whole display from this station's cache.
    pub fn render(&mut self, display: &mut impl DisplayPort) {
        let target = self.ctx.record.target_liters;
        self.ctx.screen.render(self.index, target, display);
    }

    /// Push rows changed since the last flush.
    pub fn flush(&mut self, display: &mut impl DisplayPort) {
        let target = self.ctx.record.target_liters;
        self.ctx.screen.flush(target, display);
    }

    /// Drop pending row writes; used while the station is in the background.
    pub fn discard_pending(&mut self) {
        self.ctx.screen.discard_pending();
    }

    // ── Events ────────────────────────────────────────────────

    pub fn take_events(&mut self) -> StationEvents {
        core::mem::take(&mut self.ctx.events)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn record(&self) -> &StationRecord {
        &self.ctx.record
    }

    pub fn target_liters(&self) -> u16 {
        self.ctx.record.target_liters
    }

    pub fn delivered_liters(&self) -> u16 {
        self.ctx.record.delivered_liters
    }

    pub fn batch_liters(&self) -> u16 {
        self.ctx.record.batch_liters
    }

    /// Cached text of a display row (2 or 3).
    pub fn row(&self, row: u8) -> &str {
        self.ctx.screen.row(row)
    }

    pub fn status(&self) -> &str {
        self.ctx.screen.status()
    }

    pub fn commands(&self) -> ActuatorCommands {
        self.ctx.commands
    }

    pub fn led(&self) -> Rgb {
        self.applied.led
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    // ── Internal ──────────────────────────────────────────────

    /// Write outputs that differ from what the hardware already has.
    fn apply_outputs(&mut self) {
        let want = self.ctx.commands;
        let have = self.applied;

        if want.mix_pump != have.mix_pump {
            self.hw.set_mix_pump(want.mix_pump);
        }
        if want.valves_open != have.valves_open {
            self.hw.set_valves(want.valves_open);
        }
        if want.drone_pump != have.drone_pump {
            self.hw.set_drone_pump(want.drone_pump);
        }
        if want.led != have.led {
            self.hw.set_led(want.led);
        }

        self.applied = want;
    }
}
