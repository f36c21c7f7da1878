//! Shared mutable context threaded through every FSM handler.
//!
//! `StationContext` is the blackboard for one station: the inputs sampled
//! for this tick, the actuator commands the handlers want applied, the
//! station's batch record and its screen cache.  The service fills in the
//! inputs before ticking and applies the commands afterwards.

use heapless::Vec;
use log::warn;

use crate::config::SystemConfig;
use crate::display::StatusCache;
use crate::drivers::led_gradient::{COLOUR_OFF, Rgb, colour_from_progress};

/// Both overflow switches of a station, sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelSnapshot {
    /// Mixing tank has reached its overflow switch.
    pub mix_full: bool,
    /// Drone reservoir has reached its overflow switch.
    pub drone_full: bool,
}

/// Boolean intent for every output of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommands {
    pub mix_pump: bool,
    pub drone_pump: bool,
    pub valves_open: bool,
    pub led: Rgb,
}

impl Default for ActuatorCommands {
    fn default() -> Self {
        Self {
            mix_pump: false,
            drone_pump: false,
            valves_open: false,
            led: COLOUR_OFF,
        }
    }
}

impl ActuatorCommands {
    pub fn all_off() -> Self {
        Self::default()
    }
}

/// Batch accounting and phase timing for one station.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StationRecord {
    /// Liters requested for the cycle (0 until the dial is first read).
    pub target_liters: u16,
    /// Liters pushed into the drone so far this cycle.
    pub delivered_liters: u16,
    /// Size of the batch currently in flight.
    pub batch_liters: u16,
    pub phase_started_ms: u32,
    pub phase_duration_ms: u32,
    pub wait_started_ms: u32,
    /// Remaining-liters figure currently shown on the status row.
    pub shown_remaining: Option<u16>,
    /// Last progress fraction applied to the indicator.
    pub progress: f32,
    /// Set when the cycle ended on a drone overflow.
    pub alert: bool,
}

/// Notable things that happened during a tick, drained by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationEvent {
    BatchStarted { batch_liters: u16 },
    MixTankFull,
    DroneOverflow,
    CycleComplete { delivered_liters: u16 },
}

pub const EVENT_QUEUE_LEN: usize = 8;

pub struct StationContext {
    // -- Inputs --
    /// Wrapping millisecond clock for this tick.
    pub now_ms: u32,
    pub levels: LevelSnapshot,
    /// Target liters read from the dial, when the dial was sampled.
    pub dial_target: Option<u16>,

    // -- Outputs --
    pub commands: ActuatorCommands,
    pub events: Vec<StationEvent, EVENT_QUEUE_LEN>,

    // -- State --
    pub record: StationRecord,
    pub screen: StatusCache,
    pub config: SystemConfig,
}

impl StationContext {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            now_ms: 0,
            levels: LevelSnapshot::default(),
            dial_target: None,
            commands: ActuatorCommands::all_off(),
            events: Vec::new(),
            record: StationRecord::default(),
            screen: StatusCache::new(),
            config,
        }
    }

    /// Start timing a phase of `duration_ms` from now.
    pub fn begin_phase(&mut self, duration_ms: u32) {
        self.record.phase_started_ms = self.now_ms;
        self.record.phase_duration_ms = duration_ms;
    }

    /// Milliseconds since the current phase began, wraparound-safe.
    pub fn elapsed_in_phase(&self) -> u32 {
        self.now_ms.wrapping_sub(self.record.phase_started_ms)
    }

    pub fn phase_deadline_reached(&self) -> bool {
        self.elapsed_in_phase() >= self.record.phase_duration_ms
    }

    /// Whole liters still to go in the current phase, by elapsed time.
    pub fn remaining_liters(&self) -> u16 {
        let remaining_ms = self
            .record
            .phase_duration_ms
            .saturating_sub(self.elapsed_in_phase());
        let per_liter = self.config.ms_per_liter.max(1);
        u16::try_from(remaining_ms / per_liter).unwrap_or(u16::MAX)
    }

    /// Size of the next batch: limited by tank capacity and what is left.
    pub fn next_batch(&self) -> u16 {
        let left = self
            .record
            .target_liters
            .saturating_sub(self.record.delivered_liters);
        left.min(self.config.tank_capacity_liters)
    }

    /// Indicator colour for `delivered_liters` out of the target.  Skipped
    /// while no target is set.
    pub fn show_progress(&mut self, delivered_liters: u16) {
        if self.record.target_liters == 0 {
            return;
        }
        let p = (f32::from(delivered_liters) / f32::from(self.record.target_liters)).clamp(0.0, 1.0);
        self.record.progress = p;
        self.commands.led = colour_from_progress(p);
    }

    pub fn push_event(&mut self, event: StationEvent) {
        if self.events.push(event).is_err() {
            warn!("station event queue full, dropping {:?}", event);
        }
    }
}
