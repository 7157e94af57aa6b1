//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It holds the latest reading, the queue of output actions the
//! controller must carry out after the tick, the recovery flash counter,
//! and the configuration.

use heapless::Vec;
use log::warn;

use crate::classify::{Moisture, Reading};
use crate::config::ControlConfig;

/// Upper bound on actions queued by a single tick.  A fault flash is the
/// longest sequence (six actions).
pub const MAX_ACTIONS: usize = 8;

// ---------------------------------------------------------------------------
// Output actions (written by state handlers; executed in order by the controller)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAction {
    /// Drive the probe power line.
    Power(bool),
    /// Drive the indicator LED line.
    Indicator(bool),
    /// Block for the given number of milliseconds.
    Hold(u32),
}

// ---------------------------------------------------------------------------
// Outcomes (reported to the controller for event emission)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A reading settled as low or okay.
    Classified { reading: Reading, moisture: Moisture },
    /// A fault flash was queued.  `flash` counts from 1 within one recovery.
    Flashed { flash: u32, reading: Reading },
    /// The recovery bound was reached with the fault still present.
    Abandoned { flashes: u32 },
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

pub struct FsmContext {
    // -- Sensor data --
    /// Latest reading.  Written by the controller before ticking a state
    /// that samples; cleared on cooldown.
    pub reading: Option<Reading>,

    // -- Outputs --
    /// Actions to carry out after the tick, in order.
    pub actions: Vec<OutputAction, MAX_ACTIONS>,
    /// What the last tick decided, if anything worth reporting.
    pub outcome: Option<Outcome>,

    // -- Recovery --
    /// Flashes issued since `Recovering` was entered.
    pub flash_count: u32,

    // -- Configuration --
    pub config: ControlConfig,
}

impl FsmContext {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            reading: None,
            actions: Vec::new(),
            outcome: None,
            flash_count: 0,
            config,
        }
    }

    /// Append an action to this tick's queue.
    pub fn queue(&mut self, action: OutputAction) {
        if self.actions.push(action).is_err() {
            warn!("output action queue full, dropping {:?}", action);
        }
    }

    /// Queue one fault flash: probe off, LED on, hold, LED off, hold, probe
    /// back on for the next sample.
    pub fn queue_flash(&mut self) {
        let hold = self.config.flash_interval_ms;
        self.queue(OutputAction::Power(false));
        self.queue(OutputAction::Indicator(true));
        self.queue(OutputAction::Hold(hold));
        self.queue(OutputAction::Indicator(false));
        self.queue(OutputAction::Hold(hold));
        self.queue(OutputAction::Power(true));
    }

    /// The latest reading, or `Unavailable` if none was taken.
    pub fn current_reading(&self) -> Reading {
        self.reading.unwrap_or(Reading::Unavailable)
    }

    /// Whether the recovery bound (if any) has been reached.
    pub fn recovery_exhausted(&self) -> bool {
        self.config
            .max_recovery_flashes
            .is_some_and(|max| self.flash_count >= max)
    }
}
