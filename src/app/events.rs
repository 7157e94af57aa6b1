//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::classify::{Moisture, Reading};
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A reading settled as low or okay and the indicator was set.
    Classified { reading: Reading, moisture: Moisture },

    /// A fault flash is about to run.
    FaultFlash { flash: u32, reading: Reading },

    /// The recovery bound was reached; the loop moves on to cooldown.
    RecoveryAbandoned { flashes: u32 },

    /// A full cycle finished (cooldown wait done).
    CycleCompleted { cycle: u64 },
}
