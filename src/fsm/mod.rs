//! Function-pointer finite state machine engine.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌─────────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId     │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├─────────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Idle        │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Sampling    │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Classifying │ -         │ -        │ fn(ctx)->Option<> │  │
//! │  │ Recovering  │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Cooldown    │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  └─────────────┴───────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the
//! current pointer.  All functions receive `&mut FsmContext`.

pub mod context;
pub mod states;

use context::FsmContext;
use log::debug;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// Outputs off, before the first cycle.
    Idle = 0,
    /// Probe powered, awaiting a reading.
    Sampling = 1,
    /// Reading obtained, deciding the indicator.
    Classifying = 2,
    /// Fault-equivalent reading, flashing and re-sampling.
    Recovering = 3,
    /// Probe unpowered, waiting for the next cycle.
    Cooldown = 4,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 5;

    /// Convert an index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `Cooldown` in release (probe unpowered).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Sampling,
            2 => Self::Classifying,
            3 => Self::Recovering,
            4 => Self::Cooldown,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Cooldown
            }
        }
    }

    /// States whose update consumes a fresh reading.
    pub fn needs_reading(self) -> bool {
        matches!(self, Self::Sampling | Self::Recovering)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

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

pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        debug!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.  Returns the state entered, if the
    /// tick caused a transition.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> Option<StateId> {
        let next = (self.table[self.current].on_update)(ctx)?;
        self.transition(next, ctx);
        Some(next)
    }

    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        debug!(
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
