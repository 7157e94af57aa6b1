//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers with no captured
//! state.  Handlers never touch hardware; they queue
//! [`OutputAction`]s that the controller executes after the tick.
//!
//! ```text
//!  IDLE ──▶ SAMPLING ──[reading]──▶ CLASSIFYING ──[low/okay]──▶ COOLDOWN
//!              ▲                      │      ▲                     │
//!              │                 [fault]  [recovered]              │
//!              │                      ▼      │                     │
//!              │                    RECOVERING ──[bound reached]──▶│
//!              │                      ↺ flash while fault          │
//!              └──────────────────[cycle interval]─────────────────┘
//! ```

use log::{debug, info};

use super::context::{FsmContext, OutputAction, Outcome};
use super::{StateDescriptor, StateId};
use crate::classify::{Moisture, classify};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
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
        // Index 1: Sampling
        StateDescriptor {
            id: StateId::Sampling,
            name: "Sampling",
            on_enter: Some(sampling_enter),
            on_exit: None,
            on_update: sampling_update,
        },
        // Index 2: Classifying
        StateDescriptor {
            id: StateId::Classifying,
            name: "Classifying",
            on_enter: None,
            on_exit: None,
            on_update: classifying_update,
        },
        // Index 3: Recovering
        StateDescriptor {
            id: StateId::Recovering,
            name: "Recovering",
            on_enter: Some(recovering_enter),
            on_exit: Some(recovering_exit),
            on_update: recovering_update,
        },
        // Index 4: Cooldown
        StateDescriptor {
            id: StateId::Cooldown,
            name: "Cooldown",
            on_enter: Some(cooldown_enter),
            on_exit: None,
            on_update: cooldown_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state: process start only
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.queue(OutputAction::Power(false));
    ctx.queue(OutputAction::Indicator(false));
    info!("IDLE: probe and indicator off");
}

fn idle_update(_ctx: &mut FsmContext) -> Option<StateId> {
    Some(StateId::Sampling)
}

// ═══════════════════════════════════════════════════════════════════════════
//  SAMPLING state: probe powered, waiting for a reading
// ═══════════════════════════════════════════════════════════════════════════

fn sampling_enter(ctx: &mut FsmContext) {
    ctx.reading = None;
    ctx.queue(OutputAction::Power(true));
}

fn sampling_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.reading.map(|_| StateId::Classifying)
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLASSIFYING state: decide the indicator from the latest reading
// ═══════════════════════════════════════════════════════════════════════════

fn classifying_update(ctx: &mut FsmContext) -> Option<StateId> {
    let reading = ctx.current_reading();
    let moisture = classify(reading, &ctx.config.thresholds);
    debug!("CLASSIFYING: {} -> {:?}", reading, moisture);

    match moisture.indicator() {
        None => Some(StateId::Recovering),
        Some(level) => {
            ctx.outcome = Some(Outcome::Classified { reading, moisture });
            ctx.queue(OutputAction::Indicator(level));
            Some(StateId::Cooldown)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  RECOVERING state: flash while the reading stays fault-equivalent
// ═══════════════════════════════════════════════════════════════════════════

fn flash(ctx: &mut FsmContext) {
    ctx.flash_count = ctx.flash_count.saturating_add(1);
    ctx.outcome = Some(Outcome::Flashed {
        flash: ctx.flash_count,
        reading: ctx.current_reading(),
    });
    ctx.queue_flash();
}

fn recovering_enter(ctx: &mut FsmContext) {
    ctx.flash_count = 0;
    debug!(
        "RECOVERING: reading {} at or below {} mV, flashing",
        ctx.current_reading(),
        ctx.config.thresholds.fault_mv
    );
    flash(ctx);
}

fn recovering_exit(ctx: &mut FsmContext) {
    info!("RECOVERING: left after {} flash(es)", ctx.flash_count);
}

fn recovering_update(ctx: &mut FsmContext) -> Option<StateId> {
    let moisture = classify(ctx.current_reading(), &ctx.config.thresholds);
    if moisture != Moisture::Fault {
        return Some(StateId::Classifying);
    }

    if ctx.recovery_exhausted() {
        ctx.outcome = Some(Outcome::Abandoned {
            flashes: ctx.flash_count,
        });
        return Some(StateId::Cooldown);
    }

    flash(ctx);
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  COOLDOWN state: probe unpowered until the next cycle
// ═══════════════════════════════════════════════════════════════════════════

fn cooldown_enter(ctx: &mut FsmContext) {
    ctx.queue(OutputAction::Power(false));
    ctx.queue(OutputAction::Hold(ctx.config.cycle_interval_ms));
}

fn cooldown_update(_ctx: &mut FsmContext) -> Option<StateId> {
    Some(StateId::Sampling)
}
