//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade.  When attached these lines reach the console; once detached,
//! stdio points at `/dev/null` and the indicator LED is the only output.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::classify::Moisture;

pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Classified {
                reading,
                moisture: Moisture::Low,
            } => {
                info!("MOISTURE | LOW ({}), turning the LED on", reading);
            }
            AppEvent::Classified { reading, moisture } => {
                info!("MOISTURE | {:?} ({}), turning the LED off", moisture, reading);
            }
            AppEvent::FaultFlash { flash, reading } => {
                warn!(
                    "FAULT | sensor problem or bone dry ({}), flash #{}",
                    reading, flash
                );
            }
            AppEvent::RecoveryAbandoned { flashes } => {
                warn!("FAULT | still faulted after {} flashes, cooling down", flashes);
            }
            AppEvent::CycleCompleted { cycle } => {
                debug!("CYCLE | {} complete", cycle);
            }
        }
    }
}
