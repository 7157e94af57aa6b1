//! Moisture control loop: the hexagonal core.
//!
//! [`Controller`] owns the FSM, its context, the sensor reader, the two
//! outputs, and the delay provider.  Each [`step`](Controller::step) reads
//! the probe when the current state needs it, ticks the FSM, then carries
//! out the queued output actions in order.
//!
//! ```text
//!   AdcPort ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!               │        Controller         │
//!  GpioPort ◀── │  SensorReader · FSM · Out │ ──▶ DelayNs
//!               └───────────────────────────┘
//! ```
//!
//! Nothing propagates out of the loop: ADC failures become fault readings
//! and GPIO write failures are logged.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::classify::Moisture;
use crate::config::{ConfigError, ControlConfig};
use crate::error;
use crate::fsm::context::{FsmContext, Outcome, OutputAction};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::pins;
use crate::sensors::SensorReader;

use super::events::AppEvent;
use super::outputs::{OutputState, Outputs};
use super::ports::{AdcPort, EventSink, GpioPort};

pub struct Controller<G: GpioPort, A: AdcPort, D: DelayNs> {
    fsm: Fsm,
    ctx: FsmContext,
    reader: SensorReader<A>,
    outputs: Outputs<G>,
    delay: D,
    cycles: u64,
    /// Settled classification of the cycle in progress.
    last_moisture: Option<Moisture>,
}

impl<G: GpioPort, A: AdcPort, D: DelayNs> Controller<G, A, D> {
    /// Build the controller.  `outputs` must already be configured.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(
        config: ControlConfig,
        reader: SensorReader<A>,
        outputs: Outputs<G>,
        delay: D,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            ctx: FsmContext::new(config),
            reader,
            outputs,
            delay,
            cycles: 0,
            last_moisture: None,
        })
    }

    /// Startup sequence: probe the ADC once, then configure both output
    /// lines, then build the controller.
    ///
    /// An unreachable ADC fails before any GPIO call is made.
    pub fn setup(
        config: ControlConfig,
        mut reader: SensorReader<A>,
        gpio: G,
        delay: D,
    ) -> error::Result<Self> {
        let first = reader.probe()?;
        info!("ADC reachable, first reading: {}", first);

        info!(
            "Setting PWR and LED to output ({} and {})",
            pins::PWR_LINE,
            pins::LED_LINE
        );
        let mut outputs = Outputs::new(gpio, pins::PWR_LINE, pins::LED_LINE);
        outputs.configure()?;

        Ok(Self::new(config, reader, outputs, delay)?)
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter `Idle`: both outputs driven off.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.apply_actions();
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "Controller started: fault <= {} mV, low <= {} mV",
            self.ctx.config.thresholds.fault_mv, self.ctx.config.thresholds.moisture_mv
        );
    }

    /// One FSM tick.  Returns the state entered, if any.
    pub fn step(&mut self, sink: &mut impl EventSink) -> Option<StateId> {
        let prev_state = self.fsm.current_state();

        if prev_state.needs_reading() {
            self.ctx.reading = Some(self.reader.read_adc());
        }

        let entered = self.fsm.tick(&mut self.ctx);

        if let Some(outcome) = self.ctx.outcome.take() {
            sink.emit(&match outcome {
                Outcome::Classified { reading, moisture } => {
                    self.last_moisture = Some(moisture);
                    AppEvent::Classified { reading, moisture }
                }
                Outcome::Flashed { flash, reading } => AppEvent::FaultFlash { flash, reading },
                Outcome::Abandoned { flashes } => AppEvent::RecoveryAbandoned { flashes },
            });
        }

        self.apply_actions();

        if let Some(to) = entered {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to,
            });
            if to == StateId::Cooldown {
                self.cycles += 1;
                sink.emit(&AppEvent::CycleCompleted { cycle: self.cycles });
            }
        }

        entered
    }

    /// Step until a cycle completes (cooldown wait done).
    ///
    /// Returns the cycle's classification, or `None` if recovery was
    /// abandoned.  With an unbounded recovery this does not return while
    /// the fault persists.
    pub fn run_cycle(&mut self, sink: &mut impl EventSink) -> Option<Moisture> {
        self.last_moisture = None;
        while self.step(sink) != Some(StateId::Cooldown) {}
        self.last_moisture
    }

    /// Run cycles forever.
    pub fn run(&mut self, sink: &mut impl EventSink) -> ! {
        loop {
            self.run_cycle(sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Last commanded output levels.
    pub fn outputs(&self) -> OutputState {
        self.outputs.state()
    }

    /// Cycles completed since start.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn config(&self) -> &ControlConfig {
        &self.ctx.config
    }

    pub fn gpio(&self) -> &G {
        self.outputs.gpio()
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    // ── Internal ──────────────────────────────────────────────

    /// Drain the tick's action queue into port calls, in order.
    fn apply_actions(&mut self) {
        let actions = core::mem::take(&mut self.ctx.actions);
        for action in actions {
            let result = match action {
                OutputAction::Power(on) => self.outputs.set_power(on),
                OutputAction::Indicator(on) => self.outputs.set_indicator(on),
                OutputAction::Hold(ms) => {
                    self.delay.delay_ms(ms);
                    Ok(())
                }
            };
            if let Err(e) = result {
                warn!("{:?} not applied: {}", action, e);
            }
        }
    }
}
