//! Mock hardware for integration tests.
//!
//! Every GPIO write, delay and ADC acquisition lands on one shared
//! timeline so tests can assert on the exact interleaving without touching
//! real sysfs lines.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use soil_watcher::app::events::AppEvent;
use soil_watcher::app::ports::{AdcPort, EventSink, GpioPort};
use soil_watcher::app::service::Controller;
use soil_watcher::config::ControlConfig;
use soil_watcher::error::{AdcError, GpioError};
use soil_watcher::pins::{LED_LINE, PWR_LINE};
use soil_watcher::sensors::SensorReader;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    Configure(u32),
    Power(bool),
    Indicator(bool),
    Hold(u32),
    Acquire,
}

pub type Timeline = Rc<RefCell<Vec<HwCall>>>;

// ── MockGpio ──────────────────────────────────────────────────

pub struct MockGpio {
    timeline: Timeline,
}

impl MockGpio {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

impl GpioPort for MockGpio {
    fn configure_output(&mut self, line: u32) -> Result<(), GpioError> {
        self.timeline.borrow_mut().push(HwCall::Configure(line));
        Ok(())
    }

    fn set_level(&mut self, line: u32, level: PinState) -> Result<(), GpioError> {
        let on = level == PinState::High;
        let call = match line {
            PWR_LINE => HwCall::Power(on),
            LED_LINE => HwCall::Indicator(on),
            other => panic!("write to unexpected line {other}"),
        };
        self.timeline.borrow_mut().push(call);
        Ok(())
    }
}

// ── ScriptedAdc ───────────────────────────────────────────────

/// Replays a script of acquisitions; once exhausted, repeats `fallback`.
pub struct ScriptedAdc {
    script: VecDeque<Result<String, AdcError>>,
    fallback: Result<String, AdcError>,
    timeline: Timeline,
}

impl ScriptedAdc {
    pub fn new(
        script: Vec<Result<String, AdcError>>,
        fallback: Result<String, AdcError>,
        timeline: Timeline,
    ) -> Self {
        Self {
            script: script.into(),
            fallback,
            timeline,
        }
    }
}

impl AdcPort for ScriptedAdc {
    fn acquire(&mut self) -> Result<String, AdcError> {
        self.timeline.borrow_mut().push(HwCall::Acquire);
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Typical `tshwctl --adc` listing with the moisture channel in the middle.
pub fn listing(mv: i32) -> Result<String, AdcError> {
    Ok(format!("adc1=1203\nadc0={mv}\nadc2=17\n"))
}

// ── MockDelay ─────────────────────────────────────────────────

pub struct MockDelay {
    timeline: Timeline,
}

impl MockDelay {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.borrow_mut().push(HwCall::Hold(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timeline.borrow_mut().push(HwCall::Hold(ms));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub type MockController = Controller<MockGpio, ScriptedAdc, MockDelay>;

pub struct Rig {
    pub timeline: Timeline,
    pub sink: RecordingSink,
    pub controller: MockController,
}

impl Rig {
    /// A started controller whose ADC replays `script`, then `fallback`.
    pub fn with_script(
        config: ControlConfig,
        script: Vec<Result<String, AdcError>>,
        fallback: Result<String, AdcError>,
    ) -> Self {
        let timeline = Timeline::default();
        let adc = ScriptedAdc::new(script, fallback, Rc::clone(&timeline));
        let mut controller = Controller::setup(
            config,
            SensorReader::new(adc),
            MockGpio::new(Rc::clone(&timeline)),
            MockDelay::new(Rc::clone(&timeline)),
        )
        .expect("mock setup cannot fail");
        let mut sink = RecordingSink::default();
        controller.start(&mut sink);
        // Startup probe, configuration and idle levels are not part of a cycle.
        timeline.borrow_mut().clear();
        Self {
            timeline,
            sink,
            controller,
        }
    }

    /// Default config, readings in millivolts, okay soil afterwards.
    pub fn with_readings(readings: &[i32]) -> Self {
        Self::with_config(ControlConfig::default(), readings)
    }

    pub fn with_config(config: ControlConfig, readings: &[i32]) -> Self {
        // The first script entry feeds the startup probe.
        let mut script = vec![listing(1000)];
        script.extend(readings.iter().map(|&mv| listing(mv)));
        Self::with_script(config, script, listing(1000))
    }

    pub fn calls(&self) -> Vec<HwCall> {
        self.timeline.borrow().clone()
    }

    pub fn clear(&self) {
        self.timeline.borrow_mut().clear();
    }

    pub fn count(&self, call: HwCall) -> usize {
        self.timeline.borrow().iter().filter(|c| **c == call).count()
    }
}
