//! Integration tests for the SensorReader → Controller → outputs pipeline.
//!
//! Run on the host against the mock timeline in `mock_hw`; no sysfs lines
//! or `tshwctl` binary required.

use std::rc::Rc;

use crate::mock_hw::{HwCall, MockDelay, MockGpio, RecordingSink, Rig, ScriptedAdc, Timeline, listing};
use soil_watcher::app::events::AppEvent;
use soil_watcher::app::service::Controller;
use soil_watcher::classify::{Moisture, Reading};
use soil_watcher::config::{ControlConfig, Thresholds};
use soil_watcher::error::{AdcError, Error};
use soil_watcher::fsm::StateId;
use soil_watcher::sensors::SensorReader;

use HwCall::{Acquire, Hold, Indicator, Power};

const FLASH: u32 = 100;
const COOLDOWN: u32 = 10_000;

fn flash() -> [HwCall; 6] {
    [
        Power(false),
        Indicator(true),
        Hold(FLASH),
        Indicator(false),
        Hold(FLASH),
        Power(true),
    ]
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_probes_then_configures_then_drives_outputs_off() {
    let timeline = Timeline::default();
    let adc = ScriptedAdc::new(vec![listing(700)], listing(700), Rc::clone(&timeline));
    let mut controller = Controller::setup(
        ControlConfig::default(),
        SensorReader::new(adc),
        MockGpio::new(Rc::clone(&timeline)),
        MockDelay::new(Rc::clone(&timeline)),
    )
    .unwrap();
    let mut sink = RecordingSink::default();
    controller.start(&mut sink);

    assert_eq!(
        *timeline.borrow(),
        vec![
            Acquire,
            HwCall::Configure(76),
            HwCall::Configure(77),
            Power(false),
            Indicator(false),
        ]
    );
    assert_eq!(controller.state(), StateId::Idle);
    assert_eq!(sink.events, vec![AppEvent::Started(StateId::Idle)]);
}

// Scenario D: the ADC capability cannot be invoked at all.
#[test]
fn unreachable_adc_fails_setup_before_any_output_command() {
    let timeline = Timeline::default();
    let adc = ScriptedAdc::new(
        vec![Err(AdcError::Unreachable)],
        listing(700),
        Rc::clone(&timeline),
    );
    let result = Controller::setup(
        ControlConfig::default(),
        SensorReader::new(adc),
        MockGpio::new(Rc::clone(&timeline)),
        MockDelay::new(Rc::clone(&timeline)),
    );

    assert!(matches!(result, Err(Error::Adc(AdcError::Unreachable))));
    assert_eq!(*timeline.borrow(), vec![Acquire]);
}

// ── Single cycles ─────────────────────────────────────────────

// Scenario B
#[test]
fn low_reading_lights_indicator_and_powers_down() {
    let mut rig = Rig::with_readings(&[500]);
    let moisture = rig.controller.run_cycle(&mut rig.sink);

    assert_eq!(moisture, Some(Moisture::Low));
    assert_eq!(
        rig.calls(),
        vec![
            Power(true),
            Acquire,
            Indicator(true),
            Power(false),
            Hold(COOLDOWN)
        ]
    );
    assert!(rig.controller.outputs().indicator);
    assert!(!rig.controller.outputs().power);
}

#[test]
fn okay_reading_clears_indicator() {
    let mut rig = Rig::with_readings(&[1500]);
    assert_eq!(rig.controller.run_cycle(&mut rig.sink), Some(Moisture::Okay));
    assert_eq!(rig.count(Indicator(false)), 1);
    assert_eq!(rig.count(Indicator(true)), 0);
    assert!(!rig.controller.outputs().power);
}

// Scenario A
#[test]
fn two_faults_then_okay_flashes_twice() {
    let mut rig = Rig::with_readings(&[0, 0, 950]);
    let moisture = rig.controller.run_cycle(&mut rig.sink);

    let mut expected = vec![Power(true), Acquire];
    expected.extend(flash());
    expected.push(Acquire);
    expected.extend(flash());
    expected.push(Acquire);
    expected.extend([Indicator(false), Power(false), Hold(COOLDOWN)]);

    assert_eq!(moisture, Some(Moisture::Okay));
    assert_eq!(rig.calls(), expected);

    let flashes: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::FaultFlash { flash, reading } => Some((*flash, *reading)),
            _ => None,
        })
        .collect();
    assert_eq!(
        flashes,
        vec![(1, Reading::Millivolts(0)), (2, Reading::Millivolts(0))]
    );
}

// Scenario C
#[test]
fn missing_moisture_channel_engages_recovery() {
    let mut rig = Rig::with_script(
        ControlConfig::default(),
        vec![listing(1000), Ok("adc1=1203\nadc2=17\n".to_owned())],
        listing(1000),
    );

    rig.controller.step(&mut rig.sink); // Idle -> Sampling
    rig.controller.step(&mut rig.sink); // Sampling -> Classifying
    assert_eq!(
        rig.controller.step(&mut rig.sink),
        Some(StateId::Recovering)
    );
    assert!(rig.sink.events.contains(&AppEvent::FaultFlash {
        flash: 1,
        reading: Reading::Unavailable,
    }));
}

#[test]
fn adc_failure_mid_loop_degrades_to_fault() {
    let mut rig = Rig::with_script(
        ControlConfig::default(),
        vec![listing(1000), Err(AdcError::Unreachable), listing(600)],
        listing(1000),
    );
    assert_eq!(rig.controller.run_cycle(&mut rig.sink), Some(Moisture::Low));
    assert!(rig.sink.events.contains(&AppEvent::FaultFlash {
        flash: 1,
        reading: Reading::Unavailable,
    }));
}

// ── Recovery ──────────────────────────────────────────────────

#[test]
fn persistent_fault_never_settles() {
    let mut rig = Rig::with_script(ControlConfig::default(), vec![listing(1000)], listing(4));

    // Idle -> Sampling -> Classifying -> Recovering
    for _ in 0..3 {
        rig.controller.step(&mut rig.sink);
    }
    for _ in 0..40 {
        assert_eq!(rig.controller.step(&mut rig.sink), None);
        assert_eq!(rig.controller.state(), StateId::Recovering);
    }

    assert_eq!(rig.count(Indicator(true)), 41);
    assert_eq!(rig.count(Indicator(false)), 41);
    assert_eq!(rig.count(Hold(COOLDOWN)), 0);
    assert_eq!(rig.controller.cycles(), 0);
}

#[test]
fn bounded_recovery_moves_on_to_cooldown() {
    let config = ControlConfig {
        max_recovery_flashes: Some(3),
        ..ControlConfig::default()
    };
    let mut rig = Rig::with_script(config, vec![listing(1000)], listing(0));

    assert_eq!(rig.controller.run_cycle(&mut rig.sink), None);
    assert_eq!(rig.count(Indicator(true)), 3);
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::RecoveryAbandoned { flashes: 3 }));
    assert_eq!(rig.calls().last(), Some(&Hold(COOLDOWN)));
    assert!(!rig.controller.outputs().power);
    assert!(!rig.controller.outputs().indicator);

    // The next cycle starts a fresh recovery.
    rig.clear();
    assert_eq!(rig.controller.run_cycle(&mut rig.sink), None);
    assert_eq!(rig.count(Indicator(true)), 3);
}

#[test]
fn custom_thresholds_shift_classification() {
    let config = ControlConfig {
        thresholds: Thresholds {
            fault_mv: 0,
            moisture_mv: 400,
        },
        ..ControlConfig::default()
    };
    let mut rig = Rig::with_config(config, &[5, 500]);
    assert_eq!(rig.controller.run_cycle(&mut rig.sink), Some(Moisture::Low));
    assert_eq!(rig.controller.run_cycle(&mut rig.sink), Some(Moisture::Okay));
}

// ── Multi-cycle invariants ────────────────────────────────────

#[test]
fn same_reading_yields_same_command_every_cycle() {
    let mut rig = Rig::with_readings(&[700, 700, 700, 700]);
    for cycle in 1..=4 {
        rig.clear();
        assert_eq!(rig.controller.run_cycle(&mut rig.sink), Some(Moisture::Low));
        assert_eq!(rig.count(Indicator(true)), 1, "cycle {cycle}");
        assert_eq!(rig.count(Indicator(false)), 0, "cycle {cycle}");
    }
    assert_eq!(rig.controller.cycles(), 4);
}

#[test]
fn probe_is_powered_only_while_sampling_or_flashing() {
    let mut rig = Rig::with_readings(&[0, 300, 2000, 0, 0, 0, 50, 900, 901]);
    for _ in 0..5 {
        rig.controller.run_cycle(&mut rig.sink);
    }

    let mut power = false;
    for call in rig.calls() {
        match call {
            Power(on) => power = on,
            Acquire => assert!(power, "sampled with probe unpowered"),
            Hold(COOLDOWN) => assert!(!power, "cooled down with probe powered"),
            Hold(FLASH) => assert!(!power, "flashed with probe powered"),
            _ => {}
        }
    }
    assert!(!power, "probe left powered after the last cycle");
}

#[test]
fn cycle_events_are_ordered() {
    let mut rig = Rig::with_readings(&[500]);
    rig.controller.run_cycle(&mut rig.sink);

    let tail: Vec<_> = rig.sink.events.iter().skip(1).cloned().collect();
    assert_eq!(
        tail,
        vec![
            AppEvent::StateChanged {
                from: StateId::Idle,
                to: StateId::Sampling
            },
            AppEvent::StateChanged {
                from: StateId::Sampling,
                to: StateId::Classifying
            },
            AppEvent::Classified {
                reading: Reading::Millivolts(500),
                moisture: Moisture::Low
            },
            AppEvent::StateChanged {
                from: StateId::Classifying,
                to: StateId::Cooldown
            },
            AppEvent::CycleCompleted { cycle: 1 },
        ]
    );
}
