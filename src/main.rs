//! Soil Watcher: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                     │
//! │                                                            │
//! │  CommandAdc    SysfsGpio    StdDelay     LogEventSink      │
//! │  (AdcPort)     (GpioPort)   (DelayNs)    (EventSink)       │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ───────────────      │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │        Controller (moisture control loop)        │      │
//! │  │  SensorReader · FSM · Outputs                    │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use soil_watcher::adapters::command_adc::CommandAdc;
use soil_watcher::adapters::daemon;
use soil_watcher::adapters::delay::StdDelay;
use soil_watcher::adapters::log_sink::LogEventSink;
use soil_watcher::adapters::sysfs_gpio::SysfsGpio;
use soil_watcher::app::service::Controller;
use soil_watcher::cli::{self, RunMode};
use soil_watcher::config::ControlConfig;
use soil_watcher::sensors::SensorReader;

fn main() -> Result<()> {
    // ── 1. Flags ──────────────────────────────────────────────
    let mode = match cli::parse_args(std::env::args().skip(1)) {
        Ok(mode) => mode,
        Err(e) => {
            if !e.help {
                eprint!("{}: {}", cli::PROGRAM, e.message);
            }
            print!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    // ── 2. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("soil-watcher v{}", env!("CARGO_PKG_VERSION"));

    // ── 3. Hardware + controller ──────────────────────────────
    // The ADC is probed before either output line is configured.
    let gpio = SysfsGpio::init().context("GPIO subsystem init failed")?;
    let mut controller = Controller::setup(
        ControlConfig::default(),
        SensorReader::new(CommandAdc::default()),
        gpio,
        StdDelay::new(),
    )
    .context("startup failed")?;
    let mut sink = LogEventSink::new();
    controller.start(&mut sink);

    // ── 4. Detach ─────────────────────────────────────────────
    if mode == RunMode::Detached {
        info!("Running as daemon.");
        daemon::detach()?;
    }

    // ── 5. Control loop (never returns) ───────────────────────
    controller.run(&mut sink)
}
