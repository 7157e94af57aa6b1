//! Sensor subsystem.
//!
//! A single resistive moisture probe read through the board's ADC
//! capability.  See [`moisture::SensorReader`].

pub mod moisture;

pub use moisture::{SensorReader, parse_channel};
