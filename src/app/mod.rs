//! Application core: domain logic behind port traits.
//!
//! This module contains the moisture control loop: the controller that
//! sequences sampling, classification, recovery flashing and cooldown.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod outputs;
pub mod ports;
pub mod service;
