//! The two controller-owned digital outputs.
//!
//! Wraps a [`GpioPort`] with the probe power and indicator line numbers
//! and remembers the last commanded level of each.  Levels are never read
//! back from hardware.

use embedded_hal::digital::PinState;

use super::ports::GpioPort;
use crate::error::GpioError;

/// Last commanded level of each output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputState {
    pub power: bool,
    pub indicator: bool,
}

pub struct Outputs<G: GpioPort> {
    gpio: G,
    power_line: u32,
    indicator_line: u32,
    state: OutputState,
}

impl<G: GpioPort> Outputs<G> {
    pub fn new(gpio: G, power_line: u32, indicator_line: u32) -> Self {
        Self {
            gpio,
            power_line,
            indicator_line,
            state: OutputState::default(),
        }
    }

    /// Configure both lines as outputs.  Call once before the controller
    /// starts; the controller drives them low on start.
    pub fn configure(&mut self) -> Result<(), GpioError> {
        self.gpio.configure_output(self.power_line)?;
        self.gpio.configure_output(self.indicator_line)
    }

    pub fn set_power(&mut self, on: bool) -> Result<(), GpioError> {
        self.state.power = on;
        self.gpio.set_level(self.power_line, PinState::from(on))
    }

    pub fn set_indicator(&mut self, on: bool) -> Result<(), GpioError> {
        self.state.indicator = on;
        self.gpio.set_level(self.indicator_line, PinState::from(on))
    }

    pub fn state(&self) -> OutputState {
        self.state
    }

    pub fn gpio(&self) -> &G {
        &self.gpio
    }
}
