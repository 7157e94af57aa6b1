//! Command-backed ADC adapter.
//!
//! Implements [`AdcPort`] by running the board's hardware control tool
//! (`tshwctl --adc` by default) and handing back its standard output.
//! The exit status is not inspected: a tool that fails still yields
//! whatever it printed, and the reader decides whether the channel is
//! usable.  Invalid UTF-8 is replaced rather than rejected so a garbled
//! line cannot hide the others.

use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::app::ports::AdcPort;
use crate::config::{ADC_ARGS, ADC_COMMAND};
use crate::error::AdcError;

pub struct CommandAdc {
    program: String,
    args: Vec<String>,
}

impl Default for CommandAdc {
    fn default() -> Self {
        Self::new(ADC_COMMAND, ADC_ARGS)
    }
}

impl CommandAdc {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_owned(),
            args: args.iter().map(|a| (*a).to_owned()).collect(),
        }
    }
}

impl AdcPort for CommandAdc {
    fn acquire(&mut self) -> Result<String, AdcError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| {
                warn!("failed to run {}: {}", self.program, e);
                AdcError::Unreachable
            })?;

        if !output.status.success() {
            debug!("{} exited with {}", self.program, output.status);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
