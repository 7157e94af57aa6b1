//! Unified error types for the soil watcher.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! entry point's error handling uniform.  All variants are `Copy` so they
//! can be passed through the controller without allocation.

use core::fmt;

use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The ADC capability could not be invoked.
    Adc(AdcError),
    /// A GPIO configure or write failed.
    Gpio(GpioError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adc(e) => write!(f, "adc: {e}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// ADC errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcError {
    /// The acquisition program could not be started.
    Unreachable,
}

impl fmt::Display for AdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "ADC capability unreachable"),
        }
    }
}

impl std::error::Error for AdcError {}

impl From<AdcError> for Error {
    fn from(e: AdcError) -> Self {
        Self::Adc(e)
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// The GPIO subsystem is not present or was not initialised.
    Unavailable,
    /// Exporting the line to userspace failed.
    ExportFailed(u32),
    /// Setting the line direction failed.
    DirectionFailed(u32),
    /// Writing the line level failed.
    WriteFailed(u32),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "GPIO subsystem unavailable"),
            Self::ExportFailed(line) => write!(f, "export of line {line} failed"),
            Self::DirectionFailed(line) => write!(f, "direction of line {line} failed"),
            Self::WriteFailed(line) => write!(f, "write to line {line} failed"),
        }
    }
}

impl std::error::Error for GpioError {}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
