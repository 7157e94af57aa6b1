//! Control loop configuration
//!
//! All tunable parameters for the moisture control loop. Values are
//! build-time constants; there is no runtime configuration source.

use core::fmt;

/// Readings at or below this level (mV) are treated as a sensor fault or
/// bone-dry soil. The two cases cannot be told apart from the ADC alone.
pub const FAULT_THRESHOLD: i32 = 10;

/// Boundary (mV) between "low" and "okay" moisture. Readings at or below
/// this level (and above [`FAULT_THRESHOLD`]) are "low".
pub const MOISTURE_THRESHOLD: i32 = 900;

/// Hold time for each half of a fault flash (LED on, then LED off).
pub const FLASH_INTERVAL_MS: u32 = 100;

/// Wait between the end of one cycle and the start of the next.
pub const CYCLE_INTERVAL_MS: u32 = 10_000;

/// Program invoked to read the board's ADC channels.
pub const ADC_COMMAND: &str = "tshwctl";

/// Arguments passed to [`ADC_COMMAND`].
pub const ADC_ARGS: &[&str] = &["--adc"];

/// Label of the moisture channel in the ADC command output.
pub const MOISTURE_CHANNEL: &str = "adc0";

/// The two classification boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// At or below: fault.
    pub fault_mv: i32,
    /// At or below (and above `fault_mv`): low.  Above: okay.
    pub moisture_mv: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fault_mv: FAULT_THRESHOLD,
            moisture_mv: MOISTURE_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Check `0 <= fault_mv < moisture_mv`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fault_mv < 0 {
            return Err(ConfigError("fault threshold must not be negative"));
        }
        if self.fault_mv >= self.moisture_mv {
            return Err(ConfigError(
                "fault threshold must be below moisture threshold",
            ));
        }
        Ok(())
    }
}

/// Core control loop configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlConfig {
    // --- Classification ---
    pub thresholds: Thresholds,

    // --- Timing ---
    /// Half-period of a fault flash (milliseconds)
    pub flash_interval_ms: u32,
    /// Inter-cycle wait with the probe unpowered (milliseconds)
    pub cycle_interval_ms: u32,

    // --- Recovery ---
    /// Give up on a persistent fault after this many flashes and move on to
    /// cooldown.  `None` flashes for as long as the fault persists.
    pub max_recovery_flashes: Option<u32>,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            flash_interval_ms: FLASH_INTERVAL_MS,
            cycle_interval_ms: CYCLE_INTERVAL_MS,
            max_recovery_flashes: None,
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.flash_interval_ms == 0 {
            return Err(ConfigError("flash interval must be non-zero"));
        }
        if self.cycle_interval_ms == 0 {
            return Err(ConfigError("cycle interval must be non-zero"));
        }
        if self.max_recovery_flashes == Some(0) {
            return Err(ConfigError("recovery bound must allow at least one flash"));
        }
        Ok(())
    }
}

/// A config field failed range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigError(pub &'static str);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid config: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}
