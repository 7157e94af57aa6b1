//! Linux sysfs GPIO adapter.
//!
//! Implements [`GpioPort`] over `/sys/class/gpio`:
//!
//! ```text
//!   export            ← "<line>"      (once per line)
//!   gpio<line>/direction ← "out"
//!   gpio<line>/value     ← "0" | "1"
//! ```
//!
//! Lines that are already exported are reused.

use std::fs;
use std::path::PathBuf;

use embedded_hal::digital::PinState;
use log::{debug, warn};

use crate::app::ports::GpioPort;
use crate::error::GpioError;

/// Default sysfs mount point for the GPIO class.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

pub struct SysfsGpio {
    root: PathBuf,
}

impl SysfsGpio {
    /// Initialise the GPIO subsystem at the default sysfs root.
    pub fn init() -> Result<Self, GpioError> {
        Self::with_root(SYSFS_GPIO_ROOT)
    }

    /// Initialise against an arbitrary root (used by tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Result<Self, GpioError> {
        let root = root.into();
        if !root.join("export").exists() {
            warn!("no GPIO export interface under {}", root.display());
            return Err(GpioError::Unavailable);
        }
        debug!("GPIO subsystem at {}", root.display());
        Ok(Self { root })
    }

    fn line_dir(&self, line: u32) -> PathBuf {
        self.root.join(format!("gpio{line}"))
    }
}

impl GpioPort for SysfsGpio {
    fn configure_output(&mut self, line: u32) -> Result<(), GpioError> {
        let dir = self.line_dir(line);
        if !dir.exists() {
            fs::write(self.root.join("export"), line.to_string()).map_err(|e| {
                warn!("export of GPIO {} failed: {}", line, e);
                GpioError::ExportFailed(line)
            })?;
        }
        fs::write(dir.join("direction"), "out").map_err(|e| {
            warn!("direction of GPIO {} failed: {}", line, e);
            GpioError::DirectionFailed(line)
        })
    }

    fn set_level(&mut self, line: u32, level: PinState) -> Result<(), GpioError> {
        let value = match level {
            PinState::High => "1",
            PinState::Low => "0",
        };
        fs::write(self.line_dir(line).join("value"), value).map_err(|e| {
            warn!("write to GPIO {} failed: {}", line, e);
            GpioError::WriteFailed(line)
        })
    }
}
