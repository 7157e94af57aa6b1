//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (ADC command, GPIO lines, event sinks) implement these
//! traits.  The [`Controller`](super::service::Controller) consumes them
//! via generics, so the domain core never touches hardware directly.
//! Blocking waits go through [`embedded_hal::delay::DelayNs`].

use embedded_hal::digital::PinState;

use crate::error::{AdcError, GpioError};

// ───────────────────────────────────────────────────────────────
// ADC port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one invocation of the board's ADC capability.
pub trait AdcPort {
    /// Return the raw channel listing, one `<label>=<millivolts>` per line.
    ///
    /// Errors only when the capability itself cannot be invoked; missing
    /// or malformed channels are the reader's concern.
    fn acquire(&mut self) -> Result<String, AdcError>;
}

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port over numbered digital lines.
///
/// The subsystem behind it must be initialised once before the port is
/// handed to the domain.
pub trait GpioPort {
    /// Configure `line` as a digital output.
    fn configure_output(&mut self, line: u32) -> Result<(), GpioError>;

    /// Drive `line` high or low.
    fn set_level(&mut self, line: u32, level: PinState) -> Result<(), GpioError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → console)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
