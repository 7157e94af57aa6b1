//! Digital line assignments for the soil-watcher board.
//!
//! Single source of truth: the entry point and the controller reference
//! this module rather than hard-coding line numbers.

// ---------------------------------------------------------------------------
// Sensor power enable
// ---------------------------------------------------------------------------

/// Digital output: HIGH = moisture probe energised.
/// Kept LOW between samples to limit electrode corrosion.
pub const PWR_LINE: u32 = 76;

// ---------------------------------------------------------------------------
// Indicator LED
// ---------------------------------------------------------------------------

/// Digital output: HIGH = indicator LED lit.
pub const LED_LINE: u32 = 77;
