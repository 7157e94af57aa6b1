//! Reading model and moisture classification.
//!
//! Classification is a pure function of the reading and the two
//! thresholds; the same reading always yields the same outcome.

use core::fmt;

use crate::config::Thresholds;

/// One poll of the moisture channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// Channel value in millivolts.
    Millivolts(i32),
    /// Channel missing, unparsable, or the ADC could not be invoked.
    Unavailable,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millivolts(mv) => write!(f, "{mv} mV"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Outcome of classifying a [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Moisture {
    /// Sensor fault, disconnected probe, or bone-dry soil.
    Fault,
    /// Soil needs water: indicator on.
    Low,
    /// Soil is adequately moist: indicator off.
    Okay,
}

impl Moisture {
    /// Indicator level commanded for this outcome.  `None` for `Fault`,
    /// which flashes instead of settling.
    pub fn indicator(self) -> Option<bool> {
        match self {
            Self::Fault => None,
            Self::Low => Some(true),
            Self::Okay => Some(false),
        }
    }
}

/// Classify a reading against the thresholds.
///
/// `Unavailable` classifies as `Fault`.
pub fn classify(reading: Reading, thresholds: &Thresholds) -> Moisture {
    match reading {
        Reading::Unavailable => Moisture::Fault,
        Reading::Millivolts(mv) if mv <= thresholds.fault_mv => Moisture::Fault,
        Reading::Millivolts(mv) if mv <= thresholds.moisture_mv => Moisture::Low,
        Reading::Millivolts(_) => Moisture::Okay,
    }
}
