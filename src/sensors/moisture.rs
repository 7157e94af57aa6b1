//! Resistive soil moisture probe reader.
//!
//! Invokes the ADC capability once per poll, picks the moisture channel
//! out of the `<label>=<millivolts>` listing, and normalises the result to
//! a [`Reading`].  Every failure funnels into `Reading::Unavailable`; retry
//! policy belongs to the controller.

use log::{debug, warn};

use crate::app::ports::AdcPort;
use crate::classify::Reading;
use crate::config::MOISTURE_CHANNEL;
use crate::error::AdcError;

pub struct SensorReader<A: AdcPort> {
    adc: A,
    channel: &'static str,
}

impl<A: AdcPort> SensorReader<A> {
    /// Reader for the default moisture channel.
    pub fn new(adc: A) -> Self {
        Self::with_channel(adc, MOISTURE_CHANNEL)
    }

    pub fn with_channel(adc: A, channel: &'static str) -> Self {
        Self { adc, channel }
    }

    /// One startup acquisition.  Unlike [`read_adc`](Self::read_adc), an
    /// unreachable capability is reported so the caller can refuse to start.
    pub fn probe(&mut self) -> Result<Reading, AdcError> {
        let listing = self.adc.acquire()?;
        Ok(self.parse(&listing))
    }

    /// Poll the moisture channel.  Never fails.
    pub fn read_adc(&mut self) -> Reading {
        match self.adc.acquire() {
            Ok(listing) => self.parse(&listing),
            Err(e) => {
                warn!("ADC acquisition failed: {}", e);
                Reading::Unavailable
            }
        }
    }

    fn parse(&self, listing: &str) -> Reading {
        match parse_channel(listing, self.channel) {
            Some(mv) => {
                debug!("{}={} mV", self.channel, mv);
                Reading::Millivolts(mv)
            }
            None => {
                warn!("channel {} missing or malformed in ADC output", self.channel);
                Reading::Unavailable
            }
        }
    }
}

/// Find `label` in a `<label>=<value>` listing and parse its value.
///
/// Lines may come in any order and other channels are ignored.  When the
/// label repeats, the last line wins.  Returns `None` if the label is
/// absent or its value has no leading integer.
pub fn parse_channel(listing: &str, label: &str) -> Option<i32> {
    let value = listing
        .lines()
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| key.trim() == label)
        .map(|(_, value)| value)
        .last()?;
    leading_int(value)
}

/// Parse the integer prefix of `s`: leading whitespace, an optional sign,
/// then digits.  Anything after the digits (units, newline) is ignored.
fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}
