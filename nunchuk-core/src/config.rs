//! Timing and addressing constants.

use crate::transport::NUNCHUK_I2C_ADDR;

/// Polling cadence in milliseconds.
pub const POLL_INTERVAL_MS: u32 = 50;

/// Polling cadence.
///
/// The Nunchuk is sampled isochronously: minimum, maximum, and nominal
/// interval are all the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollCadence {
    pub min_ms: u32,
    pub max_ms: u32,
    pub nominal_ms: u32,
}

impl PollCadence {
    /// A cadence with identical min/max/nominal interval.
    #[must_use]
    pub const fn fixed(interval_ms: u32) -> Self {
        Self {
            min_ms: interval_ms,
            max_ms: interval_ms,
            nominal_ms: interval_ms,
        }
    }

    /// Check whether the cadence is isochronous.
    #[inline]
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.min_ms == self.nominal_ms && self.max_ms == self.nominal_ms
    }
}

impl Default for PollCadence {
    fn default() -> Self {
        Self::fixed(POLL_INTERVAL_MS)
    }
}

/// Device timing configuration.
///
/// The defaults are the values the hardware needs; tests shrink them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NunchukConfig {
    /// 7-bit I2C address.
    pub address: u8,
    /// Lower bound (inclusive) of the settle delay around a register read, in µs.
    pub settle_min_us: u32,
    /// Upper bound (exclusive) of the settle delay, in µs.
    pub settle_max_us: u32,
    /// Busy-wait between the two handshake writes, in µs.
    pub handshake_delay_us: u32,
    /// Poll cadence registered at attach time.
    pub cadence: PollCadence,
}

impl NunchukConfig {
    pub const DEFAULT: Self = Self {
        address: NUNCHUK_I2C_ADDR,
        settle_min_us: 10_000,
        settle_max_us: 20_000,
        handshake_delay_us: 1_000,
        cadence: PollCadence::fixed(POLL_INTERVAL_MS),
    };
}

impl Default for NunchukConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cadence_is_fixed_50ms() {
        let cadence = PollCadence::default();
        assert!(cadence.is_fixed());
        assert_eq!(cadence.nominal_ms, 50);
    }

    #[test]
    fn test_default_config() {
        let config = NunchukConfig::default();
        assert_eq!(config.address, 0x52);
        assert_eq!(config.settle_min_us, 10_000);
        assert_eq!(config.settle_max_us, 20_000);
        assert_eq!(config.handshake_delay_us, 1_000);
    }
}
