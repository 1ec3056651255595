//! Transport trait, transfer errors, and the I2C adapter.

use core::future::Future;
use embedded_hal_async::i2c::I2c;

/// Default 7-bit I2C address of the Nunchuk.
pub const NUNCHUK_I2C_ADDR: u8 = 0x52;

/// Error type for a single bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// The underlying bus reported a failure. Carried unchanged.
    Bus(E),
    /// The bus succeeded but moved the wrong number of bytes.
    CountMismatch { expected: usize, actual: usize },
}

impl<E> TransportError<E> {
    /// Check a transfer result against the expected byte count.
    ///
    /// Bus errors pass through; a mismatched count becomes
    /// [`TransportError::CountMismatch`].
    #[inline]
    pub fn check(result: Result<usize, E>, expected: usize) -> Result<(), Self> {
        match result {
            Ok(actual) if actual == expected => Ok(()),
            Ok(actual) => Err(TransportError::CountMismatch { expected, actual }),
            Err(e) => Err(TransportError::Bus(e)),
        }
    }
}

/// Async byte transport to a single bus device.
///
/// Both operations report the number of bytes actually moved so callers can
/// validate transfers the way the bus reports them.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait Transport {
    /// Opaque bus error, propagated unchanged.
    type Error;

    /// Send `bytes` to the device, returning how many were accepted.
    fn send(&mut self, bytes: &[u8]) -> impl Future<Output = Result<usize, Self::Error>>;

    /// Receive into `buf`, returning how many bytes were filled.
    fn receive(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<usize, Self::Error>>;
}

/// [`Transport`] over an `embedded-hal-async` I2C bus at a fixed address.
///
/// `I` may be an exclusive bus or a shared-bus device handle such as
/// `embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice`.
/// The HAL either moves the whole buffer or fails, so a successful transfer
/// always reports the full length.
pub struct I2cTransport<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cTransport<I> {
    /// Create a transport for the device at `address`.
    #[must_use]
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Create a transport at the standard Nunchuk address (0x52).
    #[must_use]
    pub fn nunchuk(i2c: I) -> Self {
        Self::new(i2c, NUNCHUK_I2C_ADDR)
    }

    /// Get the device address.
    #[inline]
    #[must_use]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus handle back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> Transport for I2cTransport<I> {
    type Error = I::Error;

    async fn send(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        self.i2c.write(self.address, bytes).await?;
        Ok(bytes.len())
    }

    async fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.i2c.read(self.address, buf).await?;
        Ok(buf.len())
    }
}
