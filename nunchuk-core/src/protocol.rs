//! Register read cycle and initialization handshake.
//!
//! Two different delay kinds are used:
//!
//! - settle delays around a register read await an
//!   [`embedded_hal_async::delay::DelayNs`], suspending only the polling task;
//! - the handshake pause is a blocking [`embedded_hal::delay::DelayNs`] so no
//!   other bus traffic can slip in between the two writes.

use crate::config::NunchukConfig;
use crate::transport::{Transport, TransportError};
use crate::types::{RawResponse, RESPONSE_LEN};
use embedded_hal::delay::DelayNs as BlockingDelayNs;
use embedded_hal_async::delay::DelayNs;
use rand::{Rng, RngCore};

/// Byte written to request a fresh register snapshot.
pub const READ_TRIGGER: [u8; 1] = [0x00];

/// First handshake write.
pub const HANDSHAKE_FIRST: [u8; 2] = [0xF0, 0x55];

/// Second handshake write.
pub const HANDSHAKE_SECOND: [u8; 2] = [0xFB, 0x00];

/// Pick a settle delay in `[settle_min_us, settle_max_us)`.
fn settle_us<R: RngCore>(rng: &mut R, config: &NunchukConfig) -> u32 {
    if config.settle_max_us > config.settle_min_us {
        rng.random_range(config.settle_min_us..config.settle_max_us)
    } else {
        config.settle_min_us
    }
}

/// Read one 6-byte register snapshot.
///
/// Sequence: settle, send the trigger byte, settle, receive 6 bytes.
/// Fails on the first transfer whose byte count is off; nothing is retried.
pub async fn read_state<T, D, R>(
    transport: &mut T,
    delay: &mut D,
    rng: &mut R,
    config: &NunchukConfig,
) -> Result<RawResponse, TransportError<T::Error>>
where
    T: Transport,
    D: DelayNs,
    R: RngCore,
{
    delay.delay_us(settle_us(rng, config)).await;

    TransportError::check(transport.send(&READ_TRIGGER).await, READ_TRIGGER.len())?;

    delay.delay_us(settle_us(rng, config)).await;

    let mut buf = [0u8; RESPONSE_LEN];
    TransportError::check(transport.receive(&mut buf).await, RESPONSE_LEN)?;

    Ok(RawResponse::new(buf))
}

/// Put the device into readable (unencrypted) mode.
///
/// Sends `F0 55`, busy-waits, then sends `FB 00`. No response is read.
pub async fn initialize<T, D>(
    transport: &mut T,
    delay: &mut D,
    config: &NunchukConfig,
) -> Result<(), TransportError<T::Error>>
where
    T: Transport,
    D: BlockingDelayNs,
{
    TransportError::check(
        transport.send(&HANDSHAKE_FIRST).await,
        HANDSHAKE_FIRST.len(),
    )?;

    // Must not yield: the second write has to follow on an idle bus.
    BlockingDelayNs::delay_us(delay, config.handshake_delay_us);

    TransportError::check(
        transport.send(&HANDSHAKE_SECOND).await,
        HANDSHAKE_SECOND.len(),
    )?;

    Ok(())
}
