//! Device lifecycle: attach, detach.
//!
//! ```text
//! (transport) --attach ok--> Nunchuk (polling) --detach--> (transport)
//!      |
//!      +--handshake/registration failed--> AttachError
//! ```
//!
//! A [`Nunchuk`] only exists between a successful attach and its detach, so
//! every handle the scheduler holds is one it may tick. A failed attach is
//! terminal for that transport; nothing is retried.

use crate::config::{NunchukConfig, PollCadence};
use crate::input::NUNCHUK_INFO;
use crate::protocol;
use crate::registry::{DriverRegistry, NUNCHUK_DRIVER};
use crate::sink::{EventSink, SinkError};
use crate::transport::{Transport, TransportError};
use crate::types::RawResponse;
use embedded_hal::delay::DelayNs as BlockingDelayNs;
use embedded_hal_async::delay::DelayNs;
use rand::RngCore;

/// Error type for attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttachError<E> {
    /// The compatibility string is not handled by this driver.
    NoMatch,
    /// The initialization handshake failed.
    Handshake(TransportError<E>),
    /// The event sink refused the device.
    Register(SinkError),
}

/// One attached Wii Nunchuk.
///
/// Holds the transport handle, which may be a non-owning handle on a shared
/// bus, plus the delay provider and the jitter source for the settle delays.
/// No protocol state is kept between polls.
pub struct Nunchuk<T, D, R> {
    transport: T,
    delay: D,
    rng: R,
    config: NunchukConfig,
}

impl<T, D, R> Nunchuk<T, D, R> {
    #[inline]
    #[must_use]
    pub fn config(&self) -> &NunchukConfig {
        &self.config
    }

    /// Poll cadence the scheduler should drive [`crate::on_poll_tick`] at.
    #[inline]
    #[must_use]
    pub fn cadence(&self) -> PollCadence {
        self.config.cadence
    }
}

impl<T, D, R> Nunchuk<T, D, R>
where
    T: Transport,
    D: DelayNs + BlockingDelayNs,
    R: RngCore,
{
    /// Run the handshake and register the device with `sink`.
    ///
    /// Returns a device that is ready to poll. On any failure `sink` is left
    /// untouched and the transport is dropped.
    pub async fn attach<S: EventSink>(
        mut transport: T,
        mut delay: D,
        rng: R,
        config: NunchukConfig,
        sink: &mut S,
    ) -> Result<Self, AttachError<T::Error>> {
        protocol::initialize(&mut transport, &mut delay, &config)
            .await
            .map_err(AttachError::Handshake)?;

        sink.register(&NUNCHUK_INFO).map_err(AttachError::Register)?;

        Ok(Self {
            transport,
            delay,
            rng,
            config,
        })
    }

    /// Attach if the registry routes `compatible` to the Nunchuk driver.
    ///
    /// An unknown identifier is refused with [`AttachError::NoMatch`] before
    /// the bus is touched.
    pub async fn attach_matching<S: EventSink, const N: usize>(
        registry: &DriverRegistry<N>,
        compatible: &str,
        transport: T,
        delay: D,
        rng: R,
        config: NunchukConfig,
        sink: &mut S,
    ) -> Result<Self, AttachError<T::Error>> {
        match registry.find(compatible) {
            Some(entry) if entry.name == NUNCHUK_DRIVER.name => {
                Self::attach(transport, delay, rng, config, sink).await
            }
            _ => Err(AttachError::NoMatch),
        }
    }

    /// Read one register snapshot.
    pub async fn read_state(&mut self) -> Result<RawResponse, TransportError<T::Error>> {
        protocol::read_state(&mut self.transport, &mut self.delay, &mut self.rng, &self.config).await
    }

    /// Unregister from `sink` and give the transport handle back.
    ///
    /// The caller must make sure no tick is in flight, which holds whenever
    /// ticks and detach run on the same task.
    pub fn detach<S: EventSink>(self, sink: &mut S) -> T {
        sink.unregister();
        self.transport
    }
}
