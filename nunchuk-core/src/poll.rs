//! Poll tick: read, decode, report.

use crate::decode::decode;
use crate::device::Nunchuk;
use crate::input::{Axis, Key};
use crate::sink::{EventSink, SinkError};
use crate::transport::{Transport, TransportError};
use crate::types::NunchukState;
use embedded_hal::delay::DelayNs as BlockingDelayNs;
use embedded_hal_async::delay::DelayNs;
use rand::RngCore;

/// What a single poll tick did.
///
/// The scheduler logs from this; the tick itself never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome<E> {
    /// A full batch was reported and synced.
    Reported(NunchukState),
    /// The read failed; nothing was reported.
    Skipped(TransportError<E>),
    /// The batch was reported but the sink failed to sync it.
    SinkFailed(SinkError),
}

/// Report one decoded snapshot: C, Z, X, Y. Does not sync.
pub fn report<S: EventSink>(sink: &mut S, state: &NunchukState) {
    sink.report_key(Key::C, state.button_c_pressed);
    sink.report_key(Key::Z, state.button_z_pressed);
    sink.report_abs(Axis::X, i32::from(state.axis_x));
    sink.report_abs(Axis::Y, i32::from(state.axis_y));
}

/// Scheduler callback for one device.
///
/// A failed read is skipped; the next tick simply tries again. Errors never
/// leave this function except as the returned outcome.
pub async fn on_poll_tick<T, D, R, S>(
    device: &mut Nunchuk<T, D, R>,
    sink: &mut S,
) -> TickOutcome<T::Error>
where
    T: Transport,
    D: DelayNs + BlockingDelayNs,
    R: RngCore,
    S: EventSink,
{
    let raw = match device.read_state().await {
        Ok(raw) => raw,
        Err(e) => return TickOutcome::Skipped(e),
    };

    let state = decode(&raw);
    report(sink, &state);

    match sink.sync().await {
        Ok(()) => TickOutcome::Reported(state),
        Err(e) => TickOutcome::SinkFailed(e),
    }
}

/// An attached device paired with the sink it reports to.
///
/// This is what a scheduler task owns: call [`InputPoller::poll_once`] at the
/// device's cadence, [`InputPoller::detach`] at the end.
pub struct InputPoller<T, D, R, S> {
    device: Nunchuk<T, D, R>,
    sink: S,
}

impl<T, D, R, S> InputPoller<T, D, R, S>
where
    T: Transport,
    D: DelayNs + BlockingDelayNs,
    R: RngCore,
    S: EventSink,
{
    /// Pair a device with the sink it was attached to.
    pub fn new(device: Nunchuk<T, D, R>, sink: S) -> Self {
        Self { device, sink }
    }

    /// Process a single tick.
    ///
    /// Returns the outcome for logging and testing purposes.
    pub async fn poll_once(&mut self) -> TickOutcome<T::Error> {
        on_poll_tick(&mut self.device, &mut self.sink).await
    }

    /// Unregister from the sink and hand back the transport and the sink.
    pub fn detach(self) -> (T, S) {
        let Self { device, mut sink } = self;
        let transport = device.detach(&mut sink);
        (transport, sink)
    }

    /// Get a reference to the device.
    pub fn device(&self) -> &Nunchuk<T, D, R> {
        &self.device
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
