//! Event sink trait and error types.

use crate::input::{Axis, InputDeviceInfo, Key};
use core::future::Future;

/// Error type for event sink operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// USB/communication I/O error.
    Io,
    /// Sink not ready (e.g., USB not enumerated, or no device registered).
    NotReady,
    /// A device is already registered with this sink.
    AlreadyRegistered,
}

/// Destination for input events.
///
/// Reports are buffered until [`EventSink::sync`] marks the batch complete.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait EventSink {
    /// Declare a device's capabilities. Must succeed before any report.
    fn register(&mut self, info: &InputDeviceInfo) -> Result<(), SinkError>;

    /// Forget the registered device.
    fn unregister(&mut self);

    /// Report a key state.
    fn report_key(&mut self, key: Key, pressed: bool);

    /// Report an absolute axis value.
    fn report_abs(&mut self, axis: Axis, value: i32);

    /// Mark the reports since the last sync as one atomic batch.
    fn sync(&mut self) -> impl Future<Output = Result<(), SinkError>>;
}
