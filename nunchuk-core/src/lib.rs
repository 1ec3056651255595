//! Platform-agnostic Wii Nunchuk driver core.
//!
//! This crate provides the Nunchuk protocol, decoding, and lifecycle without
//! any platform-specific dependencies. It can be used both in embedded
//! `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`transport`]: Bus transport trait ([`Transport`]) and the I2C adapter ([`I2cTransport`])
//! - [`protocol`]: Initialization handshake ([`initialize`]) and register read ([`read_state`])
//! - [`decode`](mod@decode): Raw snapshot to [`NunchukState`]
//! - [`sink`]: Event sink trait ([`EventSink`])
//! - [`input`]: Keys, axes, [`AbsInfo`], and the [`InputFrame`] used by sinks
//! - [`device`]: Lifecycle ([`Nunchuk`], attach/detach)
//! - [`poll`]: Poll tick ([`on_poll_tick`], [`InputPoller`])
//! - [`registry`]: Compatibility-string matching ([`DriverRegistry`])
//!
//! # Protocol
//!
//! ```text
//! attach:  W F0 55 | busy-wait 1 ms | W FB 00
//! poll:    wait 10-20 ms | W 00 | wait 10-20 ms | R 6 bytes
//! ```
//!
//! | Byte | Content |
//! |------|---------|
//! | 0    | Joystick X |
//! | 1    | Joystick Y |
//! | 5    | bit 0: Z released, bit 1: C released |
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod decode;
pub mod device;
pub mod input;
pub mod poll;
pub mod protocol;
pub mod registry;
pub mod sink;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_util;

// Re-export main types at crate root
pub use config::{NunchukConfig, PollCadence, POLL_INTERVAL_MS};
pub use decode::decode;
pub use device::{AttachError, Nunchuk};
pub use input::{
    AbsInfo, Axis, BusType, InputDeviceInfo, InputFrame, Key, KeyMask, NUNCHUK_ABS_X,
    NUNCHUK_ABS_Y, NUNCHUK_INFO, NUNCHUK_KEYS,
};
pub use poll::{on_poll_tick, report, InputPoller, TickOutcome};
pub use protocol::{initialize, read_state};
pub use registry::{
    DriverEntry, DriverRegistry, RegistryError, NUNCHUK_COMPATIBLE, NUNCHUK_DRIVER,
};
pub use sink::{EventSink, SinkError};
pub use transport::{I2cTransport, Transport, TransportError, NUNCHUK_I2C_ADDR};
pub use types::{NunchukState, RawResponse, RESPONSE_LEN};
