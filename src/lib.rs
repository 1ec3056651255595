//! Wii Nunchuk to USB Gamepad bridge for RP2040.
//!
//! This crate provides the embedded side of the Nunchuk driver: it polls a
//! Nunchuk over I2C and exposes it to the host as a USB HID gamepad.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | I2C0 SDA | 4    | Nunchuk data |
//! | I2C0 SCL | 5    | Nunchuk clock |
//!
//! The Nunchuk sits at address 0x52 on a 100 kHz bus.
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Nunchuk Task**: Attaches the Nunchuk, then polls it every 50 ms and
//!   forwards each snapshot to the [`UsbHidSink`]. It is also where the
//!   driver's diagnostics are logged, from the attach error and each
//!   [`TickOutcome`]; the core crate itself does not log.
//!
//! The I2C bus lives behind an Embassy mutex and each Nunchuk task holds an
//! `I2cDevice` handle on it, so more controllers can share the bus with their
//! own tasks.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`nunchuk_core`] that the
//! firmware wires together, so consumers only need to depend on this crate.

#![no_std]

// Re-export core types for convenience
pub use nunchuk_core::{
    decode, AttachError, DriverRegistry, EventSink, I2cTransport, InputPoller, Nunchuk,
    NunchukConfig, NunchukState, SinkError, TickOutcome, Transport, TransportError,
    NUNCHUK_COMPATIBLE, NUNCHUK_DRIVER,
};

pub mod usb_output;

pub use usb_output::{configure_usb_hid, NunchukReport, UsbHidSink};
