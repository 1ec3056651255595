//! Register snapshot decoding.

use crate::types::{NunchukState, RawResponse};

/// Decode a raw register snapshot into a [`NunchukState`].
///
/// Buttons use the inverted-bit convention: a cleared bit means pressed.
/// Bytes 2 to 4 carry accelerometer data and are ignored.
///
/// # Example
///
/// ```
/// use nunchuk_core::{decode, RawResponse};
///
/// let state = decode(&RawResponse::new([100, 150, 0, 0, 0, 0b10]));
/// assert_eq!(state.axis_x, 100);
/// assert!(state.button_z_pressed);
/// assert!(!state.button_c_pressed);
/// ```
#[inline]
#[must_use]
pub fn decode(raw: &RawResponse) -> NunchukState {
    let bytes = raw.as_bytes();
    let buttons = bytes[5];

    NunchukState {
        axis_x: bytes[0],
        axis_y: bytes[1],
        button_c_pressed: buttons & RawResponse::BUTTON_C_BIT == 0,
        button_z_pressed: buttons & RawResponse::BUTTON_Z_BIT == 0,
    }
}
