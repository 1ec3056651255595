//! Core Nunchuk types: RawResponse, NunchukState.

/// Number of bytes returned by a single register read.
pub const RESPONSE_LEN: usize = 6;

/// A raw register snapshot as read from the device.
///
/// Layout:
///
/// | Byte | Content |
/// |------|---------|
/// | 0    | Joystick X |
/// | 1    | Joystick Y |
/// | 2..=4 | Accelerometer (unused) |
/// | 5    | Button bits (Z = bit 0, C = bit 1, cleared when pressed) |
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawResponse(pub [u8; RESPONSE_LEN]);

impl RawResponse {
    /// Bit in byte 5 carrying the Z button (cleared when pressed).
    pub const BUTTON_Z_BIT: u8 = 1 << 0;
    /// Bit in byte 5 carrying the C button (cleared when pressed).
    pub const BUTTON_C_BIT: u8 = 1 << 1;

    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; RESPONSE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RESPONSE_LEN] {
        &self.0
    }
}

impl From<[u8; RESPONSE_LEN]> for RawResponse {
    fn from(bytes: [u8; RESPONSE_LEN]) -> Self {
        Self(bytes)
    }
}

/// Decoded Nunchuk snapshot.
///
/// Axis values are passed through unscaled (0-255); range handling is the
/// event sink's job.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NunchukState {
    pub axis_x: u8,
    pub axis_y: u8,
    pub button_c_pressed: bool,
    pub button_z_pressed: bool,
}

impl NunchukState {
    #[must_use]
    pub const fn new(axis_x: u8, axis_y: u8, button_c_pressed: bool, button_z_pressed: bool) -> Self {
        Self {
            axis_x,
            axis_y,
            button_c_pressed,
            button_z_pressed,
        }
    }
}
