//! USB HID gamepad event sink.

use defmt::Format;
use embassy_usb::class::hid::{HidWriter, State};
use embassy_usb::Builder;
use nunchuk_core::{Axis, EventSink, InputDeviceInfo, InputFrame, Key, SinkError};

type UsbDriver<'d> = embassy_rp::usb::Driver<'d, embassy_rp::peripherals::USB>;

/// USB HID report structure.
///
/// This matches the HID report descriptor defined below.
/// Total size: 4 bytes (buttons: 2, stick: 2x1)
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Format)]
#[repr(C)]
pub struct NunchukReport {
    /// Button bitfield, bit n = [`Key`] with index n
    pub buttons: u16,
    /// Stick X (-127 to 127)
    pub x: i8,
    /// Stick Y (-127 to 127, positive is down)
    pub y: i8,
}

impl NunchukReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 4;

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons_bytes = self.buttons.to_le_bytes();
        [buttons_bytes[0], buttons_bytes[1], self.x as u8, self.y as u8]
    }
}

impl From<&InputFrame> for NunchukReport {
    fn from(frame: &InputFrame) -> Self {
        let (x, y) = frame.hid_stick();
        Self {
            buttons: frame.keys().raw(),
            x,
            y,
        }
    }
}

/// HID Gamepad Report Descriptor.
///
/// - 16 buttons (C, Z, then the 11 classic-controller buttons, 3 spare)
/// - 1 analog stick (X/Y, signed 8-bit)
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (16 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x10, //   Usage Maximum (Button 16)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x10, //   Report Count (16)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Stick ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x15, 0x81, //   Logical Minimum (-127)
    0x25, 0x7F, //   Logical Maximum (127)
    0x95, 0x02, //   Report Count (2)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// USB HID event sink.
///
/// Keeps an [`InputFrame`] for the registered device and sends one HID
/// report per sync in which something changed. A report that fails to go
/// out is sent again on the next sync.
pub struct UsbHidSink<'d> {
    writer: HidWriter<'d, UsbDriver<'d>, { NunchukReport::SIZE }>,
    frame: Option<InputFrame>,
}

impl<'d> UsbHidSink<'d> {
    /// Create a new sink from the given HID writer.
    pub fn new(writer: HidWriter<'d, UsbDriver<'d>, { NunchukReport::SIZE }>) -> Self {
        Self {
            writer,
            frame: None,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
    }
}

impl EventSink for UsbHidSink<'_> {
    fn register(&mut self, info: &InputDeviceInfo) -> Result<(), SinkError> {
        if self.frame.is_some() {
            return Err(SinkError::AlreadyRegistered);
        }
        self.frame = Some(InputFrame::new(info));
        Ok(())
    }

    fn unregister(&mut self) {
        self.frame = None;
    }

    fn report_key(&mut self, key: Key, pressed: bool) {
        if let Some(frame) = self.frame.as_mut() {
            frame.report_key(key, pressed);
        }
    }

    fn report_abs(&mut self, axis: Axis, value: i32) {
        if let Some(frame) = self.frame.as_mut() {
            frame.report_abs(axis, value);
        }
    }

    async fn sync(&mut self) -> Result<(), SinkError> {
        let Some(frame) = self.frame.as_mut() else {
            return Err(SinkError::NotReady);
        };
        if !frame.sync() {
            return Ok(());
        }

        let report = NunchukReport::from(&*frame);
        if self.writer.write(&report.as_bytes()).await.is_err() {
            frame.mark_undelivered();
            return Err(SinkError::Io);
        }
        Ok(())
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by [`UsbHidSink`].
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
) -> HidWriter<'d, UsbDriver<'d>, { NunchukReport::SIZE }> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: 10,
        max_packet_size: NunchukReport::SIZE as u16,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
