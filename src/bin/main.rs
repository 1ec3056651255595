#![no_std]
#![no_main]

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, Config as I2cConfig, I2c};
use embassy_rp::peripherals::{I2C0, USB};
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Instant, Ticker};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use nunchuk_to_gamepad::{
    configure_usb_hid, DriverRegistry, I2cTransport, InputPoller, Nunchuk, NunchukConfig,
    TickOutcome, UsbHidSink, NUNCHUK_COMPATIBLE, NUNCHUK_DRIVER,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// I2C bus frequency. The Nunchuk only supports standard mode.
const I2C_FREQUENCY_HZ: u32 = 100_000;

/// What sits on I2C0. There is no device tree; the board is described here.
const BOARD_I2C0_COMPATIBLE: &str = NUNCHUK_COMPATIBLE;

type I2cBus = Mutex<NoopRawMutex, I2c<'static, I2C0, i2c::Async>>;
type NunchukTransport = I2cTransport<I2cDevice<'static, NoopRawMutex, I2c<'static, I2C0, i2c::Async>>>;
type NunchukPoller = InputPoller<NunchukTransport, Delay, SmallRng, UsbHidSink<'static>>;

/// Shared I2C bus, one `I2cDevice` per controller.
static I2C_BUS: StaticCell<I2cBus> = StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nunchuk-to-Gamepad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- I2C Setup ---
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_5, // SCL
        p.PIN_4, // SDA
        Irqs,
        i2c_config,
    );
    let i2c_bus = I2C_BUS.init(Mutex::new(i2c));

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Gamepad");
    usb_config.product = Some("Nunchuk-to-Gamepad");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state);

    // Build the USB device
    let usb_device = builder.build();

    let sink = UsbHidSink::new(hid_writer);

    // --- Device matching ---
    let mut registry = DriverRegistry::<1>::new();
    if let Err(e) = registry.register(NUNCHUK_DRIVER) {
        error!("Driver registration failed: {:?}", e);
    }

    let transport = I2cTransport::nunchuk(I2cDevice::new(i2c_bus));
    // Jitter only needs to differ between boots, not be unpredictable.
    let rng = SmallRng::seed_from_u64(Instant::now().as_ticks());

    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(nunchuk_task(registry, transport, rng, sink).unwrap());

    info!("Nunchuk-to-Gamepad initialized, waiting for host...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Nunchuk task - attaches the controller, then polls it at its fixed cadence.
///
/// Ticks run one after another on this task, so a read never overlaps the
/// next one. A failed attach ends the task without registering anything.
/// The Nunchuk is wired to the board, so once attached it is never detached.
#[embassy_executor::task]
async fn nunchuk_task(
    registry: DriverRegistry<1>,
    transport: NunchukTransport,
    rng: SmallRng,
    mut sink: UsbHidSink<'static>,
) {
    // Wait for USB to be ready
    sink.wait_ready().await;
    info!("USB HID ready, attaching Nunchuk...");

    let device = match Nunchuk::attach_matching(
        &registry,
        BOARD_I2C0_COMPATIBLE,
        transport,
        Delay,
        rng,
        NunchukConfig::default(),
        &mut sink,
    )
    .await
    {
        Ok(device) => device,
        Err(e) => {
            error!("Nunchuk attach failed on '{}': {:?}", BOARD_I2C0_COMPATIBLE, e);
            return;
        }
    };

    let cadence = device.cadence();
    info!("Nunchuk attached, polling every {} ms", cadence.nominal_ms);
    let mut poller: NunchukPoller = InputPoller::new(device, sink);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(cadence.nominal_ms)));
    loop {
        ticker.next().await;

        match poller.poll_once().await {
            TickOutcome::Reported(_) => {}
            TickOutcome::Skipped(e) => warn!("Nunchuk read skipped: {:?}", e),
            TickOutcome::SinkFailed(e) => warn!("USB report failed: {:?}", e),
        }
    }
}
