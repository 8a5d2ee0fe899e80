//! Status board example
//!
//! Standalone hardware demonstration of the status display on an SSD1331
//! colour OLED. Fills the four status slots, then appends a numbered log
//! line every second so the log region scrolls once the five rows are full.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes              |
//! |-----------|------------|--------------------|
//! | SPI1 SCK  | GP14       |                    |
//! | SPI1 TX   | GP15       | OLED SDA / MOSI    |
//! | OLED CS   | GP13       | driven by SpiDevice |
//! | OLED DC   | GP16       | data/command       |
//! | OLED RST  | GP4        |                    |
//! | OLED VCC  | 3V3        |                    |
//! | OLED GND  | GND        |                    |

#![no_std]
#![no_main]

use core::fmt::Write as _;

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use status_oled_display_rs::{
    status_display_task, DisplayConfig, FrameBuffer, FrameStatusDisplay, GfxSurface, OledDriver,
    PanelOrientation, SlotTable, StatusChannel, StatusCommand, StatusDisplay,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

type SpiBus = Spi<'static, SPI1, spi::Async>;
type OledSpi = SpiDevice<'static, CriticalSectionRawMutex, SpiBus, Output<'static>>;

/// SPI1 is used exclusively by the OLED in this example.
static SPI_BUS: StaticCell<Mutex<CriticalSectionRawMutex, SpiBus>> = StaticCell::new();

/// Every status update goes through this queue.
static STATUS: StatusChannel<8> = StatusChannel::new();

/// Thin wrapper that monomorphises the generic `status_display_task`.
#[embassy_executor::task]
async fn status_task(
    driver: OledDriver<OledSpi, Output<'static>>,
    rst: Output<'static>,
    status: FrameStatusDisplay,
) {
    status_display_task(driver, rst, Delay, status, &STATUS).await;
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Status board example starting");

    let mut config = spi::Config::default();
    config.frequency = 8_000_000;
    let spi = Spi::new_txonly(p.SPI1, p.PIN_14, p.PIN_15, p.DMA_CH0, config);
    let bus = SPI_BUS.init(Mutex::new(spi));

    let cs = Output::new(p.PIN_13, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let rst = Output::new(p.PIN_4, Level::High);

    let driver = OledDriver::new(SpiDevice::new(bus, cs), dc, PanelOrientation::Normal);
    let status = StatusDisplay::new(
        GfxSurface::new(FrameBuffer::new()),
        SlotTable::default(),
        DisplayConfig::default(),
    );
    unwrap!(spawner.spawn(status_task(driver, rst, status)));

    STATUS.send(StatusCommand::show_label(0, Rgb565::GREEN, "WIFI")).await;
    STATUS.send(StatusCommand::show_label(1, Rgb565::YELLOW, "B")).await;
    STATUS.send(StatusCommand::show_label(2, Rgb565::CYAN, "MQ")).await;
    STATUS.send(StatusCommand::show_label(3, Rgb565::RED, "!")).await;
    STATUS.send(StatusCommand::append_line("boot ok")).await;

    let mut n: u32 = 0;
    loop {
        Timer::after(Duration::from_secs(1)).await;
        n += 1;

        let mut line: heapless::String<16> = heapless::String::new();
        let _ = write!(line, "tick {}", n);
        STATUS.send(StatusCommand::append_line(&line)).await;
    }
}
