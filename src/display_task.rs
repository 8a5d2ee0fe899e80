//! Display update task and its command queue.
//!
//! The renderers have no internal locking, so every update from the rest
//! of the firmware goes through one [`StatusChannel`] and is applied by a
//! single [`status_display_task`] that owns both the driver and the
//! [`StatusDisplay`].
//!
//! defmt has no global logger in host test builds, so the log calls here
//! are compiled out under `cfg(test)`. Run these tests with
//! `cargo test --features task`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};
use heapless::String;

use crate::driver::OledDriver;
use crate::framebuffer::FrameBuffer;
use crate::log::{truncate_line, LogLine};
use crate::status::StatusDisplay;
use crate::surface::GfxSurface;

/// Byte capacity of a queued slot label.
pub const LABEL_BYTES: usize = 16;

/// One queued update for the status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCommand {
    /// Fill the screen with the background colour.
    Clear,
    /// Redraw one slot of the status row.
    ShowLabel {
        slot: usize,
        color: Rgb565,
        text: String<LABEL_BYTES>,
    },
    /// Append a line to the scrolling log.
    AppendLine(LogLine),
}

impl StatusCommand {
    /// Build a [`StatusCommand::ShowLabel`], cutting `text` to fit the queue.
    pub fn show_label(slot: usize, color: Rgb565, text: &str) -> Self {
        let mut label = String::new();
        for ch in text.chars() {
            if label.push(ch).is_err() {
                break;
            }
        }
        StatusCommand::ShowLabel {
            slot,
            color,
            text: label,
        }
    }

    /// Build a [`StatusCommand::AppendLine`]; the line is cut exactly as
    /// the log would cut it.
    pub fn append_line(text: &str) -> Self {
        StatusCommand::AppendLine(truncate_line(text))
    }
}

/// Queue feeding [`status_display_task`].
pub type StatusChannel<const N: usize> = Channel<CriticalSectionRawMutex, StatusCommand, N>;

/// Concrete status display drawn into a frame buffer.
pub type FrameStatusDisplay = StatusDisplay<GfxSurface<FrameBuffer>>;

/// Apply one command. Rejected slot updates are logged and dropped.
fn apply(status: &mut FrameStatusDisplay, command: StatusCommand) {
    match command {
        StatusCommand::Clear => status.clear_screen(),
        StatusCommand::ShowLabel { slot, color, text } => {
            if let Err(_e) = status.show_label(slot, color, &text) {
                #[cfg(all(feature = "defmt", not(test)))]
                defmt::warn!("Dropped label for slot {}: {}", slot, _e);
            }
        }
        StatusCommand::AppendLine(line) => status.append_line(&line),
    }
}

/// Status display update loop.
///
/// This is a regular `async fn` — **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper that calls this function,
/// since Embassy tasks cannot be generic:
///
/// ```ignore
/// static STATUS: StatusChannel<8> = StatusChannel::new();
///
/// #[embassy_executor::task]
/// async fn status_task(
///     driver: OledDriver<MySpiDevice, Output<'static>>,
///     rst: Output<'static>,
///     status: FrameStatusDisplay,
/// ) {
///     status_display_task(driver, rst, embassy_time::Delay, status, &STATUS).await;
/// }
///
/// // Anywhere else:
/// STATUS.send(StatusCommand::append_line("link up")).await;
/// ```
///
/// # Control flow
///
/// 1. Reset and initialise the panel, clear the frame, flush it.
/// 2. Loop:
///    - Wait for a command, then drain whatever else is queued.
///    - Apply the commands in arrival order.
///    - Flush the frame once.
///    - Sleep `config.update_period_ms()` so bursts coalesce into one flush.
///
/// # Errors
///
/// * Initialisation failure: logs the error and **returns** (task exits).
/// * Flush failure: logs the error and continues with the next batch.
pub async fn status_display_task<SPI, DC, RST, DELAY, const N: usize>(
    mut driver: OledDriver<SPI, DC>,
    mut rst: RST,
    mut delay: DELAY,
    mut status: FrameStatusDisplay,
    commands: &'static StatusChannel<N>,
) where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    // ── Initialisation ───────────────────────────────────────────────
    if let Err(_e) = driver.init(&mut rst, &mut delay).await {
        #[cfg(all(feature = "defmt", not(test)))]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    status.initialize_display();
    if let Err(_e) = driver.flush(status.surface().target()).await {
        #[cfg(all(feature = "defmt", not(test)))]
        defmt::error!("Flush failed: {}", _e);
    }

    #[cfg(all(feature = "defmt", not(test)))]
    defmt::info!("Status display initialised");

    let period = embassy_time::Duration::from_millis(status.config().update_period_ms());

    // ── Main loop ────────────────────────────────────────────────────
    loop {
        let first = commands.receive().await;
        apply(&mut status, first);
        while let Ok(next) = commands.try_receive() {
            apply(&mut status, next);
        }

        if let Err(_e) = driver.flush(status.surface().target()).await {
            #[cfg(all(feature = "defmt", not(test)))]
            defmt::error!("Flush failed: {}", _e);
        }

        embassy_time::Timer::after(period).await;
    }
}
