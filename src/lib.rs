//! Status display for an SSD1331 (96×64) colour OLED over SPI.
//!
//! The screen is split into two regions:
//!
//! - a **status row** of labelled, rounded slots across the top, redrawn
//!   one slot at a time with [`StatusDisplay::show_label`];
//! - a **scrolling log** underneath, holding the five most recent lines
//!   (16 characters each) and redrawn on every
//!   [`StatusDisplay::append_line`].
//!
//! Drawing goes through the [`DisplaySurface`] trait. [`GfxSurface`] renders
//! into an `embedded-graphics` target (normally a [`FrameBuffer`] pushed to
//! the panel by [`OledDriver`]); [`ConsoleSurface`] is the headless variant
//! that prints log lines to a text console instead.
//!
//! # Quick Start
//!
//! ```ignore
//! use status_oled_display_rs::{
//!     status_display_task, DisplayConfig, FrameBuffer, GfxSurface, OledDriver,
//!     PanelOrientation, SlotTable, StatusChannel, StatusCommand, StatusDisplay,
//! };
//!
//! static STATUS: StatusChannel<8> = StatusChannel::new();
//!
//! // In your Embassy main:
//! let driver = OledDriver::new(spi_device, dc, PanelOrientation::Normal);
//! let status = StatusDisplay::new(
//!     GfxSurface::new(FrameBuffer::new()),
//!     SlotTable::default(),
//!     DisplayConfig::default(),
//! );
//! spawner.spawn(status_task(driver, rst, status)).unwrap();
//!
//! // From any task:
//! STATUS.send(StatusCommand::append_line("boot ok")).await;
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** *(default)* — structured logging via [`defmt`].
//! - **`task`** — [`status_display_task`] and its command channel
//!   (pulls in `embassy-sync` and `embassy-time`).

#![no_std]

#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod framebuffer;
pub mod layout;
pub mod log;
pub mod status;
pub mod surface;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

#[cfg(feature = "task")]
pub use display_task::{status_display_task, FrameStatusDisplay, StatusChannel, StatusCommand};
pub use driver::{OledDriver, PanelOrientation};
pub use error::{OledError, StatusError};
pub use framebuffer::FrameBuffer;
pub use layout::{DisplayConfig, SlotGeometry, SlotTable, DEFAULT_SLOT_WIDTHS};
pub use log::{LogRing, LINE_CHARS, LOG_CAPACITY};
pub use status::StatusDisplay;
pub use surface::{ConsoleSurface, DisplaySurface, GfxSurface};
