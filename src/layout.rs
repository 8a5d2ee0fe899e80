//! Display layout configuration and slot geometry.
//!
//! This module defines [`DisplayConfig`], the single source of layout
//! geometry and colours, and the immutable [`SlotTable`] that places the
//! labelled status slots across the top row of the screen.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::error::StatusError;

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Configuration for the status layout and the display update task.
///
/// All layout geometry lives here. The only module-level sizes are the
/// log buffer dimensions, which are fixed at the type level (see
/// [`crate::log`]).
///
/// [`DisplayConfig::default()`] reproduces the original panel geometry
/// (12 px slot row, 10 px log rows, white text on black).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Flush rate of the display task in Hz. Default: 30. Max: 1000.
    pub update_frequency_hz: u32,

    // ── Colours ──────────────────────────────────────────────────────
    /// Erase colour for the screen, slot interiors and the log region.
    pub background: Rgb565,
    /// Text colour of log lines.
    pub foreground: Rgb565,

    // ── Slot row ─────────────────────────────────────────────────────
    /// Pixel advance per label character. Default: 8.
    pub char_advance: u32,
    /// Horizontal gap between neighbouring slots. Default: 1.
    pub slot_gap: u32,
    /// Height of the slot row, starting at y = 0. Default: 12.
    pub slot_height: u32,
    /// Corner radius of the slot border. Default: 3.
    pub slot_corner_radius: u32,
    /// Offset of the label text from the slot's top-left corner. Default: 2.
    pub label_padding: i32,

    // ── Log region ───────────────────────────────────────────────────
    /// First pixel row of the log region. Default: 12.
    pub log_top: i32,
    /// Height of one log text row. Default: 10.
    pub line_height: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 30,
            background: Rgb565::BLACK,
            foreground: Rgb565::WHITE,
            char_advance: 8,
            slot_gap: 1,
            slot_height: 12,
            slot_corner_radius: 3,
            label_padding: 2,
            log_top: 12,
            line_height: 10,
        }
    }
}

impl DisplayConfig {
    /// Convert the configured frequency to a timer period in milliseconds.
    ///
    /// Formula: `1000 / update_frequency_hz`. A zero frequency is treated
    /// as 1 Hz.
    pub fn update_period_ms(&self) -> u64 {
        1000 / self.update_frequency_hz.max(1) as u64
    }
}

// ── SlotTable ────────────────────────────────────────────────────────────

/// Label-column widths (in characters) of the wired status row.
pub const DEFAULT_SLOT_WIDTHS: [u8; 4] = [5, 1, 2, 1];

/// Pixel placement of one status slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotGeometry {
    /// Left edge of the slot box.
    pub x: i32,
    /// Top edge of the slot box (always 0: the slot row is the top row).
    pub y: i32,
    /// Width of the slot box.
    pub width: u32,
    /// Height of the slot box.
    pub height: u32,
}

/// Ordered, immutable table of slot widths.
///
/// Slot `i` starts after every earlier slot plus a one-gap separator:
///
/// ```text
///  x=0             x=41   x=50        x=67
/// ┌───────────────┐ ┌────┐ ┌─────────┐ ┌────┐
/// │ slot 0 (5 ch) │ │ 1  │ │ 2 (2ch) │ │ 3  │   ← slot_height
/// └───────────────┘ └────┘ └─────────┘ └────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTable {
    widths: &'static [u8],
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new(&DEFAULT_SLOT_WIDTHS)
    }
}

impl SlotTable {
    /// Wrap a static width table.
    pub const fn new(widths: &'static [u8]) -> Self {
        Self { widths }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Returns `true` if the table has no slots.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Label width of every slot, in characters.
    pub fn widths(&self) -> &'static [u8] {
        self.widths
    }

    /// Compute the box of `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::InvalidSlotIndex`] if `slot >= self.len()`.
    pub fn geometry(&self, slot: usize, config: &DisplayConfig) -> Result<SlotGeometry, StatusError> {
        let width = *self.widths.get(slot).ok_or(StatusError::InvalidSlotIndex)?;

        let x: u32 = self.widths[..slot]
            .iter()
            .map(|&w| w as u32 * config.char_advance + config.slot_gap)
            .sum();

        Ok(SlotGeometry {
            x: x as i32,
            y: 0,
            width: width as u32 * config.char_advance,
            height: config.slot_height,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
