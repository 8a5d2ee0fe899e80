//! The status display: a row of labelled slots above a scrolling log.
//!
//! [`StatusDisplay`] owns everything with state (the surface, the
//! [`LogRing`] and the [`SlotTable`]) and is the only way callers draw.
//! It is constructed once at startup and handed to whichever task owns
//! the panel; it has no internal locking, so calls must be serialised by
//! the owner (see [`crate::display_task`] when the `task` feature is on).
//!
//! # Layout
//!
//! ```text
//! ┌────────┐┌─┐┌───┐┌─┐        ← slot row, y = 0 .. slot_height
//! │ slot 0 ││1││ 2 ││3│
//! └────────┘└─┘└───┘└─┘
//!  oldest log line              ← log_top
//!  ...
//!  newest log line              ← log_top + 4 * line_height
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::error::StatusError;
use crate::layout::{DisplayConfig, SlotGeometry, SlotTable};
use crate::log::LogRing;
use crate::surface::DisplaySurface;

/// Slot row plus scrolling log, drawn on a [`DisplaySurface`].
///
/// # Example
///
/// ```
/// use status_oled_display_rs::{
///     DisplayConfig, FrameBuffer, GfxSurface, SlotTable, StatusDisplay,
/// };
/// use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
///
/// let surface = GfxSurface::new(FrameBuffer::new());
/// let mut status = StatusDisplay::new(surface, SlotTable::default(), DisplayConfig::default());
///
/// status.initialize_display();
/// status.show_label(0, Rgb565::GREEN, "WIFI").unwrap();
/// status.append_line("boot ok");
/// ```
pub struct StatusDisplay<S> {
    surface: S,
    slots: SlotTable,
    log: LogRing,
    config: DisplayConfig,
}

impl<S> StatusDisplay<S>
where
    S: DisplaySurface,
{
    /// Compose a status display. No drawing happens until
    /// [`initialize_display()`](Self::initialize_display).
    pub fn new(surface: S, slots: SlotTable, config: DisplayConfig) -> Self {
        Self {
            surface,
            slots,
            log: LogRing::new(),
            config,
        }
    }

    /// Prepare the surface and clear the screen.
    ///
    /// Must be called once before any other drawing operation. Hardware
    /// bring-up of a physical panel happens in
    /// [`OledDriver::init()`](crate::OledDriver::init) beforehand.
    pub fn initialize_display(&mut self) {
        self.surface.initialize();
        self.clear_screen();
    }

    /// Fill the whole screen with the background colour.
    ///
    /// The log ring keeps its content: the next
    /// [`append_line()`](Self::append_line) redraws every retained line.
    /// Use [`redraw_log()`](Self::redraw_log) to restore the log at once.
    pub fn clear_screen(&mut self) {
        self.surface.clear_screen(self.config.background);
    }

    /// Redraw one slot of the status row.
    ///
    /// Draw order: erase the interior (inset 1 px), stroke the rounded
    /// border in `color`, then print `text` in `color` at the padded
    /// origin, clipped to the interior. Other slots and the log region are
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::InvalidSlotIndex`] if `slot` is outside the
    /// slot table. Nothing is drawn in that case.
    pub fn show_label(&mut self, slot: usize, color: Rgb565, text: &str) -> Result<(), StatusError> {
        let SlotGeometry { x, y, width, height } = self.slots.geometry(slot, &self.config)?;
        let pad = self.config.label_padding;
        let interior = Rectangle::new(
            Point::new(x + 1, y + 1),
            Size::new(width.saturating_sub(2), height.saturating_sub(2)),
        );

        self.surface.fill_rect(
            interior.top_left.x,
            interior.top_left.y,
            interior.size.width,
            interior.size.height,
            self.config.background,
        );
        self.surface
            .draw_round_rect(x, y, width, height, self.config.slot_corner_radius, color);
        self.surface.set_cursor(x + pad, y + pad);
        self.surface.set_text_color(color);
        // Labels wider than the slot are cut at its border.
        self.surface.print_clipped(text, interior);
        Ok(())
    }

    /// Append a line to the log and redraw the log region.
    ///
    /// Empty input and a lone `"\n"` are ignored. Longer lines are cut to
    /// [`LINE_CHARS`](crate::log::LINE_CHARS) characters. On a headless
    /// surface the raw text goes to the console and the log is untouched.
    pub fn append_line(&mut self, text: &str) {
        if self.surface.is_headless() {
            self.surface.write_console(text);
            return;
        }

        if self.log.push(text) {
            self.redraw_log();
        }
    }

    /// Repaint the log region from the ring, oldest line on top.
    ///
    /// Clears everything below the slot row, then prints all
    /// [`LOG_CAPACITY`](crate::log::LOG_CAPACITY) slots on successive rows.
    /// Slots that were never written print as blank rows.
    pub fn redraw_log(&mut self) {
        let config = &self.config;
        let top = config.log_top;
        let region_height = self.surface.height().saturating_sub(top.max(0) as u32);
        let width = self.surface.width();

        self.surface.fill_rect(0, top, width, region_height, config.background);
        for (row, line) in self.log.lines().enumerate() {
            self.surface.set_cursor(0, top + row as i32 * config.line_height);
            self.surface.set_text_color(config.foreground);
            self.surface.print_line(line);
        }
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tear down and return the drawing surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The log ring.
    pub fn log(&self) -> &LogRing {
        &self.log
    }

    /// The slot table.
    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    /// The layout configuration.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
