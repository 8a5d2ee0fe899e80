//! Display surface abstraction used by the status renderers.
//!
//! [`DisplaySurface`] is the small set of GFX-style primitives the
//! renderers need. Two implementations are provided:
//!
//! - [`GfxSurface`] draws into any `embedded-graphics` [`DrawTarget`]
//!   (normally the [`FrameBuffer`](crate::FrameBuffer) flushed by
//!   [`OledDriver`](crate::OledDriver)).
//! - [`ConsoleSurface`] is the headless variant: drawing is a no-op and log
//!   lines are written to a text console instead.

use core::fmt::Write;

use embedded_graphics::{
    draw_target::DrawTargetExt,
    mono_font::{ascii::FONT_6X10, MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle, RoundedRectangle},
    text::{Baseline, Text},
};

/// Minimal drawing capability of the status display.
///
/// All primitives are infallible: coordinates outside the panel are the
/// caller's responsibility and are clipped by the implementation.
pub trait DisplaySurface {
    /// Bring the surface to a drawable state. Default: nothing to do.
    fn initialize(&mut self) {}

    /// Fill the entire surface with `color`.
    fn clear_screen(&mut self, color: Rgb565);

    /// Fill a `w`×`h` rectangle whose top-left corner is `(x, y)`.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565);

    /// Stroke a 1 px rounded rectangle outline.
    fn draw_round_rect(&mut self, x: i32, y: i32, w: u32, h: u32, radius: u32, color: Rgb565);

    /// Move the text cursor (top-left of the next glyph).
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Colour used by subsequent [`print_line`](Self::print_line) calls.
    fn set_text_color(&mut self, color: Rgb565);

    /// Draw `text` at the cursor, then move the cursor to the start of the
    /// next text row.
    fn print_line(&mut self, text: &str);

    /// Like [`print_line`](Self::print_line), but no pixel outside `clip`
    /// is touched. Default: ignore the clip.
    fn print_clipped(&mut self, text: &str, _clip: Rectangle) {
        self.print_line(text);
    }

    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Returns `true` if this surface stands in for the panel with a text
    /// console.
    fn is_headless(&self) -> bool {
        false
    }

    /// Write one raw log line to the console. No-op for pixel surfaces.
    fn write_console(&mut self, _text: &str) {}
}

// ── GfxSurface ───────────────────────────────────────────────────────────

/// [`DisplaySurface`] over an `embedded-graphics` Rgb565 draw target.
///
/// Keeps the text cursor and text colour between calls, the way
/// Arduino-style GFX drivers do. Text is set in [`FONT_6X10`].
pub struct GfxSurface<D> {
    target: D,
    cursor: Point,
    text_color: Rgb565,
    font: &'static MonoFont<'static>,
}

impl<D> GfxSurface<D> {
    /// Wrap a draw target. The cursor starts at the origin, text is white.
    pub fn new(target: D) -> Self {
        Self {
            target,
            cursor: Point::zero(),
            text_color: Rgb565::WHITE,
            font: &FONT_6X10,
        }
    }

    /// The wrapped draw target.
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Mutable access to the wrapped draw target.
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Unwrap the draw target.
    pub fn into_inner(self) -> D {
        self.target
    }

    /// Current text cursor.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    fn text_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.font, self.text_color)
    }

    fn next_row(&mut self) {
        let advance = self.font.character_size.height as i32;
        self.cursor = Point::new(0, self.cursor.y + advance);
    }
}

impl<D> DisplaySurface for GfxSurface<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    fn initialize(&mut self) {
        self.cursor = Point::zero();
        self.text_color = Rgb565::WHITE;
    }

    fn clear_screen(&mut self, color: Rgb565) {
        self.target.clear(color).ok();
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_round_rect(&mut self, x: i32, y: i32, w: u32, h: u32, radius: u32, color: Rgb565) {
        RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(x, y), Size::new(w, h)),
            Size::new(radius, radius),
        )
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(&mut self.target)
        .ok();
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
    }

    fn print_line(&mut self, text: &str) {
        if !text.is_empty() {
            Text::with_baseline(text, self.cursor, self.text_style(), Baseline::Top)
                .draw(&mut self.target)
                .ok();
        }
        self.next_row();
    }

    fn print_clipped(&mut self, text: &str, clip: Rectangle) {
        if !text.is_empty() {
            Text::with_baseline(text, self.cursor, self.text_style(), Baseline::Top)
                .draw(&mut self.target.clipped(&clip))
                .ok();
        }
        self.next_row();
    }

    fn width(&self) -> u32 {
        self.target.size().width
    }

    fn height(&self) -> u32 {
        self.target.size().height
    }
}

// ── ConsoleSurface ───────────────────────────────────────────────────────

/// Headless [`DisplaySurface`] that routes log lines to a text console.
///
/// Every drawing primitive is a no-op; only
/// [`write_console`](DisplaySurface::write_console) produces output.
/// Console write errors are ignored, as a missing panel would be.
pub struct ConsoleSurface<W> {
    console: W,
    width: u32,
    height: u32,
}

impl<W: Write> ConsoleSurface<W> {
    /// Wrap a console sink, reporting the dimensions of the panel it
    /// replaces.
    pub fn new(console: W, width: u32, height: u32) -> Self {
        Self {
            console,
            width,
            height,
        }
    }

    /// The wrapped console.
    pub fn console(&self) -> &W {
        &self.console
    }

    /// Unwrap the console.
    pub fn into_inner(self) -> W {
        self.console
    }
}

impl<W: Write> DisplaySurface for ConsoleSurface<W> {
    fn clear_screen(&mut self, _color: Rgb565) {}

    fn fill_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32, _color: Rgb565) {}

    fn draw_round_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32, _radius: u32, _color: Rgb565) {}

    fn set_cursor(&mut self, _x: i32, _y: i32) {}

    fn set_text_color(&mut self, _color: Rgb565) {}

    fn print_line(&mut self, _text: &str) {}

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_headless(&self) -> bool {
        true
    }

    fn write_console(&mut self, text: &str) {
        writeln!(self.console, "{}", text).ok();
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
