//! In-memory Rgb565 frame buffer sized for the SSD1331 panel.
//!
//! Pixels are stored as big-endian 16-bit words, which is the byte order
//! the SSD1331 expects in 65k colour mode, so [`FrameBuffer::as_bytes`] can
//! be streamed to the panel unchanged.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{
        raw::RawU16,
        IntoStorage, Rgb565,
    },
    prelude::*,
};

/// Panel width in pixels.
pub const WIDTH: u32 = 96;
/// Panel height in pixels.
pub const HEIGHT: u32 = 64;
/// Frame size in bytes (two bytes per pixel).
pub const BUFFER_SIZE: usize = (WIDTH * HEIGHT * 2) as usize;

/// Full-screen Rgb565 frame buffer.
///
/// Implements [`DrawTarget`], so any `embedded-graphics` drawable can be
/// rendered into it. Pixels outside the panel are silently dropped.
#[derive(Clone)]
pub struct FrameBuffer {
    data: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// A black frame.
    pub const fn new() -> Self {
        Self {
            data: [0; BUFFER_SIZE],
        }
    }

    /// Raw frame contents in panel byte order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read back one pixel. Returns `None` outside the panel.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let i = Self::index(point)?;
        let raw = u16::from_be_bytes([self.data[i], self.data[i + 1]]);
        Some(Rgb565::from(RawU16::new(raw)))
    }

    fn index(point: Point) -> Option<usize> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some(((y * WIDTH + x) * 2) as usize)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = Self::index(point) {
                self.data[i..i + 2].copy_from_slice(&color.into_storage().to_be_bytes());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let bytes = color.into_storage().to_be_bytes();
        for chunk in self.data.chunks_exact_mut(2) {
            chunk.copy_from_slice(&bytes);
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
