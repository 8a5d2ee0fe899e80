//! Test-only surface that records every primitive call.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{String, Vec};

use crate::surface::DisplaySurface;

/// One recorded primitive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Initialize,
    Clear(Rgb565),
    FillRect { x: i32, y: i32, w: u32, h: u32, color: Rgb565 },
    RoundRect { x: i32, y: i32, w: u32, h: u32, radius: u32, color: Rgb565 },
    Cursor { x: i32, y: i32 },
    TextColor(Rgb565),
    Print(String<64>),
}

/// [`DisplaySurface`] that logs calls instead of drawing.
pub struct RecordingSurface {
    pub ops: Vec<DrawOp, 256>,
    width: u32,
    height: u32,
}

impl RecordingSurface {
    /// A 96×64 recorder.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            width: 96,
            height: 64,
        }
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Texts passed to `print_line`, in call order.
    pub fn printed(&self) -> Vec<&str, 64> {
        let mut out = Vec::new();
        for op in &self.ops {
            if let DrawOp::Print(text) = op {
                out.push(text.as_str()).unwrap();
            }
        }
        out
    }

    fn record(&mut self, op: DrawOp) {
        self.ops.push(op).expect("recording surface full");
    }
}

impl DisplaySurface for RecordingSurface {
    fn initialize(&mut self) {
        self.record(DrawOp::Initialize);
    }

    fn clear_screen(&mut self, color: Rgb565) {
        self.record(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) {
        self.record(DrawOp::FillRect { x, y, w, h, color });
    }

    fn draw_round_rect(&mut self, x: i32, y: i32, w: u32, h: u32, radius: u32, color: Rgb565) {
        self.record(DrawOp::RoundRect { x, y, w, h, radius, color });
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.record(DrawOp::Cursor { x, y });
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.record(DrawOp::TextColor(color));
    }

    fn print_line(&mut self, text: &str) {
        let mut s = String::new();
        s.push_str(text).expect("printed text too long");
        self.record(DrawOp::Print(s));
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
