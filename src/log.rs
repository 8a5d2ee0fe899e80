//! Fixed-capacity circular buffer of log lines.
//!
//! [`LogRing`] keeps the [`LOG_CAPACITY`] most recent lines, each cut to
//! [`LINE_CHARS`] characters. Lines are read back oldest-first, starting
//! at the slot that will be overwritten next.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation: storage is a fixed array of [`heapless::String`].

use heapless::String;

/// Number of lines kept (and drawn) by the log.
pub const LOG_CAPACITY: usize = 5;

/// Maximum number of visible characters per line.
pub const LINE_CHARS: usize = 16;

/// Byte capacity of a line: [`LINE_CHARS`] characters of up to 4 UTF-8 bytes.
pub const LINE_BYTES: usize = LINE_CHARS * 4;

/// One stored log line.
pub type LogLine = String<LINE_BYTES>;

/// Copy the first [`LINE_CHARS`] characters of `text` into a [`LogLine`].
///
/// Longer input is silently cut on a character boundary.
pub fn truncate_line(text: &str) -> LogLine {
    let mut line = LogLine::new();
    for ch in text.chars().take(LINE_CHARS) {
        // LINE_BYTES covers LINE_CHARS four-byte characters.
        line.push(ch).ok();
    }
    line
}

/// Returns `true` for input that must not reach the log.
fn is_blank(text: &str) -> bool {
    text.is_empty() || text == "\n"
}

/// Circular store of the most recent log lines.
///
/// Every slot exists from construction; slots that have never been written
/// hold an empty line and render as a blank row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRing {
    lines: [LogLine; LOG_CAPACITY],
    /// Slot written by the next `push`; also the oldest surviving line.
    next: usize,
    wrapped: bool,
}

impl LogRing {
    /// Create an empty ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` and advance the write cursor.
    ///
    /// Empty input and a lone `"\n"` are ignored and return `false`;
    /// nothing is mutated in that case.
    pub fn push(&mut self, text: &str) -> bool {
        if is_blank(text) {
            return false;
        }

        self.lines[self.next] = truncate_line(text);
        self.next = (self.next + 1) % LOG_CAPACITY;
        if self.next == 0 {
            self.wrapped = true;
        }
        true
    }

    /// All slots in display order, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        (0..LOG_CAPACITY).map(move |i| self.lines[(self.next + i) % LOG_CAPACITY].as_str())
    }

    /// The most recently stored line, or `None` before the first push.
    pub fn latest(&self) -> Option<&str> {
        let idx = (self.next + LOG_CAPACITY - 1) % LOG_CAPACITY;
        if self.next == 0 && !self.wrapped {
            None
        } else {
            Some(self.lines[idx].as_str())
        }
    }

    /// Slot index the next line will be written to.
    pub fn next_write_index(&self) -> usize {
        self.next
    }

    /// Returns `true` once every slot has been written at least once.
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
