//! Streaming line assembler.
//!
//! Accumulates host bytes into a fixed buffer and yields complete
//! `\n`-terminated lines. A line longer than the buffer is dropped in its
//! entirety: bytes are discarded up to and including the next `\n`, and the
//! caller is told once that a line was lost.

use heapless::{String, Vec};

use crate::error::CommandError;

/// Receive buffer capacity (bytes, excluding the terminator).
pub const MAX_LINE_LEN: usize = 64;

/// One assembled line, terminator removed.
pub type Line = String<MAX_LINE_LEN>;

/// Assembler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblerState {
    /// Accumulating bytes of the current line.
    Collecting,
    /// Current line overflowed; skipping to the next terminator.
    Discarding,
}

/// Byte-at-a-time line assembler.
pub struct LineAssembler {
    state: AssemblerState,
    buf: Vec<u8, MAX_LINE_LEN>,
    /// A `\r` was received and is held back until we know whether it ends
    /// the line.
    pending_cr: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self {
            state: AssemblerState::Collecting,
            buf: Vec::new(),
            pending_cr: false,
        }
    }

    /// Feed one byte.
    ///
    /// Returns `Some(Ok(line))` when a non-empty line completes,
    /// `Some(Err(_))` when a completed line had to be dropped, and `None`
    /// otherwise. A `\r` right before the `\n` is stripped and does not
    /// count against the buffer.
    pub fn push(&mut self, byte: u8) -> Option<Result<Line, CommandError>> {
        match (self.state, byte) {
            (AssemblerState::Discarding, b'\n') => {
                self.state = AssemblerState::Collecting;
                self.pending_cr = false;
                Some(Err(CommandError::Overflow))
            }
            (AssemblerState::Discarding, _) => None,
            (AssemblerState::Collecting, b'\n') => {
                self.pending_cr = false;
                if self.buf.is_empty() {
                    return None;
                }
                let bytes = core::mem::take(&mut self.buf);
                Some(String::from_utf8(bytes).map_err(|_| CommandError::Encoding))
            }
            (AssemblerState::Collecting, b) => {
                if core::mem::replace(&mut self.pending_cr, b == b'\r') {
                    self.store(b'\r');
                }
                if b != b'\r' {
                    self.store(b);
                }
                None
            }
        }
    }

    fn store(&mut self, byte: u8) {
        if self.state == AssemblerState::Collecting && self.buf.push(byte).is_err() {
            self.buf.clear();
            self.pending_cr = false;
            self.state = AssemblerState::Discarding;
        }
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
