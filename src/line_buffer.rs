// src/line_buffer.rs
// Accumulates serial bytes into a terminated command line.

use heapless::Vec;

use crate::config::LINE_TERMINATOR;

/// Result of feeding one byte into a [`LineBuffer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineStatus {
    /// Byte stored, no terminator seen yet.
    Accumulating,
    /// Terminator stored; the buffer holds the full line until `clear`.
    Ready,
    /// Buffer filled without a terminator. The partial line was discarded.
    Overflow,
}

/// Fixed-capacity line accumulator.
///
/// Invariant: `len() <= N`. A line that reaches `N` bytes without a
/// terminator is dropped whole; nothing partial is kept.
pub struct LineBuffer<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Appends `byte` and reports whether a line is ready.
    ///
    /// The terminator is kept in the buffer. After `Ready` the caller must
    /// `clear` before feeding the next line.
    pub fn feed(&mut self, byte: u8) -> LineStatus {
        if self.append(byte).is_err() {
            self.clear();
            return LineStatus::Overflow;
        }
        if byte == LINE_TERMINATOR {
            LineStatus::Ready
        } else if self.is_full() {
            self.clear();
            LineStatus::Overflow
        } else {
            LineStatus::Accumulating
        }
    }

    /// Stores one byte. Fails without modifying the buffer when full.
    pub fn append(&mut self, byte: u8) -> Result<(), u8> {
        self.bytes.push(byte)
    }

    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
