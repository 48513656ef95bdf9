// src/hal.rs
// Hardware abstraction traits. The session only talks to these, so the
// pipeline runs unchanged on the RP2040 and against host-side mocks.

/// Errors that can occur on the serial link.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    ReadError,
    WriteError,
}

/// Byte-oriented serial port.
pub trait Uart {
    /// Writes every byte in `words`, blocking until the FIFO accepted them.
    fn write_blocking(&mut self, words: &[u8]) -> Result<(), UartError>;

    /// Returns the next received byte, or `None` if nothing is pending.
    /// Never blocks.
    fn read_byte(&mut self) -> Result<Option<u8>, UartError>;

    /// Blocks until all written bytes have left the transmitter.
    fn flush(&mut self) -> Result<(), UartError>;
}

/// Free-running monotonic counter.
pub trait Clock {
    /// Current counter value. Wraps at `u32::MAX`.
    fn read_time(&self) -> u32;

    /// Counter ticks per second.
    fn get_clock_freq(&self) -> u32;
}
