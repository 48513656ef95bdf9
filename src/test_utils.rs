// src/test_utils.rs
// Host-side stand-ins for the serial port and timer.

use std::cell::Cell;
use std::collections::VecDeque;

use crate::hal::{Clock, Uart, UartError};

/// Serial port with a scripted receive queue and a captured transmit log.
#[derive(Default)]
pub struct MockUart {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    pub fail_writes: bool,
}

impl MockUart {
    pub fn with_input(input: &[u8]) -> Self {
        Self {
            rx: input.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn tx_str(&self) -> &str {
        std::str::from_utf8(&self.tx).expect("mock output is ASCII")
    }
}

impl Uart for MockUart {
    fn write_blocking(&mut self, words: &[u8]) -> Result<(), UartError> {
        if self.fail_writes {
            return Err(UartError::WriteError);
        }
        self.tx.extend_from_slice(words);
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, UartError> {
        Ok(self.rx.pop_front())
    }

    fn flush(&mut self) -> Result<(), UartError> {
        Ok(())
    }
}

/// Clock that advances by a fixed step on every read.
pub struct MockClock {
    now: Cell<u32>,
    step: u32,
    freq: u32,
}

impl MockClock {
    /// 1 MHz clock starting at `start`.
    pub fn new(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
            freq: 1_000_000,
        }
    }
}

impl Clock for MockClock {
    fn read_time(&self) -> u32 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(self.step));
        t
    }

    fn get_clock_freq(&self) -> u32 {
        self.freq
    }
}
