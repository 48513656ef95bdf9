// src/rp2040_hal_impl/timer.rs

use rp2040_hal::Timer;

use crate::hal::Clock;

/// The RP2040 timer block counts microseconds, so one tick is one us.
pub const RP2040_TIMER_FREQ_HZ: u32 = 1_000_000;

/// Monotonic clock backed by the RP2040 64-bit timer.
///
/// Only the low word is read, which wraps every ~71 minutes; durations are
/// computed with wrapping subtraction so a single wrap inside one
/// measurement is harmless.
pub struct Rp2040Clock {
    timer: Timer,
}

impl Rp2040Clock {
    /// `timer` is the HAL timer created from `pac.TIMER` in `main`.
    pub fn new(timer: Timer) -> Self {
        Self { timer }
    }
}

impl Clock for Rp2040Clock {
    fn read_time(&self) -> u32 {
        self.timer.get_counter_low()
    }

    fn get_clock_freq(&self) -> u32 {
        RP2040_TIMER_FREQ_HZ
    }
}
