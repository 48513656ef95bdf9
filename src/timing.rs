// src/timing.rs
// Timestamps around the reporting and inference phases of a cycle.

use crate::hal::Clock;
use crate::utils::{elapsed_ticks, ticks_to_us};

/// Raw counter value taken from a [`Clock`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp(pub u32);

impl Timestamp {
    /// Ticks from `earlier` to `self`, wraparound-safe.
    pub fn ticks_since(self, earlier: Timestamp) -> u32 {
        elapsed_ticks(earlier.0, self.0)
    }
}

pub fn mark<C: Clock>(clock: &C) -> Timestamp {
    Timestamp(clock.read_time())
}

/// Three marks of one processing cycle: before the print phase (`start`),
/// after it (`mid`) and after inference and decoding (`end`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingSample {
    pub start: Timestamp,
    pub mid: Timestamp,
    pub end: Timestamp,
    pub clock_freq: u32,
}

impl TimingSample {
    pub fn print_duration_us(&self) -> u32 {
        ticks_to_us(self.mid.ticks_since(self.start), self.clock_freq)
    }

    pub fn inference_duration_us(&self) -> u32 {
        ticks_to_us(self.end.ticks_since(self.mid), self.clock_freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockClock;

    fn sample(start: u32, mid: u32, end: u32, clock_freq: u32) -> TimingSample {
        TimingSample {
            start: Timestamp(start),
            mid: Timestamp(mid),
            end: Timestamp(end),
            clock_freq,
        }
    }

    #[test]
    fn test_durations_in_us() {
        let s = sample(1_000, 1_250, 4_250, 1_000_000);
        assert_eq!(s.print_duration_us(), 250);
        assert_eq!(s.inference_duration_us(), 3_000);
    }

    #[test]
    fn test_durations_scale_with_clock() {
        let s = sample(0, 125, 250, 125_000_000);
        assert_eq!(s.print_duration_us(), 1);
        assert_eq!(s.inference_duration_us(), 1);
    }

    #[test]
    fn test_durations_across_wraparound() {
        let s = sample(u32::MAX - 9, 10, 30, 1_000_000);
        assert_eq!(s.print_duration_us(), 20);
        assert_eq!(s.inference_duration_us(), 20);
    }

    #[test]
    fn test_mark_reads_clock() {
        let clock = MockClock::new(500, 7);
        assert_eq!(mark(&clock), Timestamp(500));
        assert_eq!(mark(&clock), Timestamp(507));
    }
}
