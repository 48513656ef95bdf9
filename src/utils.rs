// src/utils.rs
// Timer arithmetic helpers.

/// Ticks elapsed from `start` to `end` on a wrapping u32 counter.
/// Correct across one wraparound as long as both samples come from the
/// same counter.
pub fn elapsed_ticks(start: u32, end: u32) -> u32 {
    end.wrapping_sub(start)
}

// ticks_to_us(ticks) -> us
// A zero clock frequency leaves the value as raw ticks. Clocks slower than
// 1 MHz can overflow u32 microseconds; those saturate at u32::MAX.
pub fn ticks_to_us(ticks: u32, clock_freq: u32) -> u32 {
    if clock_freq == 0 {
        return ticks;
    }
    u32::try_from(ticks as u64 * 1_000_000 / clock_freq as u64).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_ticks_plain() {
        assert_eq!(elapsed_ticks(100, 250), 150);
        assert_eq!(elapsed_ticks(7, 7), 0);
    }

    #[test]
    fn test_elapsed_ticks_wraparound() {
        assert_eq!(elapsed_ticks(u32::MAX - 4, 5), 10);
        assert_eq!(elapsed_ticks(u32::MAX, 0), 1);
    }

    #[test]
    fn test_ticks_to_us() {
        assert_eq!(ticks_to_us(1000, 1_000_000), 1000); // 1MHz timer, ticks are us
        assert_eq!(ticks_to_us(16, 16_000_000), 1);
        assert_eq!(ticks_to_us(250, 25_000_000), 10);
        assert_eq!(ticks_to_us(u32::MAX, 1_000_000), u32::MAX);
    }

    #[test]
    fn test_ticks_to_us_slow_clock_saturates() {
        assert_eq!(ticks_to_us(3, 32_768), 91);
        assert_eq!(ticks_to_us(u32::MAX, 32_768), u32::MAX);
        assert_eq!(ticks_to_us(5_000_000, 1_000), u32::MAX);
        assert_eq!(ticks_to_us(4_000, 1_000), 4_000_000);
    }

    #[test]
    fn test_ticks_to_us_zero_freq() {
        assert_eq!(ticks_to_us(42, 0), 42);
    }
}
