//! Fixed-timestep scheduler
//!
//! Wall-clock time goes into an accumulator that is drained one 1/60 s tick at
//! a time. Time is kept in units of `1/TICKS_PER_SECOND` milliseconds so the
//! drain is exact integer arithmetic: one tick costs 1000 units and one
//! millisecond is worth 60.

use crate::types::TICKS_PER_SECOND;

const UNITS_PER_TICK: u64 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickScheduler {
    accumulator: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add elapsed milliseconds and return how many ticks are now due.
    ///
    /// The caller counts the ticks it actually runs.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.accumulator += elapsed_ms as u64 * TICKS_PER_SECOND;
        let due = self.accumulator / UNITS_PER_TICK;
        self.accumulator %= UNITS_PER_TICK;
        due as u32
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_second_is_sixty_ticks() {
        let mut scheduler = TickScheduler::new();
        assert_eq!(scheduler.advance(1000), 60);
        assert_eq!(scheduler.advance(0), 0);
    }

    #[test]
    fn test_frame_rate_independence() {
        let mut fast = TickScheduler::new();
        let mut slow = TickScheduler::new();
        let mut fast_total = 0;
        for _ in 0..120 {
            fast_total += fast.advance(5);
        }
        let slow_total = slow.advance(600);
        assert_eq!(fast_total, slow_total);
        assert_eq!(fast_total, 36);
    }

    #[test]
    fn test_sixteen_ms_frames_carry_remainder() {
        let mut scheduler = TickScheduler::new();
        // 16ms is slightly less than one tick
        assert_eq!(scheduler.advance(16), 0);
        assert_eq!(scheduler.advance(16), 1);
        // 920 units carried over, 2 ms more completes a tick
        assert_eq!(scheduler.advance(2), 1);
    }

    #[test]
    fn test_stall_produces_many_ticks() {
        let mut scheduler = TickScheduler::new();
        assert_eq!(scheduler.advance(250), 15);
    }

    #[test]
    fn test_reset() {
        let mut scheduler = TickScheduler::new();
        scheduler.advance(1010);
        scheduler.reset();
        assert_eq!(scheduler, TickScheduler::new());
    }
}
