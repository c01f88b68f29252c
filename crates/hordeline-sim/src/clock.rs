//! Fixed-step clock for hosts driven by wall-clock frame time.

use std::time::Duration;

use hordeline_core::constants::{MAX_CATCH_UP_TICKS, TICK_RATE};

/// Converts elapsed wall-clock time into whole simulation ticks.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: Duration,
    accumulator: Duration,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl FixedStepClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / tick_rate.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add `elapsed` and return how many ticks to run now. The remainder
    /// carries over. If the host has fallen too far behind, the backlog is
    /// dropped and the clock resynchronizes.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let due = (self.accumulator.as_nanos() / self.step.as_nanos()) as u64;

        if due > MAX_CATCH_UP_TICKS as u64 {
            tracing::warn!(due, max = MAX_CATCH_UP_TICKS, "simulation fell behind, dropping backlog");
            self.accumulator = Duration::ZERO;
            return MAX_CATCH_UP_TICKS;
        }

        self.accumulator -= self.step * due as u32;
        due as u32
    }
}
