use bevy_ecs::prelude::Resource;
use std::time::Duration;

/// Gravity timer with a mutable period.
///
/// The cadence does not read a clock. The owner feeds it elapsed time through
/// [`Cadence::advance`] and runs one gravity tick per returned step.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Cadence {
    period: Duration,
    elapsed: Duration,
    running: bool,
    // Bumped on every re-arm
    arms: u64,
}

impl Cadence {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            running: false,
            arms: 0,
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Switches to a new period and restarts the count from zero.
    pub fn rearm(&mut self, period: Duration) {
        self.period = period;
        self.elapsed = Duration::ZERO;
        self.running = true;
        self.arms = self.arms.wrapping_add(1);
    }

    /// Number of re-arms so far. Ticks counted before a change are stale.
    #[must_use]
    pub fn arms(&self) -> u64 {
        self.arms
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Adds `delta` and returns the number of ticks that fell due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if !self.running || self.period.is_zero() {
            return 0;
        }

        self.elapsed += delta;
        let mut due = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            due += 1;
        }
        due
    }

    /// Time left before the next tick, or `None` while stopped.
    #[must_use]
    pub fn until_next(&self) -> Option<Duration> {
        self.running
            .then(|| self.period.saturating_sub(self.elapsed))
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::game::INITIAL_FALL_INTERVAL_MS))
    }
}
