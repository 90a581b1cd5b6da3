use std::time::{Duration, Instant};

/// Fixed-interval tick scheduler driven by the host loop.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    interval: Duration,
    last_tick: Instant,
}

impl TickClock {
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
        }
    }

    /// Returns true once per elapsed interval and re-arms from `now`.
    pub fn is_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }

        self.last_tick = now;
        true
    }

    /// Restarts the interval from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.last_tick = now;
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
