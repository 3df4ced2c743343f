//! Repeating countdown timer polled from the event loop.

use std::time::{Duration, Instant};

/// Owned handle for a fixed-period repeating timer
///
/// The timer does nothing on its own: the owner polls it with the current
/// time and cancels it by dropping the handle. At most one firing is reported
/// per poll, so ticks never overlap.
#[derive(Debug)]
pub struct IntervalTimer {
    period: Duration,
    deadline: Instant,
    fired: u32,
}

impl IntervalTimer {
    /// Arm a timer whose first firing is one period after `now`
    pub fn start(now: Instant, period: Duration) -> Self {
        Self {
            period,
            deadline: now + period,
            fired: 0,
        }
    }

    /// Instant of the next firing
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Number of times the timer has fired since it was armed
    pub fn fired(&self) -> u32 {
        self.fired
    }

    /// Report whether the timer fired by `now` and re-arm it
    ///
    /// The next deadline stays on the original period grid. If the loop
    /// stalled past that as well, it is re-anchored to `now + period` instead
    /// of firing a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }

        let next = self.deadline + self.period;
        self.deadline = if next > now { next } else { now + self.period };
        self.fired += 1;
        true
    }
}
