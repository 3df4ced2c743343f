//! Countdown timing for a single draw.

use std::time::Duration;

/// Draw countdown parameters
#[derive(Debug, Clone)]
pub struct DrawTiming {
    /// Countdown value shown when a draw starts (ticks until the reveal)
    pub countdown_from: u8,

    /// Period of the repeating countdown timer (milliseconds)
    pub tick_interval_ms: u64,
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            countdown_from: 3,
            tick_interval_ms: 1000,
        }
    }
}

impl DrawTiming {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
