use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval_at};

/// Paces the quiz countdown at one tick per period.
///
/// The first tick fires one full period after creation, not immediately.
/// Dropping the value stops the countdown.
pub struct Countdown {
    interval: Interval,
}

impl Countdown {
    pub const PERIOD: Duration = Duration::from_secs(1);

    #[must_use]
    pub fn new() -> Self {
        Self::with_period(Self::PERIOD)
    }

    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        let start = tokio::time::Instant::now() + period;
        let mut interval = interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// Wait for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
