use std::{thread::sleep, time::{Duration, Instant}};

use crate::game::Clock;

/// Fixed-timestep pacing: each wait lasts until one period after the previous
/// tick began. A tick that overran its budget starts the next one immediately.
pub struct FixedRateClock {
    period: Duration,
    tick_started: Instant,
}

impl FixedRateClock {
    pub fn new(period: Duration) -> Self {
        FixedRateClock { period, tick_started: Instant::now() }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    fn remaining(&self, now: Instant) -> Duration {
        (self.tick_started + self.period).saturating_duration_since(now)
    }
}

impl Clock for FixedRateClock {
    fn wait_next_tick(&mut self) {
        let remaining = self.remaining(Instant::now());
        if remaining > Duration::from_millis(0) {
            sleep(remaining);
        }
        self.tick_started = Instant::now();
    }
}
