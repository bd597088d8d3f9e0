// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;

use crate::timer::Timer;

/// Fixed-rate ticker with `setInterval` semantics.
///
/// The first tick completes one `period` after construction. Deadlines advance
/// by exactly one period from the previous deadline, so time spent between ticks
/// does not shift the schedule. When a deadline has already passed the tick fires
/// immediately and the schedule is re-based on the current instant instead of
/// firing a burst of catch-up ticks.
#[derive(Debug)]
pub struct FixedRate<T: Timer> {
    timer: T,
    period: Duration,
    next: T::Instant,
}

impl<T: Timer> FixedRate<T> {
    pub fn new(timer: T, period: Duration) -> Self {
        let next = timer.now() + period;
        Self {
            timer,
            period,
            next,
        }
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    pub async fn tick(&mut self) {
        let now = self.timer.now();
        if self.next > now {
            self.timer.sleep_future(self.next - now).await;
        } else {
            self.next = now;
        }
        self.next = self.next + self.period;
    }
}
