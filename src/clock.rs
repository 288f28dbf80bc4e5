use std::{thread::sleep, time::{Duration, Instant}};

pub trait Clock {
    /// Blocks until the next tick boundary.
    fn tick(&mut self);
}

/// Sleeps off whatever is left of the tick interval since the previous tick.
pub struct FixedRateClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(ticks_per_second: u32) -> Self {
        let interval = Duration::from_secs(1) / ticks_per_second.max(1);
        FixedRateClock { interval, last_tick: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Clock for FixedRateClock {
    fn tick(&mut self) {
        if let Some(last) = self.last_tick {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed);
            }
        }

        self.last_tick = Some(Instant::now());
    }
}
