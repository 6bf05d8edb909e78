//! Fixed-rate tick timing.
//!
//! The viewer redraws as fast as the surface allows but steps playback
//! on a fixed period. Each redraw asks the timer how many whole periods
//! elapsed and runs that many playback ticks, so frame stepping stays at
//! the clip rate regardless of display refresh.

use std::time::{Duration, Instant};

pub struct TickTimer {
    period: Duration,
    accumulated: Duration,
    last: Instant,
}

impl TickTimer {
    /// A timer that starts due: the first `update` yields a tick
    /// immediately so frame 0 is presented without waiting one period.
    ///
    /// `rate_hz` must lie in the accepted rate band so the period is
    /// nonzero and representable.
    pub fn new(rate_hz: f32) -> Self {
        let period = Duration::from_secs_f32(1.0 / rate_hz);
        Self {
            period,
            accumulated: period,
            last: Instant::now(),
        }
    }

    /// Whole ticks elapsed since the previous call.
    pub fn update(&mut self) -> u32 {
        let now = Instant::now();
        self.accrue(now - self.last);
        self.last = now;
        self.drain()
    }

    fn accrue(&mut self, dt: Duration) {
        // Cap pending time so a stall (window hidden, debugger pause)
        // does not replay a long burst of frames afterwards.
        let cap = Duration::from_secs(1).max(self.period);
        self.accumulated = (self.accumulated + dt).min(cap);
    }

    fn drain(&mut self) -> u32 {
        let mut ticks = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            ticks += 1;
        }
        ticks
    }
}
