//! Timer module - monotonic elapsed/delta bookkeeping
//!
//! A [`Stopwatch`] samples a [`TimeSource`] at tick boundaries and exposes
//! the time since `start` and the time between the last two ticks. It is the
//! piece a frame pump uses to produce the deltas handed to
//! `Game::tick_line_clear`.

use std::time::{Duration, Instant};

/// A monotonic clock
pub trait TimeSource {
    /// Time since an arbitrary fixed origin. Never decreases.
    fn now(&self) -> Duration;
}

/// Wall-clock source backed by `std::time::Instant`
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Start/stop/reset/tick stopwatch over any time source
#[derive(Debug, Clone)]
pub struct Stopwatch<T: TimeSource> {
    source: T,
    base: Duration,
    prev: Duration,
    delta: Duration,
    total: Duration,
    running: bool,
}

impl<T: TimeSource> Stopwatch<T> {
    pub fn new(source: T) -> Self {
        Self {
            source,
            base: Duration::ZERO,
            prev: Duration::ZERO,
            delta: Duration::ZERO,
            total: Duration::ZERO,
            running: false,
        }
    }

    pub fn start(&mut self) {
        let now = self.source.now();
        self.running = true;
        self.base = now;
        self.prev = now;
        self.delta = Duration::ZERO;
    }

    /// Sample the source and update `delta`. No-op while stopped.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        let now = self.source.now();
        self.delta = now.saturating_sub(self.prev);
        self.prev = now;
    }

    pub fn stop(&mut self) {
        if self.running {
            self.total = self.source.now().saturating_sub(self.base);
        }
        self.running = false;
    }

    /// Re-base a running stopwatch at the current instant, or zero a
    /// stopped one.
    pub fn reset(&mut self) {
        if self.running {
            let now = self.source.now();
            self.base = now;
            self.prev = now;
        }
        self.total = Duration::ZERO;
        self.delta = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time since `start` (frozen at `stop`)
    pub fn elapsed(&self) -> Duration {
        if self.running {
            self.source.now().saturating_sub(self.base)
        } else {
            self.total
        }
    }

    /// Time between the two most recent ticks
    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }
}
