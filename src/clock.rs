//! Time source for the transient flags
//!
//! Timers are expressed as offsets from session start so tests can drive
//! them with a manual clock instead of sleeping.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

pub trait Clock {
    /// Monotonic time since the clock was created
    fn now(&self) -> Duration;

    /// Wall-clock milliseconds since the Unix epoch, used for file names
    fn unix_millis(&self) -> u128;
}

/// Real time
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn unix_millis(&self) -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
    }
}

/// Virtual time advanced by hand. Clones share the same timeline.
#[derive(Clone)]
pub struct ManualClock {
    elapsed: Rc<Cell<Duration>>,
    epoch_millis: u128,
}

impl ManualClock {
    pub fn new(epoch_millis: u128) -> Self {
        Self {
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
            epoch_millis,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed.get()
    }

    fn unix_millis(&self) -> u128 {
        self.epoch_millis + self.elapsed.get().as_millis()
    }
}
