//! # Time Source
//!
//! Abstracts wall-clock access so services can be driven by a fixed clock in
//! tests.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// UTC timestamp attached to blocks, turns and notifications.
pub type Timestamp = DateTime<Utc>;

/// Abstract interface for reading the current time.
pub trait TimeSource: Send + Sync {
    /// Current UTC timestamp.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Manually advanced time source for tests and replays.
#[derive(Debug)]
pub struct FixedTimeSource {
    current: Mutex<Timestamp>,
}

impl FixedTimeSource {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move the clock forward by `millis` milliseconds.
    pub fn advance_millis(&self, millis: i64) {
        *self.current.lock() += Duration::milliseconds(millis);
    }
}

impl Default for FixedTimeSource {
    fn default() -> Self {
        Self::new(Timestamp::default())
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}
