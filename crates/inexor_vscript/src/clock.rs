// SPDX-License-Identifier: MIT OR Apache-2.0
//! Millisecond clocks for driving tick passes.

use std::cell::Cell;
use std::time::Instant;

/// Source of pass timestamps in milliseconds
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> u64;
}

/// Milliseconds elapsed since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    /// Start a new clock at zero
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock reading `now`
    pub fn new(now: u64) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Set the current time
    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    /// Move the clock forward
    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
