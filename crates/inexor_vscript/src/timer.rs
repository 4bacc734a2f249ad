// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timer nodes.
//!
//! A timer is anchored at the first shared tick timestamp it sees after
//! creation or reset, waits out its start delay, then fires every
//! `interval`. After firing it is suppressed for `cooldown`, and once it has
//! fired `limit` times (when `limit > 0`) it stays exhausted until reset.

use crate::error::NodeError;
use crate::node::NodeType;
use serde::{Deserialize, Serialize};

/// Unit for timer durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Milliseconds
    #[default]
    Milliseconds,
    /// Seconds
    Seconds,
    /// Minutes
    Minutes,
    /// Hours
    Hours,
}

impl TimeUnit {
    /// Parse the numeric code used by console commands
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Milliseconds),
            1 => Some(Self::Seconds),
            2 => Some(Self::Minutes),
            3 => Some(Self::Hours),
            _ => None,
        }
    }

    /// Numeric code used by console commands
    pub fn code(&self) -> u32 {
        match self {
            Self::Milliseconds => 0,
            Self::Seconds => 1,
            Self::Minutes => 2,
            Self::Hours => 3,
        }
    }

    /// Milliseconds per unit
    pub fn millis(&self) -> u64 {
        match self {
            Self::Milliseconds => 1,
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
        }
    }

    /// Convert an amount to milliseconds, `None` on overflow
    pub fn to_millis(&self, amount: u64) -> Option<u64> {
        amount.checked_mul(self.millis())
    }
}

/// Timer lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// Waiting for the start delay
    #[default]
    Idle,
    /// Counting toward the next interval
    Armed,
    /// Suppressed after firing
    Cooldown,
    /// Fired `limit` times; terminal until reset
    Exhausted,
}

/// Timer node data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerNode {
    /// Time between firings
    pub interval: u64,
    /// Delay before the timer arms
    pub start_delay: u64,
    /// Maximum number of firings, 0 for unlimited
    pub limit: u32,
    /// Suppression window after each firing
    pub cooldown: u64,
    /// Unit for all durations above
    pub unit: TimeUnit,
    #[serde(skip)]
    state: TimerState,
    #[serde(skip)]
    fire_count: u32,
    #[serde(skip)]
    anchor: Option<u64>,
    #[serde(skip)]
    reference: u64,
    #[serde(skip)]
    fired_at: u64,
}

impl TimerNode {
    /// Create a new idle timer
    pub fn new(interval: u64, start_delay: u64, limit: u32, cooldown: u64, unit: TimeUnit) -> Self {
        Self {
            interval,
            start_delay,
            limit,
            cooldown,
            unit,
            state: TimerState::Idle,
            fire_count: 0,
            anchor: None,
            reference: 0,
            fired_at: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Number of firings since the last reset
    pub fn fire_count(&self) -> u32 {
        self.fire_count
    }

    /// Interval in milliseconds
    pub fn interval_ms(&self) -> u64 {
        self.interval.saturating_mul(self.unit.millis())
    }

    /// Start delay in milliseconds
    pub fn start_delay_ms(&self) -> u64 {
        self.start_delay.saturating_mul(self.unit.millis())
    }

    /// Cooldown in milliseconds
    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown.saturating_mul(self.unit.millis())
    }

    /// Check that the interval is non-zero and every duration fits in
    /// milliseconds
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.interval == 0 {
            return Err(NodeError::invalid(
                NodeType::Timer,
                "interval must be greater than zero",
            ));
        }
        for (field, amount) in [
            ("interval", self.interval),
            ("start delay", self.start_delay),
            ("cooldown", self.cooldown),
        ] {
            if self.unit.to_millis(amount).is_none() {
                return Err(NodeError::invalid(
                    NodeType::Timer,
                    format!("{field} {amount} overflows in milliseconds"),
                ));
            }
        }
        Ok(())
    }

    /// Advance to `now`. Returns true if the timer fired.
    pub fn tick(&mut self, now: u64) -> bool {
        let anchor = *self.anchor.get_or_insert(now);

        if self.state == TimerState::Idle {
            if now.saturating_sub(anchor) < self.start_delay_ms() {
                return false;
            }
            self.state = TimerState::Armed;
            self.reference = anchor.saturating_add(self.start_delay_ms());
        }

        if self.state == TimerState::Cooldown {
            if now.saturating_sub(self.fired_at) < self.cooldown_ms() {
                return false;
            }
            self.state = TimerState::Armed;
        }

        if self.state != TimerState::Armed
            || now.saturating_sub(self.reference) < self.interval_ms()
        {
            return false;
        }

        self.fire_count = self.fire_count.saturating_add(1);
        self.reference = now;
        self.fired_at = now;
        self.state = if self.limit > 0 && self.fire_count >= self.limit {
            TimerState::Exhausted
        } else if self.cooldown_ms() > 0 {
            TimerState::Cooldown
        } else {
            TimerState::Armed
        };
        true
    }

    /// Return to `Idle` with a zero firing count
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.fire_count = 0;
        self.anchor = None;
        self.reference = 0;
        self.fired_at = 0;
    }
}
