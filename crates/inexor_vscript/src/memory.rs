// SPDX-License-Identifier: MIT OR Apache-2.0
//! Memory integer nodes.

use serde::{Deserialize, Serialize};

/// A mutable integer cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemIntegerNode {
    /// Stored value
    pub value: i64,
}

impl MemIntegerNode {
    /// Create a cell holding `value`
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    /// Add one, saturating at `i64::MAX`
    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    /// Subtract one, saturating at `i64::MIN`
    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_decrement() {
        let mut cell = MemIntegerNode::new(5);
        cell.increment();
        cell.increment();
        cell.decrement();
        assert_eq!(cell.value, 6);
    }

    #[test]
    fn test_saturates() {
        let mut cell = MemIntegerNode::new(i64::MAX);
        cell.increment();
        assert_eq!(cell.value, i64::MAX);

        let mut cell = MemIntegerNode::new(i64::MIN);
        cell.decrement();
        assert_eq!(cell.value, i64::MIN);
    }
}
