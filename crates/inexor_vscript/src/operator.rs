// SPDX-License-Identifier: MIT OR Apache-2.0
//! Operator nodes.
//!
//! An operator acts on its outgoing links. Only memory integer children are
//! eligible; other children are skipped without error.

use crate::memory::MemIntegerNode;
use serde::{Deserialize, Serialize};

/// Operation applied to memory cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorKind {
    /// Add one
    Increment,
    /// Subtract one
    Decrement,
}

impl OperatorKind {
    /// Parse a console argument: a numeric code or the operator name
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "0" | "increment" | "inc" => Some(Self::Increment),
            "1" | "decrement" | "dec" => Some(Self::Decrement),
            _ => None,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
        }
    }

    /// Apply the operation to a memory cell
    pub fn apply(&self, cell: &mut MemIntegerNode) {
        match self {
            Self::Increment => cell.increment(),
            Self::Decrement => cell.decrement(),
        }
    }
}

/// Operator node data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorNode {
    /// Operation to apply
    pub operator: OperatorKind,
}

impl OperatorNode {
    /// Create an operator node
    pub fn new(operator: OperatorKind) -> Self {
        Self { operator }
    }
}
