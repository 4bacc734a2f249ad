// SPDX-License-Identifier: MIT OR Apache-2.0
//! Function call nodes.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Engine function a node can call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionId {
    /// Print the argument to the game console
    ConsoleOutput,
}

impl FunctionId {
    /// Parse the numeric code used by console commands
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::ConsoleOutput),
            _ => None,
        }
    }

    /// Numeric code used by console commands
    pub fn code(&self) -> u32 {
        match self {
            Self::ConsoleOutput => 0,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConsoleOutput => "conoutf",
        }
    }
}

/// A line of console output produced by a function node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    /// Node that produced the line
    pub source: NodeId,
    /// Pass timestamp
    pub timestamp: u64,
    /// Text, verbatim
    pub text: String,
}

/// Function node data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionNode {
    /// Function to call
    pub function: FunctionId,
    /// Single string argument
    pub argument: String,
}

impl FunctionNode {
    /// Create a function node
    pub fn new(function: FunctionId, argument: impl Into<String>) -> Self {
        Self {
            function,
            argument: argument.into(),
        }
    }

    /// Run the function on behalf of node `source`
    pub fn invoke(&self, source: NodeId, timestamp: u64) -> ConsoleLine {
        match self.function {
            FunctionId::ConsoleOutput => {
                tracing::info!(target: "inexor_vscript::console", "{}", self.argument);
                ConsoleLine {
                    source,
                    timestamp,
                    text: self.argument.clone(),
                }
            }
        }
    }
}
