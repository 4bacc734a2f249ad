// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed construction parameters, one variant per node type.
//!
//! Console commands hand every argument over as a string. Those are parsed
//! once here into [`NodeParams`]; nothing past this module sees raw strings.

use crate::error::NodeError;
use crate::function::{FunctionId, FunctionNode};
use crate::memory::MemIntegerNode;
use crate::node::{NodeKind, NodeType};
use crate::operator::{OperatorKind, OperatorNode};
use crate::timer::{TimeUnit, TimerNode};
use std::str::FromStr;

/// Parameters for creating a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeParams {
    /// Timer node
    Timer {
        /// Time between firings, must be greater than zero
        interval: u64,
        /// Delay before the timer arms
        start_delay: u64,
        /// Maximum firings, 0 for unlimited
        limit: u32,
        /// Suppression window after each firing
        cooldown: u64,
        /// Unit for the durations
        unit: TimeUnit,
        /// Node name
        name: String,
        /// Node comment
        comment: String,
    },
    /// Comment node
    Comment {
        /// Node name
        name: String,
        /// Comment text
        comment: String,
    },
    /// Function call node
    Function {
        /// Function to call
        function: FunctionId,
        /// Single string argument
        argument: String,
    },
    /// Operator node
    Operator {
        /// Operation to apply to memory children
        operator: OperatorKind,
        /// Node name
        name: String,
        /// Node comment
        comment: String,
    },
    /// Memory integer node
    MemoryInteger {
        /// Initial value
        value: i64,
        /// Node name
        name: String,
        /// Node comment
        comment: String,
    },
}

impl NodeParams {
    /// Node type these parameters create
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Timer { .. } => NodeType::Timer,
            Self::Comment { .. } => NodeType::Comment,
            Self::Function { .. } => NodeType::Function,
            Self::Operator { .. } => NodeType::Operator,
            Self::MemoryInteger { .. } => NodeType::MemoryInteger,
        }
    }

    /// Check values that the types alone cannot rule out
    pub fn validate(&self) -> Result<(), NodeError> {
        match self {
            Self::Timer {
                interval,
                start_delay,
                limit,
                cooldown,
                unit,
                ..
            } => TimerNode::new(*interval, *start_delay, *limit, *cooldown, *unit).validate(),
            _ => Ok(()),
        }
    }

    /// Split into name, comment and type-specific data
    pub(crate) fn into_parts(self) -> (String, String, NodeKind) {
        match self {
            Self::Timer {
                interval,
                start_delay,
                limit,
                cooldown,
                unit,
                name,
                comment,
            } => (
                name,
                comment,
                NodeKind::Timer(TimerNode::new(interval, start_delay, limit, cooldown, unit)),
            ),
            Self::Comment { name, comment } => (name, comment, NodeKind::Comment),
            Self::Function { function, argument } => (
                function.name().to_string(),
                argument.clone(),
                NodeKind::Function(FunctionNode::new(function, argument)),
            ),
            Self::Operator {
                operator,
                name,
                comment,
            } => (name, comment, NodeKind::Operator(OperatorNode::new(operator))),
            Self::MemoryInteger {
                value,
                name,
                comment,
            } => (
                name,
                comment,
                NodeKind::MemoryInteger(MemIntegerNode::new(value)),
            ),
        }
    }

    /// Parse the string arguments of a console command.
    ///
    /// Argument order per node type:
    /// - timer: `interval startdelay limit cooldown name comment format`
    /// - comment: `comment name`
    /// - function: `code argument`
    /// - operator: `kind name comment`
    /// - memory integer: `value name comment`
    pub fn from_console_args(node_type: NodeType, args: &[&str]) -> Result<Self, NodeError> {
        match node_type {
            NodeType::Timer => {
                expect_count(node_type, args, 7)?;
                let code: u32 = parse_field(node_type, "format", args[6])?;
                let unit = TimeUnit::from_code(code).ok_or_else(|| {
                    NodeError::invalid(node_type, format!("unknown time format {code}"))
                })?;
                Ok(Self::Timer {
                    interval: parse_field(node_type, "interval", args[0])?,
                    start_delay: parse_field(node_type, "start delay", args[1])?,
                    limit: parse_field(node_type, "limit", args[2])?,
                    cooldown: parse_field(node_type, "cooldown", args[3])?,
                    unit,
                    name: args[4].to_string(),
                    comment: args[5].to_string(),
                })
            }
            NodeType::Comment => {
                expect_count(node_type, args, 2)?;
                Ok(Self::Comment {
                    comment: args[0].to_string(),
                    name: args[1].to_string(),
                })
            }
            NodeType::Function => {
                expect_count(node_type, args, 2)?;
                let code: u32 = parse_field(node_type, "function", args[0])?;
                let function =
                    FunctionId::from_code(code).ok_or(NodeError::UnknownFunction(code))?;
                Ok(Self::Function {
                    function,
                    argument: args[1].to_string(),
                })
            }
            NodeType::Operator => {
                expect_count(node_type, args, 3)?;
                let operator = OperatorKind::parse(args[0]).ok_or_else(|| {
                    NodeError::invalid(node_type, format!("unknown operator '{}'", args[0]))
                })?;
                Ok(Self::Operator {
                    operator,
                    name: args[1].to_string(),
                    comment: args[2].to_string(),
                })
            }
            NodeType::MemoryInteger => {
                expect_count(node_type, args, 3)?;
                Ok(Self::MemoryInteger {
                    value: parse_field(node_type, "value", args[0])?,
                    name: args[1].to_string(),
                    comment: args[2].to_string(),
                })
            }
        }
    }
}

fn expect_count(node_type: NodeType, args: &[&str], expected: usize) -> Result<(), NodeError> {
    if args.len() != expected {
        return Err(NodeError::invalid(
            node_type,
            format!("expected {expected} arguments, got {}", args.len()),
        ));
    }
    Ok(())
}

fn parse_field<T: FromStr>(node_type: NodeType, field: &str, raw: &str) -> Result<T, NodeError> {
    raw.trim()
        .parse()
        .map_err(|_| {
            NodeError::invalid(node_type, format!("{field} '{raw}' is not a valid number"))
        })
}
