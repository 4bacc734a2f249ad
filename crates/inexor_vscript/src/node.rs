// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions shared by every script node type.

use crate::error::NodeError;
use crate::function::FunctionNode;
use crate::memory::MemIntegerNode;
use crate::operator::OperatorNode;
use crate::params::NodeParams;
use crate::timer::TimerNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Node type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Fires on an interval
    Timer,
    /// Descriptive text only
    Comment,
    /// Calls an engine function
    Function,
    /// Increments or decrements memory cells
    Operator,
    /// Holds one integer
    MemoryInteger,
}

impl NodeType {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timer => "timer",
            Self::Comment => "comment",
            Self::Function => "function",
            Self::Operator => "operator",
            Self::MemoryInteger => "memory integer",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-specific node data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Timer node
    Timer(TimerNode),
    /// Comment node
    Comment,
    /// Function call node
    Function(FunctionNode),
    /// Operator node
    Operator(OperatorNode),
    /// Memory integer node
    MemoryInteger(MemIntegerNode),
}

impl NodeKind {
    /// Get the type tag
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Timer(_) => NodeType::Timer,
            Self::Comment => NodeType::Comment,
            Self::Function(_) => NodeType::Function,
            Self::Operator(_) => NodeType::Operator,
            Self::MemoryInteger(_) => NodeType::MemoryInteger,
        }
    }
}

/// Direction of a link as seen from the node recording it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    /// The other node points at this one
    Incoming,
    /// This node points at the other one
    Outgoing,
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Comment shown below the name
    pub comment: String,
    /// Position in the level, supplied by the host
    pub position: [f32; 3],
    /// Type-specific data
    pub kind: NodeKind,
    /// Nodes linking into this one
    incoming: Vec<NodeId>,
    /// Nodes this one links to
    outgoing: Vec<NodeId>,
    /// Timestamp of the last time this node's action ran
    #[serde(skip)]
    pub last_time: Option<u64>,
    /// Timestamp of the latest pass that touched this node
    #[serde(skip)]
    pub this_time: u64,
    /// Whether the node's action ran during the current pass
    #[serde(skip)]
    pub triggered: bool,
    /// Editor selection state
    #[serde(skip)]
    pub selected: bool,
}

impl Node {
    /// Create a node from validated parameters
    pub fn create(position: [f32; 3], params: NodeParams) -> Result<Self, NodeError> {
        params.validate()?;
        let (name, comment, kind) = params.into_parts();
        Ok(Self {
            id: NodeId::new(),
            name,
            comment,
            position,
            kind,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            last_time: None,
            this_time: 0,
            triggered: false,
            selected: false,
        })
    }

    /// Get the type tag
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Check the type-specific values, as construction does
    pub fn validate(&self) -> Result<(), NodeError> {
        match &self.kind {
            NodeKind::Timer(timer) => timer.validate(),
            _ => Ok(()),
        }
    }

    /// Nodes linking into this one, in link order
    pub fn incoming(&self) -> &[NodeId] {
        &self.incoming
    }

    /// Nodes this one links to, in link order
    pub fn outgoing(&self) -> &[NodeId] {
        &self.outgoing
    }

    /// Get the timer data if this is a timer node
    pub fn as_timer(&self) -> Option<&TimerNode> {
        match &self.kind {
            NodeKind::Timer(timer) => Some(timer),
            _ => None,
        }
    }

    /// Get the memory cell if this is a memory integer node
    pub fn as_memory(&self) -> Option<&MemIntegerNode> {
        match &self.kind {
            NodeKind::MemoryInteger(cell) => Some(cell),
            _ => None,
        }
    }

    /// Advance temporal state to `now`. Returns true if the node fired.
    ///
    /// Only timers have temporal behavior; every other type is a no-op.
    pub fn tick(&mut self, now: u64) -> bool {
        self.this_time = now;
        let fired = match &mut self.kind {
            NodeKind::Timer(timer) => timer.tick(now),
            _ => false,
        };
        if fired {
            self.mark_triggered(now);
        }
        fired
    }

    /// Restore the initial temporal state
    pub fn reset(&mut self) {
        if let NodeKind::Timer(timer) = &mut self.kind {
            timer.reset();
        }
    }

    /// Record a non-owning link to another node.
    ///
    /// Compatibility between node types is not checked here; operators
    /// skip ineligible children when they execute.
    pub fn link(&mut self, other: NodeId, direction: LinkDirection) {
        match direction {
            LinkDirection::Incoming => self.incoming.push(other),
            LinkDirection::Outgoing => self.outgoing.push(other),
        }
    }

    /// Check for a link to another node
    pub fn is_linked(&self, other: NodeId, direction: LinkDirection) -> bool {
        match direction {
            LinkDirection::Incoming => self.incoming.contains(&other),
            LinkDirection::Outgoing => self.outgoing.contains(&other),
        }
    }

    /// Drop every link to another node in one direction
    pub(crate) fn unlink(&mut self, other: NodeId, direction: LinkDirection) {
        match direction {
            LinkDirection::Incoming => self.incoming.retain(|id| *id != other),
            LinkDirection::Outgoing => self.outgoing.retain(|id| *id != other),
        }
    }

    pub(crate) fn mark_triggered(&mut self, now: u64) {
        self.triggered = true;
        self.last_time = Some(now);
        self.this_time = now;
    }
}
