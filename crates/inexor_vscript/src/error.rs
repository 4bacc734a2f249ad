// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for node construction and graph operations.

use crate::node::{NodeId, NodeType};

/// Error when constructing a node
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// Wrong parameter count or value for the node type
    #[error("Invalid parameters for {kind} node: {reason}")]
    InvalidParameters {
        /// Node type being constructed
        kind: NodeType,
        /// What was wrong
        reason: String,
    },

    /// Function code not known to the engine
    #[error("Unknown function identifier: {0}")]
    UnknownFunction(u32),
}

impl NodeError {
    pub(crate) fn invalid(kind: NodeType, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            kind,
            reason: reason.into(),
        }
    }
}

/// Error returned by graph operations
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node construction failed
    #[error(transparent)]
    Node(#[from] NodeError),

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Self-link not allowed
    #[error("Self-link not allowed: {0}")]
    SelfLink(NodeId),

    /// Nodes are already connected in this direction
    #[error("Nodes already connected: {from} -> {to}")]
    AlreadyConnected {
        /// Source node
        from: NodeId,
        /// Target node
        to: NodeId,
    },

    /// Nodes are not connected in this direction
    #[error("Nodes not connected: {from} -> {to}")]
    NotConnected {
        /// Source node
        from: NodeId,
        /// Target node
        to: NodeId,
    },

    /// Loaded graph document is inconsistent
    #[error("Invalid graph document: {0}")]
    InvalidDocument(String),

    /// Graph document written by a newer format
    #[error("Graph format version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the document
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// RON parse error
    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("RON serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
