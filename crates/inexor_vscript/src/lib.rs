// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph engine for Inexor 3D visual scripting.
//!
//! The engine owns a collection of script nodes placed in the level editor:
//! - Timer nodes that fire on a shared, synchronized clock
//! - Comment nodes
//! - Function nodes (console output)
//! - Operator nodes acting on memory integer cells
//! - Memory integer nodes
//!
//! ## Architecture
//!
//! A [`Graph`] exclusively owns its [`Node`]s. Connections are stored as
//! [`NodeId`] handles on both endpoints, and the graph keeps them symmetric.
//! The host calls [`Graph::run_tick`] once per main-loop iteration; every
//! timer is stamped with one shared timestamp so timers never drift apart.

pub mod appearance;
pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod function;
pub mod graph;
pub mod memory;
pub mod node;
pub mod operator;
pub mod params;
pub mod timer;

pub use appearance::NodeAppearance;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::EngineConfig;
pub use document::{GraphDocument, GRAPH_FORMAT_VERSION};
pub use error::{GraphError, NodeError};
pub use function::{ConsoleLine, FunctionId, FunctionNode};
pub use graph::{Graph, TickReport};
pub use memory::MemIntegerNode;
pub use node::{LinkDirection, Node, NodeId, NodeKind, NodeType};
pub use operator::{OperatorKind, OperatorNode};
pub use params::NodeParams;
pub use timer::{TimeUnit, TimerNode, TimerState};
