// SPDX-License-Identifier: MIT OR Apache-2.0
//! Saving and loading graphs as RON documents.
//!
//! Only definitions and links are stored. Runtime state (timer phase,
//! timestamps, selection) starts fresh on load, and every link is checked
//! before the graph is handed back.

use crate::config::EngineConfig;
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::node::{LinkDirection, Node};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Current graph document format version
pub const GRAPH_FORMAT_VERSION: u32 = 1;

/// Serialized form of a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Format version
    pub format_version: u32,
    /// Graph name
    pub name: String,
    /// Nodes in insertion order
    pub nodes: Vec<Node>,
}

impl Graph {
    /// Snapshot the graph definition
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            format_version: GRAPH_FORMAT_VERSION,
            name: self.name.clone(),
            nodes: self.nodes().cloned().collect(),
        }
    }

    /// Rebuild a graph from a document, validating every link
    pub fn from_document(document: GraphDocument, config: EngineConfig) -> Result<Self> {
        if document.format_version > GRAPH_FORMAT_VERSION {
            return Err(GraphError::UnsupportedVersion {
                found: document.format_version,
                supported: GRAPH_FORMAT_VERSION,
            });
        }

        let mut graph = Graph::with_config(document.name, config);
        for node in document.nodes {
            node.validate()?;
            let id = node.id;
            if graph.insert_raw(node).is_some() {
                return Err(GraphError::InvalidDocument(format!("duplicate node {id}")));
            }
        }
        validate_links(&graph)?;

        graph.sync_timers();
        tracing::debug!(
            "Loaded graph '{}' with {} nodes and {} edges",
            graph.name,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Serialize the graph definition to a RON string
    pub fn to_ron_string(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(&self.to_document(), config)?)
    }

    /// Parse a graph from a RON string
    pub fn from_ron_str(content: &str, config: EngineConfig) -> Result<Self> {
        let document: GraphDocument = ron::from_str(content)?;
        Self::from_document(document, config)
    }

    /// Save the graph definition to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// Load a graph from a file
    pub fn load(path: &Path, config: EngineConfig) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron_str(&content, config).inspect_err(|e| {
            tracing::warn!("Rejected graph file {}: {e}", path.display());
        })
    }
}

fn validate_links(graph: &Graph) -> Result<()> {
    for node in graph.nodes() {
        for (direction, links) in [
            (LinkDirection::Outgoing, node.outgoing()),
            (LinkDirection::Incoming, node.incoming()),
        ] {
            let mut seen = HashSet::new();
            for other in links {
                if !seen.insert(*other) {
                    return Err(GraphError::InvalidDocument(format!(
                        "node {} links to {other} twice",
                        node.id
                    )));
                }
                if *other == node.id && !graph.config().allow_self_links {
                    return Err(GraphError::InvalidDocument(format!(
                        "node {} links to itself",
                        node.id
                    )));
                }
                let Some(peer) = graph.node(*other) else {
                    return Err(GraphError::InvalidDocument(format!(
                        "node {} links to missing node {other}",
                        node.id
                    )));
                };
                let mirror = match direction {
                    LinkDirection::Outgoing => LinkDirection::Incoming,
                    LinkDirection::Incoming => LinkDirection::Outgoing,
                };
                if !peer.is_linked(node.id, mirror) {
                    return Err(GraphError::InvalidDocument(format!(
                        "link between {} and {other} is one-sided",
                        node.id
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionId;
    use crate::node::{NodeId, NodeKind};
    use crate::params::NodeParams;
    use crate::timer::{TimeUnit, TimerState};

    fn sample() -> (Graph, NodeId, NodeId) {
        let mut graph = Graph::new("sample");
        let t = graph
            .add_node(
                [8.0, 8.0, 520.0],
                NodeParams::Timer {
                    interval: 1,
                    start_delay: 0,
                    limit: 0,
                    cooldown: 0,
                    unit: TimeUnit::Seconds,
                    name: "TimerNode1".to_string(),
                    comment: "Hello world".to_string(),
                },
            )
            .unwrap();
        let f = graph
            .add_node(
                [24.0, 8.0, 520.0],
                NodeParams::Function {
                    function: FunctionId::ConsoleOutput,
                    argument: "I am 3DVS!".to_string(),
                },
            )
            .unwrap();
        graph.connect(t, f).unwrap();
        (graph, t, f)
    }

    #[test]
    fn test_serialization() {
        let (mut graph, t, f) = sample();
        graph.run_tick_at(0);
        graph.run_tick_at(1000);

        let ron_str = graph.to_ron_string().unwrap();
        let loaded = Graph::from_ron_str(&ron_str, EngineConfig::default()).unwrap();

        assert_eq!(loaded.name, "sample");
        assert_eq!(loaded.node_ids().collect::<Vec<_>>(), vec![t, f]);
        assert!(loaded.is_connected(t, f));
        assert_eq!(loaded.node(f).unwrap().incoming(), &[t]);

        let timer = loaded.node(t).unwrap().as_timer().unwrap();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.fire_count(), 0);
        assert_eq!(timer.unit, TimeUnit::Seconds);
        assert!(!loaded.node(t).unwrap().triggered);
        assert_eq!(loaded.node(t).unwrap().position, [8.0, 8.0, 520.0]);
        assert!(matches!(loaded.node(f).unwrap().kind, NodeKind::Function(_)));
    }

    #[test]
    fn test_rejects_newer_version() {
        let (graph, _, _) = sample();
        let mut document = graph.to_document();
        document.format_version = GRAPH_FORMAT_VERSION + 1;
        let result = Graph::from_document(document, EngineConfig::default());
        assert!(matches!(result, Err(GraphError::UnsupportedVersion { .. })));
    }

    #[test]
    fn test_rejects_dangling_link() {
        let (mut graph, _, f) = sample();
        graph.remove_node(f);
        let mut document = graph.to_document();
        document.nodes[0].link(NodeId::new(), LinkDirection::Outgoing);
        let result = Graph::from_document(document, EngineConfig::default());
        assert!(matches!(result, Err(GraphError::InvalidDocument(_))));
    }

    #[test]
    fn test_rejects_invalid_timer() {
        let (graph, t, _) = sample();
        let ron_str = graph.to_ron_string().unwrap();
        assert!(ron_str.contains("interval: 1,"));
        let broken = ron_str.replacen("interval: 1,", "interval: 0,", 1);

        let result = Graph::from_ron_str(&broken, EngineConfig::default());
        assert!(matches!(result, Err(GraphError::Node(_))));

        let mut document = graph.to_document();
        assert_eq!(document.nodes[0].id, t);
        if let NodeKind::Timer(timer) = &mut document.nodes[0].kind {
            timer.cooldown = u64::MAX;
        }
        let result = Graph::from_document(document, EngineConfig::default());
        assert!(matches!(result, Err(GraphError::Node(_))));
    }

    #[test]
    fn test_rejects_one_sided_link() {
        let (graph, t, _) = sample();
        let mut document = graph.to_document();
        // Second node points back at the timer without the timer knowing
        document.nodes[1].link(t, LinkDirection::Outgoing);
        let result = Graph::from_document(document, EngineConfig::default());
        assert!(matches!(result, Err(GraphError::InvalidDocument(_))));
    }

    #[test]
    fn test_rejects_duplicate_nodes() {
        let (graph, _, _) = sample();
        let mut document = graph.to_document();
        let copy = document.nodes[0].clone();
        document.nodes.push(copy);
        let result = Graph::from_document(document, EngineConfig::default());
        assert!(matches!(result, Err(GraphError::InvalidDocument(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        let result = Graph::from_ron_str("not a graph", EngineConfig::default());
        assert!(matches!(result, Err(GraphError::Parse(_))));
    }
}
