// SPDX-License-Identifier: MIT OR Apache-2.0
//! Presentation hints for the renderer.
//!
//! None of this affects graph semantics; it tells the host how to draw
//! node boxes.

use crate::graph::Graph;
use crate::node::{Node, NodeId};

/// Box color of a node that ran recently
pub const ACTIVE_BOX_COLOR: u32 = 0x9042FF;

/// Box color of an idle node
pub const IDLE_BOX_COLOR: u32 = 0x0097FF;

/// How a node should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeAppearance {
    /// Node ID
    pub id: NodeId,
    /// Box color as 0xRRGGBB
    pub box_color: u32,
    /// Node is selected in the editor
    pub selected: bool,
    /// Node ran during the latest pass
    pub triggered: bool,
}

impl NodeAppearance {
    fn of(node: &Node, now: u64, highlight_ms: u64) -> Self {
        let recent = node
            .last_time
            .is_some_and(|t| now.saturating_sub(t) < highlight_ms);
        Self {
            id: node.id,
            box_color: if recent { ACTIVE_BOX_COLOR } else { IDLE_BOX_COLOR },
            selected: node.selected,
            triggered: node.triggered,
        }
    }
}

impl Graph {
    /// Presentation hints for one node, relative to the latest pass
    pub fn appearance(&self, node_id: NodeId) -> Option<NodeAppearance> {
        let now = self.last_pass().unwrap_or(0);
        self.node(node_id)
            .map(|n| NodeAppearance::of(n, now, self.config().highlight_ms))
    }

    /// Presentation hints for every node in insertion order
    pub fn appearances(&self) -> impl Iterator<Item = NodeAppearance> + '_ {
        let now = self.last_pass().unwrap_or(0);
        let highlight_ms = self.config().highlight_ms;
        self.nodes().map(move |n| NodeAppearance::of(n, now, highlight_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::NodeParams;
    use crate::timer::TimeUnit;

    #[test]
    fn test_highlight_window() {
        let mut graph = Graph::default();
        let t = graph
            .add_node(
                [0.0; 3],
                NodeParams::Timer {
                    interval: 1000,
                    start_delay: 0,
                    limit: 0,
                    cooldown: 0,
                    unit: TimeUnit::Milliseconds,
                    name: "t".to_string(),
                    comment: String::new(),
                },
            )
            .unwrap();

        graph.run_tick_at(0);
        assert_eq!(graph.appearance(t).unwrap().box_color, IDLE_BOX_COLOR);

        graph.run_tick_at(1000);
        let look = graph.appearance(t).unwrap();
        assert_eq!(look.box_color, ACTIVE_BOX_COLOR);
        assert!(look.triggered);

        graph.run_tick_at(1199);
        assert_eq!(graph.appearance(t).unwrap().box_color, ACTIVE_BOX_COLOR);
        graph.run_tick_at(1200);
        let look = graph.appearance(t).unwrap();
        assert_eq!(look.box_color, IDLE_BOX_COLOR);
        assert!(!look.triggered);
    }

    #[test]
    fn test_appearances_follow_selection() {
        let mut graph = Graph::default();
        let a = graph
            .add_node(
                [0.0; 3],
                NodeParams::Comment {
                    name: "a".to_string(),
                    comment: String::new(),
                },
            )
            .unwrap();
        graph.set_selected(a, true).unwrap();
        let looks: Vec<_> = graph.appearances().collect();
        assert_eq!(looks.len(), 1);
        assert!(looks[0].selected);
        assert_eq!(looks[0].box_color, IDLE_BOX_COLOR);
    }
}
