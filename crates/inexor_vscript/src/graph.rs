// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph engine: node ownership, connections and the synchronized tick pass.

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::error::{GraphError, Result};
use crate::function::ConsoleLine;
use crate::node::{LinkDirection, Node, NodeId, NodeKind, NodeType};
use crate::params::NodeParams;
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};

/// What happened during one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Shared pass timestamp
    pub timestamp: u64,
    /// Timers that fired, in insertion order
    pub fired: Vec<NodeId>,
    /// Nodes executed through explicit calls or propagation, in execution order
    pub executed: Vec<NodeId>,
}

impl TickReport {
    fn new(timestamp: u64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    /// True if nothing fired or executed
    pub fn is_empty(&self) -> bool {
        self.fired.is_empty() && self.executed.is_empty()
    }
}

/// A visual scripting node graph
#[derive(Debug, Clone)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in insertion order
    nodes: IndexMap<NodeId, Node>,
    /// Engine settings
    config: EngineConfig,
    /// Console output not yet taken by the host
    output: VecDeque<ConsoleLine>,
    /// Timestamp of the latest pass
    last_pass: Option<u64>,
}

impl Graph {
    /// Create a new empty graph with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, EngineConfig::default())
    }

    /// Create a new empty graph
    pub fn with_config(name: impl Into<String>, config: EngineConfig) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            config,
            output: VecDeque::new(),
            last_pass: None,
        }
    }

    /// Engine settings
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace engine settings
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.trim_output();
    }

    /// Timestamp of the latest pass
    pub fn last_pass(&self) -> Option<u64> {
        self.last_pass
    }

    /// Create a node and add it to the graph.
    ///
    /// Adding a timer re-synchronizes every timer so they share one phase.
    /// On error nothing is added.
    pub fn add_node(&mut self, position: [f32; 3], params: NodeParams) -> Result<NodeId> {
        let node = Node::create(position, params)?;
        let id = node.id;
        let is_timer = node.node_type() == NodeType::Timer;
        tracing::debug!(
            "Added {} node {id} '{}' at {:?}",
            node.node_type(),
            node.name,
            node.position
        );
        self.nodes.insert(id, node);

        if is_timer {
            self.sync_timers();
        }
        Ok(id)
    }

    /// Create a node from console command arguments
    pub fn add_node_from_args(
        &mut self,
        position: [f32; 3],
        node_type: NodeType,
        args: &[&str],
    ) -> Result<NodeId> {
        let params = NodeParams::from_console_args(node_type, args)?;
        self.add_node(position, params)
    }

    /// Insert an already built node, keeping its links as they are
    pub(crate) fn insert_raw(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id, node)
    }

    /// Remove a node and every link to it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let node = self.nodes.shift_remove(&node_id)?;
        for other in node.incoming().iter().chain(node.outgoing()) {
            if let Some(neighbour) = self.nodes.get_mut(other) {
                neighbour.unlink(node_id, LinkDirection::Incoming);
                neighbour.unlink(node_id, LinkDirection::Outgoing);
            }
        }
        tracing::debug!("Removed node {node_id}");
        Some(node)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Move a node to a new level position
    pub fn set_position(&mut self, node_id: NodeId, position: [f32; 3]) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        node.position = position;
        Ok(())
    }

    /// Change the name and comment shown above a node
    pub fn set_label(
        &mut self,
        node_id: NodeId,
        name: impl Into<String>,
        comment: impl Into<String>,
    ) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        node.name = name.into();
        node.comment = comment.into();
        Ok(())
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get all timer nodes in insertion order
    pub fn timers(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .values()
            .filter(|n| n.node_type() == NodeType::Timer)
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get every edge as `(from, to)`, grouped by source node
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .values()
            .flat_map(|n| n.outgoing().iter().map(move |to| (n.id, *to)))
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.outgoing().len()).sum()
    }

    /// Connect two nodes with a directed edge
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let source = self.nodes.get(&from).ok_or(GraphError::NodeNotFound(from))?;
        if !self.nodes.contains_key(&to) {
            return Err(GraphError::NodeNotFound(to));
        }
        if from == to && !self.config.allow_self_links {
            return Err(GraphError::SelfLink(from));
        }
        if source.is_linked(to, LinkDirection::Outgoing) {
            return Err(GraphError::AlreadyConnected { from, to });
        }

        if let Some(source) = self.nodes.get_mut(&from) {
            source.link(to, LinkDirection::Outgoing);
        }
        if let Some(target) = self.nodes.get_mut(&to) {
            target.link(from, LinkDirection::Incoming);
        }
        tracing::debug!("Connected {from} -> {to}");
        Ok(())
    }

    /// Remove a directed edge
    pub fn disconnect(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        if !self.is_connected(from, to) {
            return Err(GraphError::NotConnected { from, to });
        }
        if let Some(source) = self.nodes.get_mut(&from) {
            source.unlink(to, LinkDirection::Outgoing);
        }
        if let Some(target) = self.nodes.get_mut(&to) {
            target.unlink(from, LinkDirection::Incoming);
        }
        Ok(())
    }

    /// Check for a directed edge
    pub fn is_connected(&self, from: NodeId, to: NodeId) -> bool {
        self.nodes
            .get(&from)
            .is_some_and(|n| n.is_linked(to, LinkDirection::Outgoing))
    }

    /// Run one synchronized pass at the clock's current time
    pub fn run_tick(&mut self, clock: &dyn Clock) -> TickReport {
        self.run_tick_at(clock.now_ms())
    }

    /// Run one synchronized pass at `now`.
    ///
    /// Every timer is stamped with the same timestamp and ticked in
    /// insertion order, so timers never drift apart within a pass.
    pub fn run_tick_at(&mut self, now: u64) -> TickReport {
        self.last_pass = Some(now);
        let mut report = TickReport::new(now);

        for node in self.nodes.values_mut() {
            node.triggered = false;
        }

        for node in self.nodes.values_mut() {
            if node.node_type() != NodeType::Timer {
                continue;
            }
            if node.tick(now) {
                report.fired.push(node.id);
            }
        }

        if self.config.propagate_on_fire && !report.fired.is_empty() {
            let fired = report.fired.clone();
            self.propagate(&fired, now, &mut report);
        }
        report
    }

    /// Execute one node explicitly at `now`.
    ///
    /// Operator and function nodes run their action; the other types have
    /// nothing to execute. If the node acted and propagation is enabled,
    /// execution continues along its outgoing edges.
    pub fn execute(&mut self, node_id: NodeId, now: u64) -> Result<TickReport> {
        if !self.nodes.contains_key(&node_id) {
            return Err(GraphError::NodeNotFound(node_id));
        }
        let mut report = TickReport::new(now);
        if self.run_action(node_id, now) {
            report.executed.push(node_id);
            if self.config.propagate_on_fire {
                self.propagate(&[node_id], now, &mut report);
            }
        }
        Ok(report)
    }

    /// Reset every timer so they restart in phase on the next pass
    pub fn sync_timers(&mut self) {
        for node in self.nodes.values_mut() {
            if node.node_type() == NodeType::Timer {
                node.reset();
            }
        }
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.output.clear();
        self.last_pass = None;
        tracing::debug!("Cleared graph '{}'", self.name);
    }

    /// Take buffered console output
    pub fn take_output(&mut self) -> Vec<ConsoleLine> {
        self.output.drain(..).collect()
    }

    /// Buffered console output, oldest first
    pub fn output(&self) -> impl Iterator<Item = &ConsoleLine> {
        self.output.iter()
    }

    /// Set the editor selection flag of a node
    pub fn set_selected(&mut self, node_id: NodeId, selected: bool) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        node.selected = selected;
        Ok(())
    }

    /// The selected node, the last one in insertion order if several are
    pub fn selected_node(&self) -> Option<NodeId> {
        self.nodes.values().rev().find(|n| n.selected).map(|n| n.id)
    }

    /// Breadth-first execution from `roots` along outgoing edges.
    ///
    /// A node forwards only if its own action ran, and each node runs at
    /// most once per call, so cycles terminate.
    fn propagate(&mut self, roots: &[NodeId], now: u64, report: &mut TickReport) {
        let mut visited: HashSet<NodeId> = roots.iter().copied().collect();
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        for root in roots {
            self.enqueue_children(*root, &mut visited, &mut queue);
        }

        while let Some(node_id) = queue.pop_front() {
            if self.run_action(node_id, now) {
                report.executed.push(node_id);
                self.enqueue_children(node_id, &mut visited, &mut queue);
            }
        }
    }

    fn enqueue_children(
        &self,
        node_id: NodeId,
        visited: &mut HashSet<NodeId>,
        queue: &mut VecDeque<NodeId>,
    ) {
        let Some(node) = self.nodes.get(&node_id) else {
            return;
        };
        for child in node.outgoing() {
            if visited.insert(*child) {
                queue.push_back(*child);
            }
        }
    }

    /// Run the action of one node. Returns true if the node acted.
    fn run_action(&mut self, node_id: NodeId, now: u64) -> bool {
        let Some(node) = self.nodes.get(&node_id) else {
            return false;
        };
        match &node.kind {
            NodeKind::Operator(op) => {
                let operator = op.operator;
                let children = node.outgoing().to_vec();
                if children.is_empty() {
                    tracing::debug!(
                        "Operator {node_id} has no child nodes to {}",
                        operator.name()
                    );
                }
                for child in &children {
                    match self.nodes.get_mut(child).map(|n| &mut n.kind) {
                        Some(NodeKind::MemoryInteger(cell)) => operator.apply(cell),
                        Some(other) => tracing::debug!(
                            "Operator {node_id} skipped {} child {child}",
                            other.node_type()
                        ),
                        None => {}
                    }
                }
            }
            NodeKind::Function(function) => {
                let line = function.invoke(node_id, now);
                self.push_output(line);
            }
            NodeKind::Timer(_) | NodeKind::Comment | NodeKind::MemoryInteger(_) => return false,
        }

        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.mark_triggered(now);
        }
        true
    }

    fn push_output(&mut self, line: ConsoleLine) {
        self.output.push_back(line);
        self.trim_output();
    }

    fn trim_output(&mut self) {
        while self.output.len() > self.config.max_output_lines {
            self.output.pop_front();
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
