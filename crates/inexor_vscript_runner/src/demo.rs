// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in demo graph.
//!
//! A one-second timer prints a greeting and counts its firings, built from
//! console-style arguments like the editor's `addtimer`/`addconoutf`
//! commands would.

use anyhow::Result;
use inexor_vscript::{EngineConfig, Graph, NodeType};

/// Grid size used to lay out demo nodes
const GRID: f32 = 16.0;

/// Build the demo graph
pub fn build(config: EngineConfig) -> Result<Graph> {
    let mut graph = Graph::with_config("demo", config);
    let at = |column: f32| [column * GRID + GRID / 2.0, GRID / 2.0, 512.0 + GRID / 2.0];

    let timer = graph.add_node_from_args(
        at(0.0),
        NodeType::Timer,
        &["1000", "0", "3", "0", "TimerNode1", "Hello world", "0"],
    )?;
    let greet = graph.add_node_from_args(
        at(2.0),
        NodeType::Function,
        &["0", "Hello World to the game console. I am 3DVS!"],
    )?;
    let count = graph.add_node_from_args(at(2.0), NodeType::Operator, &["increment", "count", ""])?;
    let firings =
        graph.add_node_from_args(at(4.0), NodeType::MemoryInteger, &["0", "firings", ""])?;
    graph.add_node_from_args(
        at(-2.0),
        NodeType::Comment,
        &["fires three times, one second apart", "Demo"],
    )?;

    graph.connect(timer, greet)?;
    graph.connect(timer, count)?;
    graph.connect(count, firings)?;
    Ok(graph)
}
