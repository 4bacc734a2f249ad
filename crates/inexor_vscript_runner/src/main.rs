// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless host for Inexor visual scripting graphs.
//!
//! Loads a graph document (or builds the demo graph), then drives it the way
//! the game's main loop does: one synchronized pass per frame.

mod demo;

use anyhow::{Context, Result};
use inexor_vscript::{Clock, EngineConfig, Graph, MonotonicClock};
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, StructOpt)]
#[structopt(name = "vscript_runner", about = "Run an Inexor visual scripting graph")]
struct Opt {
    /// Graph document to run; the demo graph is used when omitted
    #[structopt(parse(from_os_str), short, long)]
    graph: Option<PathBuf>,

    /// Engine configuration file
    #[structopt(parse(from_os_str), short, long)]
    config: Option<PathBuf>,

    /// How long to run, in milliseconds
    #[structopt(short, long, default_value = "3500")]
    duration_ms: u64,

    /// Time between passes, in milliseconds
    #[structopt(short, long, default_value = "16")]
    frame_ms: u64,

    /// Write the graph document here before exiting
    #[structopt(parse(from_os_str), short, long)]
    save: Option<PathBuf>,
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("inexor_vscript=debug,vscript_runner=info")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting vscript runner v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(Opt::from_args()) {
        tracing::error!("Runner failed: {e:#}");
        std::process::exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    let config = match &opt.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let mut graph = match &opt.graph {
        Some(path) => Graph::load(path, config)
            .with_context(|| format!("loading graph {}", path.display()))?,
        None => demo::build(config)?,
    };
    tracing::info!(
        "Running graph '{}' ({} nodes, {} edges) for {} ms",
        graph.name,
        graph.node_count(),
        graph.edge_count(),
        opt.duration_ms
    );

    let clock = MonotonicClock::new();
    let frame = Duration::from_millis(opt.frame_ms.max(1));
    let mut passes = 0u64;
    let mut fired = 0usize;
    while clock.now_ms() < opt.duration_ms {
        let report = graph.run_tick(&clock);
        passes += 1;
        fired += report.fired.len();
        for line in graph.take_output() {
            println!("[{:>6} ms] {}", line.timestamp, line.text);
        }
        std::thread::sleep(frame);
    }

    tracing::info!("Finished after {passes} passes, {fired} timer firings");
    for node in graph.nodes() {
        if let Some(cell) = node.as_memory() {
            tracing::info!("Memory '{}' = {}", node.name, cell.value);
        }
    }

    if let Some(path) = &opt.save {
        graph
            .save(path)
            .with_context(|| format!("saving graph {}", path.display()))?;
        tracing::info!("Saved graph to {}", path.display());
    }
    Ok(())
}
