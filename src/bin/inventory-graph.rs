// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Graph CLI
//!
//! Reads one snapshot document, compiles it, and writes the statements to
//! stdout, one triple per line.
//!
//! Run with: cargo run --bin inventory-graph -- <infra|access> <region> <snapshot.json>
//!
//! Environment:
//! - `INVENTORY_GRAPH_MAX_LITERAL` - literal length limit (bytes)
//! - `INVENTORY_GRAPH_DEDUPLICATE` - `true`/`1` to drop repeated statements, `false`/`0` to keep them
//! - `INVENTORY_GRAPH_FORMAT` - `triples` (default) or `json`
//! - `RUST_LOG` - log filter, `info` when unset; logs go to stderr

use anyhow::{bail, Context, Result};
use cim_inventory_graph::domain::{AccessSnapshot, InfraSnapshot};
use cim_inventory_graph::{Graph, GraphAssembler, GraphConfig};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: inventory-graph <infra|access> <region> <snapshot.json>";

/// Output encoding for the compiled graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Triples,
    Json,
}

/// Command-line invocation
#[derive(Debug, Clone)]
struct Invocation {
    topology: String,
    region: String,
    snapshot_path: String,
    format: OutputFormat,
    graph: GraphConfig,
}

impl Invocation {
    /// Parse positional arguments and load configuration from the environment
    fn from_env() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::parse(&args, |name| std::env::var(name).ok())
    }

    /// Build an invocation from positional arguments and a variable lookup
    fn parse(args: &[String], var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let [topology, region, snapshot_path] = args else {
            bail!(USAGE);
        };

        let mut graph = GraphConfig::default();
        if let Some(max) = var("INVENTORY_GRAPH_MAX_LITERAL") {
            graph.term.max_literal_len = max
                .parse()
                .with_context(|| format!("INVENTORY_GRAPH_MAX_LITERAL is not a number: {max}"))?;
        }
        if let Some(flag) = var("INVENTORY_GRAPH_DEDUPLICATE") {
            graph.deduplicate = parse_flag(&flag)
                .with_context(|| format!("INVENTORY_GRAPH_DEDUPLICATE is not a boolean: {flag}"))?;
        }

        let format = match var("INVENTORY_GRAPH_FORMAT").as_deref() {
            Some("json") => OutputFormat::Json,
            Some("triples") | None => OutputFormat::Triples,
            Some(other) => bail!("unknown INVENTORY_GRAPH_FORMAT: {other}"),
        };

        Ok(Self {
            topology: topology.clone(),
            region: region.clone(),
            snapshot_path: snapshot_path.clone(),
            format,
            graph,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// `RUST_LOG` directives when set and parseable, `info` otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let invocation = Invocation::from_env()?;
    info!(
        topology = %invocation.topology,
        region = %invocation.region,
        snapshot = %invocation.snapshot_path,
        "compiling inventory snapshot"
    );

    let document = std::fs::read_to_string(&invocation.snapshot_path)
        .with_context(|| format!("failed to read {}", invocation.snapshot_path))?;

    let assembler =
        GraphAssembler::new(invocation.graph.clone()).context("invalid graph configuration")?;

    let graph = match invocation.topology.as_str() {
        "infra" => {
            let snapshot = InfraSnapshot::from_json(&document)
                .context("failed to parse infrastructure snapshot")?;
            assembler.assemble_infra_graph(&invocation.region, &snapshot)?
        }
        "access" => {
            let snapshot =
                AccessSnapshot::from_json(&document).context("failed to parse access snapshot")?;
            assembler.assemble_access_graph(&invocation.region, &snapshot)?
        }
        other => bail!("unknown topology {other:?}, expected infra or access"),
    };

    write_graph(&graph, invocation.format)
}

fn write_graph(graph: &Graph, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Triples => {
            for statement in graph {
                writeln!(out, "{statement}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, graph)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
