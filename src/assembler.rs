// Copyright (c) 2025 - Cowboy AI, Inc.
//! Graph Assembler
//!
//! Entry point of the compiler. One call takes a region id and one snapshot,
//! and returns either a complete [`Graph`] or the first error encountered:
//!
//! ```text
//! region + snapshot
//!      │
//!      ▼
//! compile_region ──► HierarchyLinker ──► [dedup] ──► Graph
//!                     (EntityCompiler per record)
//! ```
//!
//! Statements are accumulated in a buffer owned by the call; on error the
//! buffer is dropped, so a caller never observes a partial graph.
//!
//! # Example
//!
//! ```rust
//! use cim_inventory_graph::{GraphAssembler, GraphConfig};
//! use cim_inventory_graph::domain::{InfraSnapshot, Instance, Subnet, Vpc};
//!
//! let assembler = GraphAssembler::new(GraphConfig::default()).unwrap();
//! let snapshot = InfraSnapshot::default()
//!     .with_vpc(Vpc::new("vpc-1"))
//!     .with_subnet(Subnet::new("subnet-1").in_vpc("vpc-1"))
//!     .with_instance(Instance::new("i-1").in_subnet("subnet-1").with_type("t2.micro"));
//!
//! let graph = assembler.assemble_infra_graph("eu-west-1", &snapshot).unwrap();
//! assert_eq!(graph.metadata().region, "eu-west-1");
//! ```

use tracing::info;

use crate::compiler::EntityCompiler;
use crate::config::GraphConfig;
use crate::domain::{AccessSnapshot, InfraSnapshot, Node, Statement, TermBuilder};
use crate::errors::GraphResult;
use crate::graph::{Graph, GraphMetadata, Topology};
use crate::linker::HierarchyLinker;
use crate::schema::SchemaRegistry;

/// Builds graphs from snapshots
///
/// Holds only immutable state, so one assembler can serve any number of
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct GraphAssembler {
    config: GraphConfig,
    terms: TermBuilder,
    registry: SchemaRegistry,
}

impl GraphAssembler {
    /// Validate `config` and build the AWS schema registry
    pub fn new(config: GraphConfig) -> GraphResult<Self> {
        config.validate()?;
        let terms = TermBuilder::new(config.term.clone());
        let registry = SchemaRegistry::aws(&terms)?;

        Ok(Self {
            config,
            terms,
            registry,
        })
    }

    /// Use a caller-supplied schema registry instead of the AWS one
    pub fn with_registry(config: GraphConfig, registry: SchemaRegistry) -> GraphResult<Self> {
        config.validate()?;
        let terms = TermBuilder::new(config.term.clone());

        Ok(Self {
            config,
            terms,
            registry,
        })
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn terms(&self) -> &TermBuilder {
        &self.terms
    }

    /// Users, roles, groups and local policies of `region`
    pub fn assemble_access_graph(
        &self,
        region: &str,
        snapshot: &AccessSnapshot,
    ) -> GraphResult<Graph> {
        self.assemble(region, Topology::Access, |linker, root, out| {
            linker.link_access(root, snapshot, out)
        })
    }

    /// VPCs, subnets and instances of `region`
    pub fn assemble_infra_graph(
        &self,
        region: &str,
        snapshot: &InfraSnapshot,
    ) -> GraphResult<Graph> {
        self.assemble(region, Topology::Infrastructure, |linker, root, out| {
            linker.link_infrastructure(root, snapshot, out)
        })
    }

    fn assemble<F>(&self, region: &str, topology: Topology, link: F) -> GraphResult<Graph>
    where
        F: FnOnce(&HierarchyLinker<'_>, &Node, &mut Vec<Statement>) -> GraphResult<()>,
    {
        let compiler = EntityCompiler::new(&self.terms, &self.registry);
        let linker = HierarchyLinker::new(compiler);

        let root = compiler.compile_region(region)?;
        let mut statements = root.statements;
        link(&linker, &root.node, &mut statements)?;

        let mut graph = Graph::new(GraphMetadata::new(region, topology), statements);
        if self.config.deduplicate {
            graph = graph.deduplicated();
        }

        info!(
            region,
            topology = %topology,
            statements = graph.len(),
            graph_id = %graph.metadata().graph_id,
            "graph assembled"
        );

        Ok(graph)
    }
}

/// Assemble an access graph with the default configuration
pub fn assemble_access_graph(region: &str, snapshot: &AccessSnapshot) -> GraphResult<Graph> {
    GraphAssembler::new(GraphConfig::default())?.assemble_access_graph(region, snapshot)
}

/// Assemble an infrastructure graph with the default configuration
pub fn assemble_infra_graph(region: &str, snapshot: &InfraSnapshot) -> GraphResult<Graph> {
    GraphAssembler::new(GraphConfig::default())?.assemble_infra_graph(region, snapshot)
}
