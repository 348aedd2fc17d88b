//! Inventory graph compiler for the Composable Information Machine
//!
//! Compiles a point-in-time capture of cloud infrastructure (VPCs, subnets,
//! instances) or access control (users, roles, groups, local policies) into
//! an ordered set of subject–predicate–object statements.
//!
//! The pipeline is leaf-first:
//!
//! 1. [`domain::TermBuilder`] validates node identifiers and literals
//! 2. [`schema::SchemaRegistry`] maps each kind to its type tag and properties
//! 3. [`compiler::EntityCompiler`] turns one record into its statements
//! 4. [`linker::HierarchyLinker`] wires `ParentOf` edges between records
//! 5. [`assembler::GraphAssembler`] runs a whole snapshot into a [`Graph`]
//!
//! Fetching inventory, storing graphs and querying them are left to callers.

pub mod assembler;
pub mod compiler;
pub mod config;
pub mod domain;
pub mod errors;
pub mod graph;
pub mod linker;
pub mod schema;

// Re-export commonly used types
pub use assembler::{assemble_access_graph, assemble_infra_graph, GraphAssembler};
pub use config::{GraphConfig, TermConfig};
pub use errors::{GraphError, GraphResult};
pub use graph::{Graph, GraphMetadata, Topology};
