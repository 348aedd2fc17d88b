//! Error types for graph compilation

use thiserror::Error;

use crate::domain::{NodeKind, TermViolation};

/// Errors that can occur while compiling an inventory snapshot into a graph
///
/// Every variant is fatal to the assembler call that raised it: no partial
/// graph is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A natural identifier was rejected by the term builder
    #[error("Invalid identifier for {kind} node {id:?}: {reason}")]
    InvalidIdentifier {
        kind: NodeKind,
        id: String,
        reason: TermViolation,
    },

    /// A literal value was rejected by the term builder
    #[error("Invalid literal {text:?}: {reason}")]
    InvalidLiteral { text: String, reason: TermViolation },

    /// No schema is registered for this kind
    #[error("Type {0} is not managed")]
    UnknownKind(NodeKind),

    /// A record was handed to the compiler under the wrong kind
    #[error("Record of kind {actual} cannot be compiled as {expected}")]
    KindMismatch { expected: NodeKind, actual: NodeKind },

    /// An access join table names an entity that is absent from the snapshot
    #[error("{container_kind} {container_id} has {member_kind} {member_id}, but this {member_kind} does not exist")]
    DanglingReference {
        container_kind: NodeKind,
        container_id: String,
        member_kind: NodeKind,
        member_id: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Serialization(err.to_string())
    }
}
