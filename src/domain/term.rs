// Copyright (c) 2025 - Cowboy AI, Inc.
//! Graph Terms: Node Identifiers and Literals with Validation Invariants
//!
//! Every node and literal that reaches a statement goes through a
//! [`TermBuilder`], which enforces the term grammar:
//!
//! - identifiers are non-empty, bounded, and free of whitespace, control
//!   characters and the delimiters `<`, `>`, `"`, `\`
//! - literals are bounded and free of control characters other than tab,
//!   line feed and carriage return

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::TermConfig;
use crate::errors::{GraphError, GraphResult};

/// Reason a term was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TermViolation {
    #[error("term is empty")]
    Empty,

    #[error("term is {len} bytes long, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Entity kinds that can appear as graph nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Cloud region, root of both topologies
    Region,
    /// Virtual network (VPC)
    Network,
    /// Subnet of a network
    Subnet,
    /// Compute instance
    Instance,
    /// IAM user
    Identity,
    /// IAM role
    Role,
    /// IAM group
    Group,
    /// Local IAM policy
    Policy,
}

impl NodeKind {
    /// Every kind, in topology order
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Region,
        NodeKind::Network,
        NodeKind::Subnet,
        NodeKind::Instance,
        NodeKind::Identity,
        NodeKind::Role,
        NodeKind::Group,
        NodeKind::Policy,
    ];

    /// Graph type path used for node identifiers and type tags
    pub fn type_path(&self) -> &'static str {
        match self {
            Self::Region => "/region",
            Self::Network => "/vpc",
            Self::Subnet => "/subnet",
            Self::Instance => "/instance",
            Self::Identity => "/user",
            Self::Role => "/role",
            Self::Group => "/group",
            Self::Policy => "/policy",
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Network => "network",
            Self::Subnet => "subnet",
            Self::Instance => "instance",
            Self::Identity => "identity",
            Self::Role => "role",
            Self::Group => "group",
            Self::Policy => "policy",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Graph node identified by `(kind, natural id)`
///
/// Two nodes are equal iff both parts are equal. Nodes built by a
/// [`TermBuilder`] satisfy the identifier grammar. Deserialized nodes are
/// trusted as written and are not re-validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    kind: NodeKind,
    id: String,
}

impl Node {
    /// Kind of the entity behind this node
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Natural identifier, e.g. `vpc-0a1b2c`
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.kind.type_path(), self.id)
    }
}

/// Scalar text value attached to a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Literal(String);

impl Literal {
    /// Text of the literal
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"^^type:text", self.0)
    }
}

impl AsRef<str> for Literal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds validated nodes and literals
#[derive(Debug, Clone, Default)]
pub struct TermBuilder {
    config: TermConfig,
}

impl TermBuilder {
    /// Create a term builder enforcing the given limits
    pub fn new(config: TermConfig) -> Self {
        Self { config }
    }

    /// Limits in force
    pub fn config(&self) -> &TermConfig {
        &self.config
    }

    /// Build the node for `(kind, natural_id)`
    pub fn node(&self, kind: NodeKind, natural_id: &str) -> GraphResult<Node> {
        self.validate_identifier(natural_id)
            .map_err(|reason| GraphError::InvalidIdentifier {
                kind,
                id: natural_id.to_string(),
                reason,
            })?;

        Ok(Node {
            kind,
            id: natural_id.to_string(),
        })
    }

    /// Build a text literal
    pub fn literal(&self, text: &str) -> GraphResult<Literal> {
        self.validate_literal(text)
            .map_err(|reason| GraphError::InvalidLiteral {
                text: text.to_string(),
                reason,
            })?;

        Ok(Literal(text.to_string()))
    }

    fn validate_identifier(&self, id: &str) -> Result<(), TermViolation> {
        if id.is_empty() {
            return Err(TermViolation::Empty);
        }

        if id.len() > self.config.max_identifier_len {
            return Err(TermViolation::TooLong {
                len: id.len(),
                max: self.config.max_identifier_len,
            });
        }

        match id
            .chars()
            .find(|&c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"' | '\\'))
        {
            Some(c) => Err(TermViolation::InvalidCharacter(c)),
            None => Ok(()),
        }
    }

    fn validate_literal(&self, text: &str) -> Result<(), TermViolation> {
        if text.len() > self.config.max_literal_len {
            return Err(TermViolation::TooLong {
                len: text.len(),
                max: self.config.max_literal_len,
            });
        }

        match text
            .chars()
            .find(|&c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
        {
            Some(c) => Err(TermViolation::InvalidCharacter(c)),
            None => Ok(()),
        }
    }
}
