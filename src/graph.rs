// Copyright (c) 2025 - Cowboy AI, Inc.
//! Assembled Graph Artifact
//!
//! A [`Graph`] is the read-only output of one assembler call: the ordered
//! statement sequence plus metadata describing where it came from. The
//! helpers here are linear scans for consumers and tests; indexing and
//! pattern matching belong to whatever store the graph is loaded into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::domain::{Literal, Node, Object, Predicate, Statement};

/// Which snapshot shape a graph was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    Access,
    Infrastructure,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access => f.write_str("access"),
            Self::Infrastructure => f.write_str("infrastructure"),
        }
    }
}

/// Provenance of an assembled graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetadata {
    pub graph_id: Uuid,
    pub region: String,
    pub topology: Topology,
    pub assembled_at: DateTime<Utc>,
}

impl GraphMetadata {
    pub fn new(region: impl Into<String>, topology: Topology) -> Self {
        Self {
            graph_id: Uuid::now_v7(),
            region: region.into(),
            topology,
            assembled_at: Utc::now(),
        }
    }
}

/// Immutable, ordered statement sequence
///
/// Equality compares statements only; metadata is provenance, not content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    metadata: GraphMetadata,
    statements: Vec<Statement>,
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.statements == other.statements
    }
}

impl Eq for Graph {}

impl Graph {
    pub fn new(metadata: GraphMetadata, statements: Vec<Statement>) -> Self {
        Self {
            metadata,
            statements,
        }
    }

    pub fn metadata(&self) -> &GraphMetadata {
        &self.metadata
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    /// Every distinct node, in first-seen order
    pub fn nodes(&self) -> Vec<&Node> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for statement in &self.statements {
            let candidates = std::iter::once(&statement.subject).chain(statement.object.as_node());
            for node in candidates {
                if seen.insert(node) {
                    nodes.push(node);
                }
            }
        }
        nodes
    }

    /// Objects of `node ParentOf _`
    pub fn children_of(&self, node: &Node) -> Vec<&Node> {
        self.statements
            .iter()
            .filter(|s| s.predicate == Predicate::ParentOf && &s.subject == node)
            .filter_map(|s| s.object.as_node())
            .collect()
    }

    /// Subjects of `_ ParentOf node`
    pub fn parents_of(&self, node: &Node) -> Vec<&Node> {
        self.statements
            .iter()
            .filter(|s| s.predicate == Predicate::ParentOf && s.object.as_node() == Some(node))
            .map(|s| &s.subject)
            .collect()
    }

    /// Type tag of `node`, from its first `HasType` statement
    pub fn type_of(&self, node: &Node) -> Option<&Literal> {
        self.statements
            .iter()
            .find(|s| s.predicate == Predicate::HasType && &s.subject == node)
            .and_then(|s| s.object.as_literal())
    }

    /// Every `(property, value)` attached to `node`, in emission order
    pub fn properties_of(&self, node: &Node) -> Vec<(&str, &Literal)> {
        self.statements
            .iter()
            .filter(|s| &s.subject == node)
            .filter_map(|s| match (&s.predicate, &s.object) {
                (Predicate::Property(name), Object::Literal(value)) => Some((name.as_str(), value)),
                _ => None,
            })
            .collect()
    }

    /// Value of one property of `node`
    pub fn property(&self, node: &Node, name: &str) -> Option<&Literal> {
        self.properties_of(node)
            .into_iter()
            .find(|(property, _)| *property == name)
            .map(|(_, value)| value)
    }

    /// Number of statements using `predicate`
    pub fn count_predicate(&self, predicate: &Predicate) -> usize {
        self.statements
            .iter()
            .filter(|s| &s.predicate == predicate)
            .count()
    }

    /// Same graph with set semantics: first occurrence of each statement kept
    pub fn deduplicated(self) -> Self {
        let mut seen = HashSet::with_capacity(self.statements.len());
        let statements = self
            .statements
            .into_iter()
            .filter(|s| seen.insert(s.clone()))
            .collect();

        Self {
            metadata: self.metadata,
            statements,
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
