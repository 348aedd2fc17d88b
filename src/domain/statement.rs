// Copyright (c) 2025 - Cowboy AI, Inc.
//! Statements (triples) emitted by the compiler

use serde::{Deserialize, Serialize};
use std::fmt;

use super::term::{Literal, Node};

/// Predicate of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Asserts the kind of the subject; object is the type tag literal
    HasType,
    /// Hierarchy or membership edge; object is the child node
    ParentOf,
    /// Schema-declared scalar property; object is a literal
    Property(String),
}

impl Predicate {
    /// Name as it appears in the triple notation
    pub fn name(&self) -> &str {
        match self {
            Self::HasType => "has_type",
            Self::ParentOf => "parent_of",
            Self::Property(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"@[]", self.name())
    }
}

/// Object of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Object {
    Node(Node),
    Literal(Literal),
}

impl Object {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            Self::Node(_) => None,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => node.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
        }
    }
}

/// A subject–predicate–object fact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Node,
    pub predicate: Predicate,
    pub object: Object,
}

impl Statement {
    /// `node HasType tag`
    pub fn has_type(node: Node, type_tag: Literal) -> Self {
        Self {
            subject: node,
            predicate: Predicate::HasType,
            object: Object::Literal(type_tag),
        }
    }

    /// `parent ParentOf child`
    pub fn parent_of(parent: Node, child: Node) -> Self {
        Self {
            subject: parent,
            predicate: Predicate::ParentOf,
            object: Object::Node(child),
        }
    }

    /// `node <property> value`
    pub fn property(node: Node, property: impl Into<String>, value: Literal) -> Self {
        Self {
            subject: node,
            predicate: Predicate::Property(property.into()),
            object: Object::Literal(value),
        }
    }

    /// True for `ParentOf` statements
    pub fn is_edge(&self) -> bool {
        self.predicate == Predicate::ParentOf
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.subject, self.predicate, self.object)
    }
}
