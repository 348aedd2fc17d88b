// Copyright (c) 2025 - Cowboy AI, Inc.
//! Entity Compiler
//!
//! Turns one inventory record into its node, its `HasType` statement and one
//! property statement per non-empty schema field:
//!
//! ```text
//! Instance { InstanceId: "i-1", InstanceType: "t2.micro", ImageId: None }
//!      │
//!      ▼
//! /instance<i-1>  "has_type"@[]      "/instance"^^type:text
//! /instance<i-1>  "id"@[]            "i-1"^^type:text
//! /instance<i-1>  "instanceType"@[]  "t2.micro"^^type:text
//! ```
//!
//! Compilation is pure: the same record always yields the same statements,
//! and an error never leaves statements behind.

use crate::domain::{EntityRecord, InventoryRecord, Node, NodeKind, Statement, TermBuilder};
use crate::errors::{GraphError, GraphResult};
use crate::schema::SchemaRegistry;

/// Node and statements produced for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledEntity {
    pub node: Node,
    pub statements: Vec<Statement>,
}

/// Compiles records against a schema registry
#[derive(Debug, Clone, Copy)]
pub struct EntityCompiler<'a> {
    terms: &'a TermBuilder,
    registry: &'a SchemaRegistry,
}

impl<'a> EntityCompiler<'a> {
    pub fn new(terms: &'a TermBuilder, registry: &'a SchemaRegistry) -> Self {
        Self { terms, registry }
    }

    pub fn terms(&self) -> &'a TermBuilder {
        self.terms
    }

    /// Compile `record` as a `kind` node named `natural_id`
    pub fn compile(
        &self,
        kind: NodeKind,
        natural_id: &str,
        record: EntityRecord<'_>,
    ) -> GraphResult<CompiledEntity> {
        if record.kind() != kind {
            return Err(GraphError::KindMismatch {
                expected: kind,
                actual: record.kind(),
            });
        }

        let schema = self.registry.resolve(kind)?;
        let node = self.terms.node(kind, natural_id)?;

        let mut statements = Vec::with_capacity(schema.fields().len() + 1);
        statements.push(Statement::has_type(node.clone(), schema.type_tag().clone()));

        for field in schema.fields() {
            if let Some(value) = field.extract(record) {
                let literal = self.terms.literal(value)?;
                statements.push(Statement::property(node.clone(), field.property(), literal));
            }
        }

        Ok(CompiledEntity { node, statements })
    }

    /// Compile a typed record under its own kind and natural id
    ///
    /// A record without a natural id is rejected as an invalid identifier.
    pub fn compile_record<R: InventoryRecord>(&self, record: &R) -> GraphResult<CompiledEntity> {
        let natural_id = record.natural_id().unwrap_or_default();
        self.compile(R::KIND, natural_id, record.as_record())
    }

    /// Region root: node plus its `HasType` statement
    pub fn compile_region(&self, region: &str) -> GraphResult<CompiledEntity> {
        let schema = self.registry.resolve(NodeKind::Region)?;
        let node = self.terms.node(NodeKind::Region, region)?;
        let statements = vec![Statement::has_type(node.clone(), schema.type_tag().clone())];

        Ok(CompiledEntity { node, statements })
    }
}
