// Copyright (c) 2025 - Cowboy AI, Inc.
//! Schema Registry
//!
//! Declarative mapping from entity kind to the type tag attached to its node
//! and the ordered list of `(property, extractor)` pairs read from its record.
//!
//! ```text
//! kind      type tag     properties
//! ────────  ───────────  ─────────────────────────────────────────────────
//! region    /region      -
//! network   /vpc         id
//! subnet    /subnet      id vpcId
//! instance  /instance    id instanceType subnetId vpcId publicIp privateIp imageId
//! identity  /user        id
//! role      /role        id
//! group     /group       id
//! policy    /policy      id
//! ```
//!
//! Type tags are literals, so building the registry can fail; this happens
//! once, when the registry is constructed, never at record time.

use std::collections::HashMap;
use std::fmt;

use crate::domain::{EntityRecord, Literal, NodeKind, TermBuilder};
use crate::errors::{GraphError, GraphResult};

/// Reads one attribute out of a record
pub type Extractor = for<'r> fn(EntityRecord<'r>) -> Option<&'r str>;

/// One `(property, extractor)` pair
#[derive(Clone, Copy)]
pub struct FieldMapping {
    property: &'static str,
    extract: Extractor,
}

impl fmt::Debug for FieldMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("property", &self.property)
            .finish_non_exhaustive()
    }
}

impl FieldMapping {
    pub fn new(property: &'static str, extract: Extractor) -> Self {
        Self { property, extract }
    }

    /// Property (predicate) name
    pub fn property(&self) -> &'static str {
        self.property
    }

    /// Run the extractor; empty values are reported as absent
    pub fn extract<'r>(&self, record: EntityRecord<'r>) -> Option<&'r str> {
        (self.extract)(record).filter(|value| !value.is_empty())
    }
}

/// Schema of one entity kind
#[derive(Debug, Clone)]
pub struct EntitySchema {
    kind: NodeKind,
    type_tag: Literal,
    fields: Vec<FieldMapping>,
}

impl EntitySchema {
    pub fn new(kind: NodeKind, type_tag: Literal) -> Self {
        Self {
            kind,
            type_tag,
            fields: Vec::new(),
        }
    }

    /// Append a field; declaration order is emission order
    pub fn with_field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn type_tag(&self) -> &Literal {
        &self.type_tag
    }

    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }
}

/// Declares a field whose value is `record.$attr` for `EntityRecord::$variant`
macro_rules! field {
    ($property:literal, $variant:ident . $attr:ident) => {{
        fn extract(record: EntityRecord<'_>) -> Option<&str> {
            match record {
                EntityRecord::$variant(r) => r.$attr.as_deref(),
                _ => None,
            }
        }
        FieldMapping::new($property, extract)
    }};
}

/// Kind-indexed schema table
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<NodeKind, EntitySchema>,
}

impl SchemaRegistry {
    /// A registry with no schemas
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in AWS inventory schemas
    pub fn aws(terms: &TermBuilder) -> GraphResult<Self> {
        let tag = |kind: NodeKind| terms.literal(kind.type_path());

        let mut registry = Self::empty();

        registry.register(EntitySchema::new(NodeKind::Region, tag(NodeKind::Region)?));

        registry.register(
            EntitySchema::new(NodeKind::Network, tag(NodeKind::Network)?)
                .with_field(field!("id", Vpc.vpc_id)),
        );

        registry.register(
            EntitySchema::new(NodeKind::Subnet, tag(NodeKind::Subnet)?)
                .with_field(field!("id", Subnet.subnet_id))
                .with_field(field!("vpcId", Subnet.vpc_id)),
        );

        registry.register(
            EntitySchema::new(NodeKind::Instance, tag(NodeKind::Instance)?)
                .with_field(field!("id", Instance.instance_id))
                .with_field(field!("instanceType", Instance.instance_type))
                .with_field(field!("subnetId", Instance.subnet_id))
                .with_field(field!("vpcId", Instance.vpc_id))
                .with_field(field!("publicIp", Instance.public_ip_address))
                .with_field(field!("privateIp", Instance.private_ip_address))
                .with_field(field!("imageId", Instance.image_id)),
        );

        registry.register(
            EntitySchema::new(NodeKind::Identity, tag(NodeKind::Identity)?)
                .with_field(field!("id", User.user_id)),
        );

        registry.register(
            EntitySchema::new(NodeKind::Role, tag(NodeKind::Role)?)
                .with_field(field!("id", Role.role_id)),
        );

        registry.register(
            EntitySchema::new(NodeKind::Group, tag(NodeKind::Group)?)
                .with_field(field!("id", Group.group_id)),
        );

        registry.register(
            EntitySchema::new(NodeKind::Policy, tag(NodeKind::Policy)?)
                .with_field(field!("id", Policy.policy_id)),
        );

        Ok(registry)
    }

    /// Add or replace the schema for `schema.kind()`, returning the previous one
    pub fn register(&mut self, schema: EntitySchema) -> Option<EntitySchema> {
        self.schemas.insert(schema.kind(), schema)
    }

    /// Look up the schema for `kind`
    pub fn resolve(&self, kind: NodeKind) -> GraphResult<&EntitySchema> {
        self.schemas.get(&kind).ok_or(GraphError::UnknownKind(kind))
    }

    /// Registered kinds, in topology order
    pub fn kinds(&self) -> Vec<NodeKind> {
        let mut kinds: Vec<NodeKind> = self.schemas.keys().copied().collect();
        kinds.sort();
        kinds
    }
}
