// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Graph Domain Models
//!
//! Value objects shared by every stage of the compiler.
//!
//! # Graph Terms
//!
//! - [`Node`] - `(kind, natural id)` vertex, validated by [`TermBuilder`]
//! - [`Literal`] - validated scalar text
//! - [`Statement`] - subject–predicate–object fact
//!
//! # Inventory Input
//!
//! - [`InfraSnapshot`] - VPCs, subnets, instances
//! - [`AccessSnapshot`] - users, roles, groups, local policies and their join tables

pub mod records;
pub mod statement;
pub mod term;

pub use records::{
    AccessSnapshot, EntityRecord, Group, InfraSnapshot, Instance, InventoryRecord, Policy, Role,
    Subnet, User, Vpc,
};
pub use statement::{Object, Predicate, Statement};
pub use term::{Literal, Node, NodeKind, TermBuilder, TermViolation};
