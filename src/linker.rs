// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hierarchy Linker
//!
//! Wires `ParentOf` edges between compiled nodes. Two topologies share the
//! region node as root:
//!
//! ```text
//! Infrastructure (best effort)          Access (strict)
//! ────────────────────────────          ─────────────────────────────────
//! region                                region
//!   └─ vpc                                ├─ user
//!        └─ subnet                        ├─ role
//!             └─ instance                 ├─ group ──────► user
//!                                         └─ policy ─────► user | group | role
//! ```
//!
//! # Integrity Rules
//!
//! - Infrastructure parents are looked up in the index of the previous stage.
//!   A subnet whose VPC, or an instance whose subnet, is not in the snapshot
//!   stays in the graph without an incoming edge.
//! - Access join tables are authoritative. A group member or policy
//!   attachment naming an absent entity aborts the pass with
//!   [`GraphError::DanglingReference`].
//!
//! Stages run in dependency order (networks, subnets, instances; users,
//! roles, groups, policies) because each lookup index must be complete
//! before the next stage reads it.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::compiler::EntityCompiler;
use crate::domain::{AccessSnapshot, InfraSnapshot, InventoryRecord, Node, NodeKind, Statement};
use crate::errors::{GraphError, GraphResult};

/// Natural id → node lookup for one kind, scoped to one pass
#[derive(Debug, Clone)]
pub struct NodeIndex {
    kind: NodeKind,
    nodes: HashMap<String, Node>,
}

impl NodeIndex {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            nodes: HashMap::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id().to_string(), node);
    }

    pub fn get(&self, natural_id: &str) -> Option<&Node> {
        self.nodes.get(natural_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Emits hierarchy statements for one snapshot
#[derive(Debug, Clone, Copy)]
pub struct HierarchyLinker<'a> {
    compiler: EntityCompiler<'a>,
}

impl<'a> HierarchyLinker<'a> {
    pub fn new(compiler: EntityCompiler<'a>) -> Self {
        Self { compiler }
    }

    /// Link VPCs, subnets and instances under `region`
    ///
    /// Appends to `out`; the caller owns the region's own statements.
    pub fn link_infrastructure(
        &self,
        region: &Node,
        snapshot: &InfraSnapshot,
        out: &mut Vec<Statement>,
    ) -> GraphResult<()> {
        let networks = self.attach_to_region(region, &snapshot.vpcs, out)?;
        debug!(region = region.id(), networks = networks.len(), "networks linked");

        let subnets = self.attach_to_parent(
            &snapshot.subnets,
            &networks,
            |s| s.vpc_id.as_deref(),
            out,
        )?;
        debug!(region = region.id(), subnets = subnets.len(), "subnets linked");

        let instances = self.attach_to_parent(
            &snapshot.instances,
            &subnets,
            |i| i.subnet_id.as_deref(),
            out,
        )?;
        debug!(region = region.id(), instances = instances.len(), "instances linked");

        Ok(())
    }

    /// Link users, roles, groups and local policies under `region`, plus the
    /// group membership and policy attachment edges
    pub fn link_access(
        &self,
        region: &Node,
        snapshot: &AccessSnapshot,
        out: &mut Vec<Statement>,
    ) -> GraphResult<()> {
        let identities = self.attach_to_region(region, &snapshot.users, out)?;
        let roles = self.attach_to_region(region, &snapshot.roles, out)?;

        let mut groups = NodeIndex::new(NodeKind::Group);
        for group in &snapshot.groups {
            let node = self.compile_under_region(region, group, out)?;
            link_members(&node, snapshot.users_by_group.get(node.id()), &identities, out)?;
            groups.insert(node);
        }

        let mut policies = NodeIndex::new(NodeKind::Policy);
        for policy in &snapshot.local_policies {
            let node = self.compile_under_region(region, policy, out)?;
            link_members(
                &node,
                snapshot.users_by_local_policies.get(node.id()),
                &identities,
                out,
            )?;
            link_members(
                &node,
                snapshot.groups_by_local_policies.get(node.id()),
                &groups,
                out,
            )?;
            link_members(
                &node,
                snapshot.roles_by_local_policies.get(node.id()),
                &roles,
                out,
            )?;
            policies.insert(node);
        }

        debug!(
            region = region.id(),
            identities = identities.len(),
            roles = roles.len(),
            groups = groups.len(),
            policies = policies.len(),
            "access topology linked"
        );

        Ok(())
    }

    /// Compile every record, parent it to the region and index it
    fn attach_to_region<R: InventoryRecord>(
        &self,
        region: &Node,
        records: &[R],
        out: &mut Vec<Statement>,
    ) -> GraphResult<NodeIndex> {
        let mut index = NodeIndex::new(R::KIND);
        for record in records {
            let node = self.compile_under_region(region, record, out)?;
            index.insert(node);
        }
        Ok(index)
    }

    fn compile_under_region<R: InventoryRecord>(
        &self,
        region: &Node,
        record: &R,
        out: &mut Vec<Statement>,
    ) -> GraphResult<Node> {
        let entity = self.compiler.compile_record(record)?;
        out.extend(entity.statements);
        out.push(Statement::parent_of(region.clone(), entity.node.clone()));
        Ok(entity.node)
    }

    /// Compile every record and parent it to the node its declared parent id
    /// resolves to in `parents`; unresolved parents leave the node orphaned
    fn attach_to_parent<R, F>(
        &self,
        records: &[R],
        parents: &NodeIndex,
        parent_id: F,
        out: &mut Vec<Statement>,
    ) -> GraphResult<NodeIndex>
    where
        R: InventoryRecord,
        F: Fn(&R) -> Option<&str>,
    {
        let mut index = NodeIndex::new(R::KIND);
        for record in records {
            let entity = self.compiler.compile_record(record)?;
            out.extend(entity.statements);

            let declared = parent_id(record);
            match declared.and_then(|id| parents.get(id)) {
                Some(parent) => out.push(Statement::parent_of(parent.clone(), entity.node.clone())),
                None => debug!(
                    child = %entity.node,
                    parent_kind = %parents.kind(),
                    parent_id = declared.unwrap_or_default(),
                    "parent not in snapshot, leaving node orphaned"
                ),
            }

            index.insert(entity.node);
        }
        Ok(index)
    }
}

/// Emit `container ParentOf member` for every listed member id
fn link_members(
    container: &Node,
    member_ids: Option<&Vec<String>>,
    members: &NodeIndex,
    out: &mut Vec<Statement>,
) -> GraphResult<()> {
    for member_id in member_ids.into_iter().flatten() {
        let member = members.get(member_id).ok_or_else(|| {
            warn!(
                container = %container,
                member_kind = %members.kind(),
                member_id = %member_id,
                "join table references an entity missing from the snapshot"
            );
            GraphError::DanglingReference {
                container_kind: container.kind(),
                container_id: container.id().to_string(),
                member_kind: members.kind(),
                member_id: member_id.clone(),
            }
        })?;

        out.push(Statement::parent_of(container.clone(), member.clone()));
    }
    Ok(())
}
