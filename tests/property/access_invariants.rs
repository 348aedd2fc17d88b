// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Access Graphs
//!
//! Snapshots are generated so that every join table entry resolves. The
//! dangling-reference property then breaks exactly one entry on purpose.

use cim_inventory_graph::domain::{
    AccessSnapshot, Group, Node, NodeKind, Policy, Predicate, Role, TermBuilder, User,
};
use cim_inventory_graph::{assemble_access_graph, Graph, GraphError};
use proptest::prelude::*;

const REGION: &str = "us-east-1";

// ============================================================================
// Strategies
// ============================================================================

/// Generate a consistent access snapshot
///
/// Memberships and attachments are drawn as raw indices and folded onto
/// the generated entities, so every reference names an existing record.
fn access_snapshot() -> impl Strategy<Value = AccessSnapshot> {
    (
        (0usize..4, 0usize..3, 0usize..4, 0usize..4),
        prop::collection::vec((any::<usize>(), any::<usize>()), 0..10),
        prop::collection::vec((any::<usize>(), 0u8..3, any::<usize>()), 0..10),
    )
        .prop_map(|((users, roles, groups, policies), memberships, attachments)| {
            let mut snapshot = AccessSnapshot::default();
            for u in 0..users {
                snapshot = snapshot.with_user(User::new(format!("u-{u}")));
            }
            for r in 0..roles {
                snapshot = snapshot.with_role(Role::new(format!("r-{r}")));
            }
            for g in 0..groups {
                snapshot = snapshot.with_group(Group::new(format!("g-{g}")));
            }
            for p in 0..policies {
                snapshot = snapshot.with_policy(Policy::new(format!("p-{p}")));
            }

            if groups > 0 && users > 0 {
                for (g, u) in memberships {
                    let group = format!("g-{}", g % groups);
                    let user = format!("u-{}", u % users);
                    snapshot = snapshot.with_group_member(&group, &user);
                }
            }

            if policies > 0 {
                for (p, target, t) in attachments {
                    let policy = format!("p-{}", p % policies);
                    snapshot = match target {
                        0 if users > 0 => {
                            snapshot.with_policy_user(&policy, &format!("u-{}", t % users))
                        }
                        1 if groups > 0 => {
                            snapshot.with_policy_group(&policy, &format!("g-{}", t % groups))
                        }
                        2 if roles > 0 => {
                            snapshot.with_policy_role(&policy, &format!("r-{}", t % roles))
                        }
                        _ => snapshot,
                    };
                }
            }
            snapshot
        })
}

fn node(kind: NodeKind, id: &str) -> Node {
    TermBuilder::default().node(kind, id).expect("generated ids are valid")
}

fn has_type_count(graph: &Graph, n: &Node) -> usize {
    graph
        .iter()
        .filter(|s| s.predicate == Predicate::HasType && &s.subject == n)
        .count()
}

fn entries(table: &std::collections::HashMap<String, Vec<String>>, id: &str) -> usize {
    table.get(id).map_or(0, Vec::len)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: every node carries exactly one HasType
    #[test]
    fn prop_every_node_typed_once(snapshot in access_snapshot()) {
        let graph = assemble_access_graph(REGION, &snapshot).unwrap();

        for n in graph.nodes() {
            prop_assert_eq!(has_type_count(&graph, n), 1, "node {} typed more than once", n);
        }
        prop_assert_eq!(graph.nodes().len(), snapshot.record_count() + 1);
    }

    /// Property: a group has one edge per membership entry
    #[test]
    fn prop_group_edges_match_memberships(snapshot in access_snapshot()) {
        let graph = assemble_access_graph(REGION, &snapshot).unwrap();

        for group in &snapshot.groups {
            let id = group.group_id.as_deref().unwrap_or_default();
            let g = node(NodeKind::Group, id);
            let children = graph.children_of(&g);

            prop_assert_eq!(children.len(), entries(&snapshot.users_by_group, id));
            prop_assert!(children.iter().all(|n| n.kind() == NodeKind::Identity));
        }
    }

    /// Property: a policy has one edge per attachment across all three tables
    #[test]
    fn prop_policy_edges_match_attachments(snapshot in access_snapshot()) {
        let graph = assemble_access_graph(REGION, &snapshot).unwrap();

        for policy in &snapshot.local_policies {
            let id = policy.policy_id.as_deref().unwrap_or_default();
            let expected = entries(&snapshot.users_by_local_policies, id)
                + entries(&snapshot.groups_by_local_policies, id)
                + entries(&snapshot.roles_by_local_policies, id);

            let p = node(NodeKind::Policy, id);
            prop_assert_eq!(graph.children_of(&p).len(), expected);
        }
    }

    /// Property: the region is the parent of every captured record
    #[test]
    fn prop_region_parents_every_record(snapshot in access_snapshot()) {
        let graph = assemble_access_graph(REGION, &snapshot).unwrap();
        let region = node(NodeKind::Region, REGION);

        prop_assert_eq!(graph.children_of(&region).len(), snapshot.record_count());
    }

    /// Property: one unresolvable member rejects the whole snapshot
    #[test]
    fn prop_dangling_member_rejects_snapshot(snapshot in access_snapshot()) {
        prop_assume!(!snapshot.groups.is_empty());

        let group = snapshot.groups[0].group_id.clone().unwrap_or_default();
        let broken = snapshot.clone().with_group_member(&group, "u-ghost");

        let result = assemble_access_graph(REGION, &broken);

        let is_dangling = matches!(
            result,
            Err(GraphError::DanglingReference { member_kind: NodeKind::Identity, .. })
        );
        prop_assert!(is_dangling);
    }

    /// Property: assembly is deterministic
    #[test]
    fn prop_assembly_is_deterministic(snapshot in access_snapshot()) {
        let first = assemble_access_graph(REGION, &snapshot).unwrap();
        let second = assemble_access_graph(REGION, &snapshot).unwrap();

        prop_assert_eq!(first, second);
    }
}
