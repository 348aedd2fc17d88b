// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Infrastructure Graphs
//!
//! Snapshots are generated with unique ids per kind and parent references
//! that may or may not resolve, so every run mixes linked and orphaned
//! subnets and instances.

use cim_inventory_graph::domain::{
    InfraSnapshot, Instance, Node, NodeKind, Predicate, Subnet, TermBuilder, Vpc,
};
use cim_inventory_graph::{assemble_infra_graph, Graph};
use proptest::prelude::*;

const REGION: &str = "eu-west-1";

// ============================================================================
// Strategies
// ============================================================================

/// Generate an infrastructure snapshot
///
/// - `vpc-{n}` for each VPC
/// - each subnet declares `vpc-{p}`, which exists only when `p < vpc_count`
/// - each instance optionally declares `subnet-{q}`, which exists only when
///   `q < subnet_count`, and carries a possibly empty instance type
fn infra_snapshot() -> impl Strategy<Value = InfraSnapshot> {
    (
        0usize..5,
        prop::collection::vec(0usize..7, 0..8),
        prop::collection::vec((prop::option::of(0usize..10), "[a-z0-9.]{0,10}"), 0..12),
    )
        .prop_map(|(vpc_count, subnet_parents, instances)| {
            let mut snapshot = InfraSnapshot::default();
            for v in 0..vpc_count {
                snapshot = snapshot.with_vpc(Vpc::new(format!("vpc-{v}")));
            }
            for (s, parent) in subnet_parents.into_iter().enumerate() {
                let subnet = Subnet::new(format!("subnet-{s}")).in_vpc(format!("vpc-{parent}"));
                snapshot = snapshot.with_subnet(subnet);
            }
            for (i, (subnet, instance_type)) in instances.into_iter().enumerate() {
                let mut instance = Instance::new(format!("i-{i}")).with_type(instance_type);
                if let Some(q) = subnet {
                    instance = instance.in_subnet(format!("subnet-{q}"));
                }
                snapshot = snapshot.with_instance(instance);
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

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: every node carries exactly one HasType
    #[test]
    fn prop_every_node_typed_once(snapshot in infra_snapshot()) {
        let graph = assemble_infra_graph(REGION, &snapshot).unwrap();

        for n in graph.nodes() {
            prop_assert_eq!(has_type_count(&graph, n), 1, "node {} typed more than once", n);
        }
        prop_assert_eq!(graph.nodes().len(), snapshot.record_count() + 1);
    }

    /// Property: a subnet has one parent edge iff its VPC is in the snapshot
    #[test]
    fn prop_subnet_parent_iff_vpc_present(snapshot in infra_snapshot()) {
        let graph = assemble_infra_graph(REGION, &snapshot).unwrap();

        for subnet in &snapshot.subnets {
            let declared = subnet.vpc_id.clone().unwrap_or_default();
            let present = snapshot
                .vpcs
                .iter()
                .any(|v| v.vpc_id.as_deref() == Some(declared.as_str()));
            let child = node(NodeKind::Subnet, subnet.subnet_id.as_deref().unwrap_or_default());
            let parents = graph.parents_of(&child);

            if present {
                let vpc = node(NodeKind::Network, &declared);
                prop_assert_eq!(parents, vec![&vpc]);
            } else {
                prop_assert!(parents.is_empty());
            }
        }
    }

    /// Property: an instance has one parent edge iff its subnet is in the snapshot
    #[test]
    fn prop_instance_parent_iff_subnet_present(snapshot in infra_snapshot()) {
        let graph = assemble_infra_graph(REGION, &snapshot).unwrap();

        for instance in &snapshot.instances {
            let present = instance.subnet_id.as_deref().is_some_and(|declared| {
                snapshot.subnets.iter().any(|s| s.subnet_id.as_deref() == Some(declared))
            });
            let child = node(NodeKind::Instance, instance.instance_id.as_deref().unwrap_or_default());

            prop_assert_eq!(graph.parents_of(&child).len(), usize::from(present));
        }
    }

    /// Property: edge total is VPCs plus resolvable subnets plus resolvable instances
    #[test]
    fn prop_edge_total(snapshot in infra_snapshot()) {
        let graph = assemble_infra_graph(REGION, &snapshot).unwrap();

        let vpc_ids: Vec<Option<&str>> = snapshot.vpcs.iter().map(|v| v.vpc_id.as_deref()).collect();
        let subnet_ids: Vec<Option<&str>> =
            snapshot.subnets.iter().map(|s| s.subnet_id.as_deref()).collect();

        let linked_subnets = snapshot
            .subnets
            .iter()
            .filter(|s| vpc_ids.contains(&s.vpc_id.as_deref()))
            .count();
        let linked_instances = snapshot
            .instances
            .iter()
            .filter(|i| i.subnet_id.is_some() && subnet_ids.contains(&i.subnet_id.as_deref()))
            .count();

        prop_assert_eq!(
            graph.count_predicate(&Predicate::ParentOf),
            snapshot.vpcs.len() + linked_subnets + linked_instances
        );
    }

    /// Property: empty instance types never become statements
    #[test]
    fn prop_empty_values_are_sparse(snapshot in infra_snapshot()) {
        let graph = assemble_infra_graph(REGION, &snapshot).unwrap();
        let instance_type = Predicate::Property("instanceType".to_string());

        let non_empty = snapshot
            .instances
            .iter()
            .filter(|i| i.instance_type.as_deref().is_some_and(|t| !t.is_empty()))
            .count();

        prop_assert_eq!(graph.count_predicate(&instance_type), non_empty);
        prop_assert!(graph
            .iter()
            .filter_map(|s| s.object.as_literal())
            .all(|l| !l.as_str().is_empty()));
    }

    /// Property: assembly is deterministic
    #[test]
    fn prop_assembly_is_deterministic(snapshot in infra_snapshot()) {
        let first = assemble_infra_graph(REGION, &snapshot).unwrap();
        let second = assemble_infra_graph(REGION, &snapshot).unwrap();

        prop_assert_eq!(first, second);
    }
}
