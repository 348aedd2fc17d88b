// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Records and Snapshots
//!
//! Input shapes handed over by the inventory collaborator. Attribute names
//! follow the AWS SDK (`VpcId`, `PublicIpAddress`, ...) so a snapshot can be
//! deserialized straight from the provider's JSON. Every attribute is
//! optional; absent or empty attributes simply produce no property statement.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::term::NodeKind;
use crate::errors::GraphResult;

/// Virtual network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vpc {
    pub vpc_id: Option<String>,
}

impl Vpc {
    pub fn new(vpc_id: impl Into<String>) -> Self {
        Self {
            vpc_id: Some(vpc_id.into()),
        }
    }
}

/// Subnet of a VPC
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    pub subnet_id: Option<String>,
    pub vpc_id: Option<String>,
}

impl Subnet {
    pub fn new(subnet_id: impl Into<String>) -> Self {
        Self {
            subnet_id: Some(subnet_id.into()),
            ..Default::default()
        }
    }

    /// Declare the parent network
    pub fn in_vpc(mut self, vpc_id: impl Into<String>) -> Self {
        self.vpc_id = Some(vpc_id.into());
        self
    }
}

/// Compute instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    pub instance_id: Option<String>,
    pub instance_type: Option<String>,
    pub subnet_id: Option<String>,
    pub vpc_id: Option<String>,
    pub public_ip_address: Option<String>,
    pub private_ip_address: Option<String>,
    pub image_id: Option<String>,
}

impl Instance {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: Some(instance_id.into()),
            ..Default::default()
        }
    }

    /// Declare the parent subnet
    pub fn in_subnet(mut self, subnet_id: impl Into<String>) -> Self {
        self.subnet_id = Some(subnet_id.into());
        self
    }

    pub fn in_vpc(mut self, vpc_id: impl Into<String>) -> Self {
        self.vpc_id = Some(vpc_id.into());
        self
    }

    pub fn with_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = Some(instance_type.into());
        self
    }

    pub fn with_public_ip(mut self, ip: impl Into<String>) -> Self {
        self.public_ip_address = Some(ip.into());
        self
    }

    pub fn with_private_ip(mut self, ip: impl Into<String>) -> Self {
        self.private_ip_address = Some(ip.into());
        self
    }

    pub fn with_image(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = Some(image_id.into());
        self
    }
}

/// IAM user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub user_id: Option<String>,
}

impl User {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}

/// IAM role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Role {
    pub role_id: Option<String>,
}

impl Role {
    pub fn new(role_id: impl Into<String>) -> Self {
        Self {
            role_id: Some(role_id.into()),
        }
    }
}

/// IAM group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    pub group_id: Option<String>,
}

impl Group {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
        }
    }
}

/// Local (customer managed) IAM policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Policy {
    pub policy_id: Option<String>,
}

impl Policy {
    pub fn new(policy_id: impl Into<String>) -> Self {
        Self {
            policy_id: Some(policy_id.into()),
        }
    }
}

/// Borrowed view over any inventory record
///
/// This is what schema extractors read from.
#[derive(Debug, Clone, Copy)]
pub enum EntityRecord<'a> {
    Vpc(&'a Vpc),
    Subnet(&'a Subnet),
    Instance(&'a Instance),
    User(&'a User),
    Role(&'a Role),
    Group(&'a Group),
    Policy(&'a Policy),
}

impl EntityRecord<'_> {
    /// Node kind this record compiles to
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Vpc(_) => NodeKind::Network,
            Self::Subnet(_) => NodeKind::Subnet,
            Self::Instance(_) => NodeKind::Instance,
            Self::User(_) => NodeKind::Identity,
            Self::Role(_) => NodeKind::Role,
            Self::Group(_) => NodeKind::Group,
            Self::Policy(_) => NodeKind::Policy,
        }
    }
}

/// A typed inventory record with a natural identifier
pub trait InventoryRecord {
    /// Node kind of every record of this type
    const KIND: NodeKind;

    /// Natural identifier, if the provider reported one
    fn natural_id(&self) -> Option<&str>;

    /// Borrow as an [`EntityRecord`]
    fn as_record(&self) -> EntityRecord<'_>;
}

macro_rules! inventory_record {
    ($ty:ident, $kind:ident, $id:ident) => {
        impl InventoryRecord for $ty {
            const KIND: NodeKind = NodeKind::$kind;

            fn natural_id(&self) -> Option<&str> {
                self.$id.as_deref()
            }

            fn as_record(&self) -> EntityRecord<'_> {
                EntityRecord::$ty(self)
            }
        }
    };
}

inventory_record!(Vpc, Network, vpc_id);
inventory_record!(Subnet, Subnet, subnet_id);
inventory_record!(Instance, Instance, instance_id);
inventory_record!(User, Identity, user_id);
inventory_record!(Role, Role, role_id);
inventory_record!(Group, Group, group_id);
inventory_record!(Policy, Policy, policy_id);

/// Infrastructure capture of one region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InfraSnapshot {
    pub vpcs: Vec<Vpc>,
    pub subnets: Vec<Subnet>,
    pub instances: Vec<Instance>,
}

impl InfraSnapshot {
    /// Deserialize a snapshot document
    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_vpc(mut self, vpc: Vpc) -> Self {
        self.vpcs.push(vpc);
        self
    }

    pub fn with_subnet(mut self, subnet: Subnet) -> Self {
        self.subnets.push(subnet);
        self
    }

    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instances.push(instance);
        self
    }

    /// Total number of records
    pub fn record_count(&self) -> usize {
        self.vpcs.len() + self.subnets.len() + self.instances.len()
    }
}

/// Access-control capture of one account
///
/// The `*_by_*` maps are join tables keyed by the container's natural id
/// (group or policy) listing member natural ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccessSnapshot {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub groups: Vec<Group>,
    pub local_policies: Vec<Policy>,
    pub users_by_group: HashMap<String, Vec<String>>,
    pub users_by_local_policies: HashMap<String, Vec<String>>,
    pub groups_by_local_policies: HashMap<String, Vec<String>>,
    pub roles_by_local_policies: HashMap<String, Vec<String>>,
}

impl AccessSnapshot {
    /// Deserialize a snapshot document
    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.local_policies.push(policy);
        self
    }

    /// Record that `user_id` is a member of `group_id`
    pub fn with_group_member(mut self, group_id: &str, user_id: &str) -> Self {
        push_member(&mut self.users_by_group, group_id, user_id);
        self
    }

    /// Record that `policy_id` is attached to `user_id`
    pub fn with_policy_user(mut self, policy_id: &str, user_id: &str) -> Self {
        push_member(&mut self.users_by_local_policies, policy_id, user_id);
        self
    }

    /// Record that `policy_id` is attached to `group_id`
    pub fn with_policy_group(mut self, policy_id: &str, group_id: &str) -> Self {
        push_member(&mut self.groups_by_local_policies, policy_id, group_id);
        self
    }

    /// Record that `policy_id` is attached to `role_id`
    pub fn with_policy_role(mut self, policy_id: &str, role_id: &str) -> Self {
        push_member(&mut self.roles_by_local_policies, policy_id, role_id);
        self
    }

    /// Total number of records, join tables excluded
    pub fn record_count(&self) -> usize {
        self.users.len() + self.roles.len() + self.groups.len() + self.local_policies.len()
    }
}

fn push_member(table: &mut HashMap<String, Vec<String>>, container: &str, member: &str) {
    table
        .entry(container.to_string())
        .or_default()
        .push(member.to_string());
}
