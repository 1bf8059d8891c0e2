// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! MIB node tree as handed over by the external MIB compiler.
//!
//! Nodes own their children. Object identifiers are dotted-decimal strings
//! that extend the parent's identifier by one or more arcs. Only row entries
//! carry explicit indexes before normalization; see
//! [`prepare_tree`](crate::prepare_tree) for how the remaining nodes receive
//! their effective indexes.

use serde::{Deserialize, Serialize};

/// Declared type tag of a node, named the way the MIB compiler emits it.
///
/// Unknown tags deserialize to [`NodeType::Other`].
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default,)]
pub enum NodeType
{
    #[serde(rename = "OBJID")]
    ObjectId,
    #[serde(rename = "OCTETSTR")]
    OctetString,
    #[serde(rename = "INTEGER")]
    Integer,
    #[serde(rename = "NETADDR")]
    NetworkAddress,
    #[serde(rename = "IPADDR")]
    IpAddress,
    #[serde(rename = "COUNTER")]
    Counter,
    #[serde(rename = "GAUGE")]
    Gauge,
    #[serde(rename = "TIMETICKS")]
    TimeTicks,
    #[serde(rename = "OPAQUE")]
    Opaque,
    #[serde(rename = "NULL")]
    Null,
    #[serde(rename = "COUNTER64")]
    Counter64,
    #[serde(rename = "BITSTRING")]
    BitString,
    #[serde(rename = "NSAPADDRESS")]
    NsapAddress,
    #[serde(rename = "UINTEGER")]
    UInteger,
    #[serde(rename = "UNSIGNED32")]
    Unsigned32,
    #[serde(rename = "INTEGER32")]
    Integer32,
    #[serde(rename = "TRAPTYPE")]
    TrapType,
    #[serde(rename = "NOTIFTYPE")]
    NotificationType,
    #[serde(rename = "OBJGROUP")]
    ObjectGroup,
    #[serde(rename = "NOTIFGROUP")]
    NotificationGroup,
    #[serde(rename = "MODID")]
    ModuleIdentity,
    #[serde(rename = "AGENTCAP")]
    AgentCapabilities,
    #[serde(rename = "MODCOMP")]
    ModuleCompliance,
    #[serde(rename = "OBJIDENTITY")]
    ObjectIdentity,
    /// Six byte hardware address. Never declared by MIB sources, set by the
    /// normalizer from the display hint.
    #[serde(rename = "PhysAddress48")]
    PhysAddress48,
    #[default]
    #[serde(rename = "OTHER", other)]
    Other,
}

/// Maximum access level declared for a node.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default,)]
pub enum Access
{
    #[serde(rename = "ACCESS_READONLY", alias = "read-only")]
    ReadOnly,
    #[serde(rename = "ACCESS_READWRITE", alias = "read-write")]
    ReadWrite,
    #[serde(rename = "ACCESS_CREATE", alias = "read-create")]
    Create,
    #[serde(rename = "ACCESS_WRITEONLY", alias = "write-only")]
    WriteOnly,
    #[default]
    #[serde(rename = "ACCESS_NOACCESS", alias = "not-accessible")]
    NoAccess,
    #[serde(rename = "ACCESS_NOTIFY", alias = "accessible-for-notify")]
    Notify,
}

impl Access
{
    /// Whether a value with this access level can be read by a scrape.
    pub fn is_readable(self,) -> bool
    {
        matches!(self, Self::ReadOnly | Self::ReadWrite | Self::Create)
    }
}

/// One node of the MIB tree.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default,)]
pub struct Node
{
    /// Dotted-decimal object identifier.
    pub oid:         String,
    #[serde(default)]
    pub label:       String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, rename = "type")]
    pub node_type:   NodeType,
    #[serde(default)]
    pub access:      Access,
    /// Display hint of the node's textual convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint:        Option<String,>,
    /// Label of the row entry this entry extends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augments:    Option<String,>,
    /// Index column labels, explicit on row entries and effective after
    /// normalization.
    #[serde(default)]
    pub indexes:     Vec<String,>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children:    Vec<Node,>,
}

impl Node
{
    /// Creates a bare node with the given identifier and label.
    pub fn new(oid: impl Into<String,>, label: impl Into<String,>,) -> Self
    {
        Self {
            oid: oid.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, node_type: NodeType,) -> Self
    {
        self.node_type = node_type;
        self
    }

    pub fn with_access(mut self, access: Access,) -> Self
    {
        self.access = access;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String,>,) -> Self
    {
        self.hint = Some(hint.into(),);
        self
    }

    pub fn with_description(mut self, description: impl Into<String,>,) -> Self
    {
        self.description = description.into();
        self
    }

    pub fn with_augments(mut self, entry: impl Into<String,>,) -> Self
    {
        self.augments = Some(entry.into(),);
        self
    }

    pub fn with_indexes<I, S,>(mut self, indexes: I,) -> Self
    where
        I: IntoIterator<Item = S,>,
        S: Into<String,>,
    {
        self.indexes = indexes.into_iter().map(Into::into,).collect();
        self
    }

    pub fn with_children(mut self, children: Vec<Node,>,) -> Self
    {
        self.children = children;
        self
    }
}

/// Visits `node` and its descendants depth-first, parents before children,
/// children in declared order. Stops at the first error.
pub fn walk_node<'tree, F, E,>(node: &'tree Node, visit: &mut F,) -> Result<(), E,>
where
    F: FnMut(&'tree Node,) -> Result<(), E,>,
{
    visit(node,)?;
    for child in &node.children {
        walk_node(child, visit,)?;
    }
    Ok((),)
}
