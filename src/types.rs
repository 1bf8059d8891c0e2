// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Mapping from declared MIB type tags to exporter value types.
//!
//! The table in [`metric_type`] is the only place that decides whether a
//! node can become a metric or an index column.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeType;

/// Display hint used by textual conventions for six byte hardware
/// addresses, such as `PhysAddress` and `MacAddress`.
pub const PHYS_ADDRESS_HINT: &str = "1x:";

/// Value type understood by the exporter at scrape time.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum MetricType
{
    #[serde(rename = "gauge")]
    Gauge,
    #[serde(rename = "counter")]
    Counter,
    OctetString,
    IpAddr,
    InetAddress,
    PhysAddress48,
}

impl MetricType
{
    /// Name of the type as written in the exporter configuration.
    pub fn as_str(self,) -> &'static str
    {
        match self {
            Self::Gauge => "gauge",
            Self::Counter => "counter",
            Self::OctetString => "OctetString",
            Self::IpAddr => "IpAddr",
            Self::InetAddress => "InetAddress",
            Self::PhysAddress48 => "PhysAddress48",
        }
    }
}

impl fmt::Display for MetricType
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

/// Returns `true` when the display hint formats a hardware address.
pub fn is_phys_address_hint(hint: Option<&str,>,) -> bool
{
    hint.is_some_and(|value| value.trim() == PHYS_ADDRESS_HINT,)
}

/// Maps a declared type tag and optional display hint to the exporter type.
///
/// A hardware address hint wins over the declared tag. Returns `None` for
/// tags that never produce a metric.
///
/// # Examples
///
/// ```
/// use snmpgen::{MetricType, NodeType, metric_type};
///
/// assert_eq!(metric_type(NodeType::Counter64, None), Some(MetricType::Counter));
/// assert_eq!(metric_type(NodeType::OctetString, Some("1x:")), Some(MetricType::PhysAddress48));
/// assert_eq!(metric_type(NodeType::ObjectId, None), None);
/// ```
pub fn metric_type(node_type: NodeType, hint: Option<&str,>,) -> Option<MetricType,>
{
    if is_phys_address_hint(hint,) {
        return Some(MetricType::PhysAddress48,);
    }

    match node_type {
        NodeType::Integer
        | NodeType::Integer32
        | NodeType::UInteger
        | NodeType::Unsigned32
        | NodeType::TimeTicks
        | NodeType::Gauge => Some(MetricType::Gauge,),
        NodeType::Counter | NodeType::Counter64 => Some(MetricType::Counter,),
        NodeType::OctetString | NodeType::BitString => Some(MetricType::OctetString,),
        NodeType::IpAddress => Some(MetricType::IpAddr,),
        NodeType::NetworkAddress => Some(MetricType::InetAddress,),
        NodeType::PhysAddress48 => Some(MetricType::PhysAddress48,),
        NodeType::ObjectId
        | NodeType::Opaque
        | NodeType::Null
        | NodeType::NsapAddress
        | NodeType::TrapType
        | NodeType::NotificationType
        | NodeType::ObjectGroup
        | NodeType::NotificationGroup
        | NodeType::ModuleIdentity
        | NodeType::AgentCapabilities
        | NodeType::ModuleCompliance
        | NodeType::ObjectIdentity
        | NodeType::Other => None,
    }
}
