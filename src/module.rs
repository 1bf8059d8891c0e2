// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Exporter configuration produced by the generator.
//!
//! Field names follow the exporter's configuration file so that
//! [`render_exporter_config`] output can be loaded by the exporter as is.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{config::RegexpExtract, error::Error, types::MetricType};

/// Generated modules by name.
pub type ExporterConfig = BTreeMap<String, Module,>;

/// Scrape configuration of one exporter module.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default,)]
pub struct Module
{
    /// OIDs the exporter walks, deduplicated, in first-occurrence order.
    pub walk:    Vec<String,>,
    /// Metric descriptors in tree order.
    pub metrics: Vec<Metric,>,
}

/// Descriptor of a single metric.
#[derive(Debug, Serialize, Clone, PartialEq, Eq,)]
pub struct Metric
{
    pub name:           String,
    pub oid:            String,
    #[serde(rename = "type")]
    pub metric_type:    MetricType,
    pub help:           String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub indexes:        Vec<Index,>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lookups:        Vec<Lookup,>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub regex_extracts: BTreeMap<String, Vec<RegexpExtract,>,>,
}

/// Index column attached to a metric.
#[derive(Debug, Serialize, Clone, PartialEq, Eq,)]
pub struct Index
{
    pub labelname:  String,
    /// Type of the raw index value on the wire.
    #[serde(rename = "type")]
    pub index_type: MetricType,
}

/// Crosswalk from an index value to a label read from another column.
#[derive(Debug, Serialize, Clone, PartialEq, Eq,)]
pub struct Lookup
{
    pub labels:      Vec<String,>,
    pub labelname:   String,
    #[serde(rename = "type")]
    pub lookup_type: MetricType,
    /// Column holding the label values.
    pub oid:         String,
}

/// Serializes the generated modules into the exporter's YAML format.
///
/// # Errors
///
/// Returns [`Error::Serialize`] when the YAML encoder fails.
pub fn render_exporter_config(config: &ExporterConfig,) -> Result<String, Error,>
{
    serde_yaml::to_string(config,).map_err(|source| Error::Serialize {
        source,
    },)
}
