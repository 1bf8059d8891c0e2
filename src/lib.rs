// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Compiler from parsed MIB trees to SNMP exporter scrape configuration.
//!
//! The library loads a MIB node tree produced by a MIB compiler together with
//! a YAML generator file that names the subtrees, index lookups and overrides
//! of each exporter module. The tree is normalized once (index inheritance,
//! table augmentation, display hints and descriptions), indexed by label and
//! OID, and every module is then resolved into a walk list and a sequence of
//! metric descriptors. [`render_exporter_config`] serializes the result into
//! the exporter's YAML format.

mod config;
mod emitter;
mod error;
mod generator;
mod index;
mod module;
mod node;
mod normalizer;
mod resolver;
mod sanitize;
mod types;

pub use config::{
    GeneratorConfig, LookupConfig, MetricOverrides, ModuleConfig, RegexpExtract,
    load_generator_config, parse_generator_config,
};
pub use emitter::emit_metrics;
pub use error::{Error, ReferenceKind, io_error};
pub use generator::{generate, generate_module, load_tree, parse_tree};
pub use index::{NodeIndex, looks_like_oid, oid_within};
pub use module::{ExporterConfig, Index, Lookup, Metric, Module, render_exporter_config};
pub use node::{Access, Node, NodeType, walk_node};
pub use normalizer::{IMPLICIT_INDEX, prepare_tree, summarize_description};
pub use resolver::{Crosswalk, WalkPlan, dedupe_walks, resolve_walks};
pub use sanitize::sanitize_label_name;
pub use types::{MetricType, PHYS_ADDRESS_HINT, is_phys_address_hint, metric_type};
