// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Metric descriptors for the subtrees of a resolved walk plan.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::{
    config::MetricOverrides,
    error::Error,
    index::NodeIndex,
    module::{Index, Lookup, Metric},
    node::{Node, walk_node},
    resolver::{Crosswalk, WalkPlan},
    sanitize::sanitize_label_name,
    types::{MetricType, metric_type},
};

/// Emits one metric per readable node of a supported type under every walk
/// root of `plan`, in walk order and then tree order.
///
/// A root OID that is not a node itself stands for the nodes beneath it.
/// Index columns resolve to the nearest node carrying the index label.
///
/// # Errors
///
/// Returns [`Error::UnresolvedReference`] when a metric's index column is
/// not in the tree, [`Error::AmbiguousLabel`] when several columns with that
/// label are equally near the metric, and [`Error::Validation`] when the
/// column has a type the exporter cannot decode.
pub fn emit_metrics(
    plan: &WalkPlan<'_,>,
    index: &NodeIndex<'_,>,
    overrides: &BTreeMap<String, MetricOverrides,>,
) -> Result<Vec<Metric,>, Error,>
{
    let mut metrics = Vec::new();
    let mut applied = BTreeSet::new();

    for node in plan.roots.iter().flat_map(|root| index.subtree_roots(root,),) {
        walk_node(node, &mut |node: &Node| {
            if let Some(metric,) = metric_for(node, &plan.lookups, index,)? {
                let metric = match overrides.get(&node.label,) {
                    Some(node_overrides,) => {
                        applied.insert(node.label.clone(),);
                        Metric {
                            regex_extracts: node_overrides.regex_extracts.clone(),
                            ..metric
                        }
                    }
                    None => metric,
                };
                metrics.push(metric,);
            }
            Ok::<_, Error,>((),)
        },)?;
    }

    for label in overrides.keys().filter(|label| !applied.contains(*label,),) {
        warn!("Override for {} did not match any generated metric", label);
    }

    Ok(metrics,)
}

fn metric_for(
    node: &Node,
    lookups: &[Crosswalk<'_,>],
    index: &NodeIndex<'_,>,
) -> Result<Option<Metric,>, Error,>
{
    let Some(metric_type,) = metric_type(node.node_type, node.hint.as_deref(),) else {
        debug!("Skipping {} ({}): unsupported type {:?}", node.label, node.oid, node.node_type);
        return Ok(None,);
    };
    if !node.access.is_readable() {
        debug!("Skipping {} ({}): access {:?}", node.label, node.oid, node.access);
        return Ok(None,);
    }

    let mut indexes = Vec::with_capacity(node.indexes.len(),);
    let mut crosswalks = Vec::new();
    for label in &node.indexes {
        let index_node = index.resolve_index(label, &node.oid,)?;
        let index_type = index_type(index_node,)?;

        let mut labelname = label.as_str();
        for lookup in lookups {
            if lookup.old_index == labelname {
                let target_label = sanitize_label_name(&lookup.target.label,);
                crosswalks.push(Lookup {
                    labels:      vec![target_label.clone()],
                    labelname:   target_label,
                    lookup_type: lookup.target_type,
                    oid:         lookup.target.oid.clone(),
                },);
                labelname = lookup.target.label.as_str();
            }
        }

        indexes.push(Index {
            labelname: sanitize_label_name(labelname,),
            index_type,
        },);
    }

    Ok(Some(Metric {
        name: sanitize_label_name(&node.label,),
        oid: node.oid.clone(),
        metric_type,
        help: format!("{} - {}", node.description, node.oid),
        indexes,
        lookups: crosswalks,
        regex_extracts: BTreeMap::new(),
    },),)
}

/// Wire type of an index column.
///
/// An entry indexed by itself carries the implicit running integer index.
fn index_type(node: &Node,) -> Result<MetricType, Error,>
{
    if let Some(declared,) = metric_type(node.node_type, node.hint.as_deref(),) {
        return Ok(declared,);
    }
    if let [only] = node.indexes.as_slice()
        && *only == node.label
    {
        return Ok(MetricType::Gauge,);
    }
    Err(Error::validation(format!(
        "index '{}' has unsupported type {:?}",
        node.label, node.node_type
    ),),)
}
