// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Resolution of a module's walk targets and lookup declarations against a
//! normalized tree.

use tracing::{debug, warn};

use crate::{
    config::ModuleConfig,
    error::{Error, ReferenceKind},
    index::{NodeIndex, looks_like_oid, oid_within},
    node::Node,
    types::{MetricType, metric_type},
};

/// Standing index crosswalk of a module.
#[derive(Debug, Clone,)]
pub struct Crosswalk<'tree,>
{
    /// Original label of the index being replaced.
    pub old_index:   &'tree str,
    /// Column supplying the replacement label values.
    pub target:      &'tree Node,
    /// Exporter type of the target column.
    pub target_type: MetricType,
}

/// Concrete walk list, metric roots and crosswalks of one module.
#[derive(Debug, Clone,)]
pub struct WalkPlan<'tree,>
{
    /// OIDs the exporter walks: lookup columns first, then explicit
    /// targets, without duplicates or OIDs already covered by an ancestor.
    pub walk:    Vec<String,>,
    /// Explicit targets whose subtrees produce metrics.
    pub roots:   Vec<String,>,
    /// Crosswalks in declaration order.
    pub lookups: Vec<Crosswalk<'tree,>,>,
}

/// Resolves walk targets and lookups of `config` to OIDs and nodes.
///
/// # Errors
///
/// Returns [`Error::UnresolvedReference`] or [`Error::AmbiguousLabel`] when
/// a label cannot be resolved, and [`Error::Validation`] when a lookup names
/// an old index no table uses or a new index the exporter cannot decode.
pub fn resolve_walks<'tree,>(
    config: &ModuleConfig,
    index: &NodeIndex<'tree,>,
) -> Result<WalkPlan<'tree,>, Error,>
{
    let mut explicit = Vec::with_capacity(config.walk.len(),);
    for target in &config.walk {
        explicit.push(resolve_walk_target(target, index,)?,);
    }

    let mut lookups = Vec::with_capacity(config.lookups.len(),);
    for lookup in &config.lookups {
        let old = index.resolve(&lookup.old_index, ReferenceKind::LookupOldIndex,)?;
        if !index.is_index_label(&old.label,) {
            return Err(Error::validation(format!(
                "lookup old_index '{}' is not used as an index by any table",
                lookup.old_index
            ),),);
        }

        let target = index.resolve(&lookup.new_index, ReferenceKind::LookupNewIndex,)?;
        let target_type = metric_type(target.node_type, target.hint.as_deref(),).ok_or_else(|| {
            Error::validation(format!(
                "lookup new_index '{}' has unsupported type {:?}",
                lookup.new_index, target.node_type
            ),)
        },)?;
        debug!("Lookup {} -> {} ({})", old.label, target.label, target.oid);

        lookups.push(Crosswalk {
            old_index: old.label.as_str(),
            target,
            target_type,
        },);
    }

    let walk = dedupe_walks(
        lookups.iter().map(|lookup| lookup.target.oid.clone(),).chain(explicit.iter().cloned(),),
    );
    let roots = dedupe_walks(explicit,);

    Ok(WalkPlan {
        walk,
        roots,
        lookups,
    },)
}

fn resolve_walk_target(target: &str, index: &NodeIndex<'_,>,) -> Result<String, Error,>
{
    if looks_like_oid(target,) {
        if index.subtree_roots(target,).is_empty() {
            warn!("Walk target {} is not in the MIB tree, no metrics will be generated for it", target);
        }
        return Ok(target.to_owned(),);
    }
    Ok(index.resolve(target, ReferenceKind::Walk,)?.oid.clone(),)
}

/// Removes duplicate OIDs and OIDs inside the subtree of another entry.
///
/// Order of first occurrence is kept; an ancestor listed after one of its
/// descendants takes the descendant's position.
///
/// # Examples
///
/// ```
/// use snmpgen::dedupe_walks;
///
/// let walk = dedupe_walks(["1.3", "2", "1", "2"].map(String::from));
/// assert_eq!(walk, ["1", "2"]);
/// ```
pub fn dedupe_walks<I,>(oids: I,) -> Vec<String,>
where
    I: IntoIterator<Item = String,>,
{
    let mut kept: Vec<String,> = Vec::new();
    for oid in oids {
        if kept.iter().any(|existing| oid_within(existing, &oid,),) {
            continue;
        }
        match kept.iter().position(|existing| oid_within(&oid, existing,),) {
            Some(first,) => {
                kept[first] = oid.clone();
                let mut position = 0;
                kept.retain(|existing| {
                    let keep = position == first || !oid_within(&oid, existing,);
                    position += 1;
                    keep
                },);
            }
            None => kept.push(oid,),
        }
    }
    kept
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::{dedupe_walks, resolve_walks};
    use crate::{
        config::{LookupConfig, ModuleConfig},
        error::{Error, ReferenceKind},
        index::{NodeIndex, oid_within},
        node::{Access, Node, NodeType},
        normalizer::prepare_tree,
        types::MetricType,
    };

    fn octet_tree() -> Node
    {
        let tree = Node::new("1", "root",).with_children(vec![
            Node::new("1.1", "octet",).with_children(vec![
                Node::new("1.1.1", "octetEntry",).with_indexes(["octetIndex"],).with_children(
                    vec![
                        Node::new("1.1.1.1", "octetIndex",)
                            .with_access(Access::ReadOnly,)
                            .with_type(NodeType::Integer,),
                        Node::new("1.1.1.2", "octetDesc",)
                            .with_access(Access::ReadOnly,)
                            .with_type(NodeType::OctetString,),
                        Node::new("1.1.1.3", "octetFoo",)
                            .with_access(Access::ReadOnly,)
                            .with_type(NodeType::Integer,),
                        Node::new("1.1.1.4", "octetOid",)
                            .with_access(Access::ReadOnly,)
                            .with_type(NodeType::ObjectId,),
                    ],
                ),
            ],),
        ],);
        prepare_tree(&tree,).expect("expected normalization success",)
    }

    fn module(walk: &[&str], lookups: &[(&str, &str,)],) -> ModuleConfig
    {
        ModuleConfig {
            walk:      walk.iter().map(|target| (*target).to_owned(),).collect(),
            lookups:   lookups
                .iter()
                .map(|(old, new,)| LookupConfig {
                    old_index: (*old).to_owned(),
                    new_index: (*new).to_owned(),
                },)
                .collect(),
            overrides: Default::default(),
        }
    }

    #[test]
    fn labels_resolve_to_oids()
    {
        let tree = octet_tree();
        let index = NodeIndex::build(&tree,);
        let plan = resolve_walks(&module(&["octetFoo", "octetDesc"], &[],), &index,)
            .expect("expected resolution success",);
        assert_eq!(plan.walk, ["1.1.1.3", "1.1.1.2"]);
        assert_eq!(plan.roots, plan.walk);
    }

    #[test]
    fn literal_oids_pass_through()
    {
        let tree = octet_tree();
        let index = NodeIndex::build(&tree,);
        let plan = resolve_walks(&module(&["1.1", "1.4.7"], &[],), &index,)
            .expect("expected resolution success",);
        assert_eq!(plan.walk, ["1.1", "1.4.7"]);
    }

    #[test]
    fn duplicate_and_nested_walks_collapse()
    {
        let tree = octet_tree();
        let index = NodeIndex::build(&tree,);
        let plan = resolve_walks(&module(&["1.1.1.3", "octetFoo", "octet"], &[],), &index,)
            .expect("expected resolution success",);
        assert_eq!(plan.walk, ["1.1"]);
        assert_eq!(plan.roots, ["1.1"]);
    }

    #[test]
    fn unknown_walk_label_fails()
    {
        let tree = octet_tree();
        let index = NodeIndex::build(&tree,);
        let error = resolve_walks(&module(&["octetBar"], &[],), &index,)
            .expect_err("expected resolution failure",);
        assert!(matches!(
            error,
            Error::UnresolvedReference { kind: ReferenceKind::Walk, ref reference } if reference == "octetBar"
        ));
    }

    #[test]
    fn lookup_targets_are_walked_first()
    {
        let tree = octet_tree();
        let index = NodeIndex::build(&tree,);
        let plan = resolve_walks(&module(&["octetFoo"], &[("octetIndex", "1.1.1.2",)],), &index,)
            .expect("expected resolution success",);

        assert_eq!(plan.walk, ["1.1.1.2", "1.1.1.3"]);
        assert_eq!(plan.roots, ["1.1.1.3"]);
        assert_eq!(plan.lookups.len(), 1);
        assert_eq!(plan.lookups[0].old_index, "octetIndex");
        assert_eq!(plan.lookups[0].target.label, "octetDesc");
        assert_eq!(plan.lookups[0].target_type, MetricType::OctetString);
    }

    #[test]
    fn lookup_target_inside_walked_subtree_is_not_repeated()
    {
        let tree = octet_tree();
        let index = NodeIndex::build(&tree,);
        let plan = resolve_walks(&module(&["octet"], &[("octetIndex", "octetDesc",)],), &index,)
            .expect("expected resolution success",);
        assert_eq!(plan.walk, ["1.1"]);
    }

    #[test]
    fn lookup_old_index_must_be_an_index()
    {
        let tree = octet_tree();
        let index = NodeIndex::build(&tree,);
        let error = resolve_walks(&module(&["octetFoo"], &[("octetFoo", "octetDesc",)],), &index,)
            .expect_err("expected validation failure",);
        assert!(matches!(error, Error::Validation { .. }));

        let error = resolve_walks(&module(&["octetFoo"], &[("octetGone", "octetDesc",)],), &index,)
            .expect_err("expected resolution failure",);
        assert!(matches!(
            error,
            Error::UnresolvedReference { kind: ReferenceKind::LookupOldIndex, .. }
        ));
    }

    #[test]
    fn lookup_new_index_must_exist_and_be_decodable()
    {
        let tree = octet_tree();
        let index = NodeIndex::build(&tree,);
        let error = resolve_walks(&module(&["octetFoo"], &[("octetIndex", "1.1.1.9",)],), &index,)
            .expect_err("expected resolution failure",);
        assert!(matches!(
            error,
            Error::UnresolvedReference { kind: ReferenceKind::LookupNewIndex, .. }
        ));

        let error = resolve_walks(&module(&["octetFoo"], &[("octetIndex", "octetOid",)],), &index,)
            .expect_err("expected validation failure",);
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn dedupe_replaces_descendants_with_later_ancestor()
    {
        let walk = dedupe_walks(["1.2.1", "3", "1.2.2", "1.2"].map(String::from,),);
        assert_eq!(walk, ["1.2", "3"]);
    }

    #[test]
    fn dedupe_keeps_siblings_with_shared_prefix()
    {
        let walk = dedupe_walks(["1.3", "1.30", "1.3"].map(String::from,),);
        assert_eq!(walk, ["1.3", "1.30"]);
    }

    proptest! {
        #[test]
        fn dedupe_yields_unique_uncovered_oids(
            oids in proptest::collection::vec("[1-3](\\.[1-3]){0,3}", 0..16)
        ) {
            let walk = dedupe_walks(oids.clone());
            for (position, oid) in walk.iter().enumerate() {
                for (other_position, other) in walk.iter().enumerate() {
                    if position != other_position {
                        prop_assert!(!oid_within(oid, other));
                    }
                }
            }
            for oid in &oids {
                prop_assert!(walk.iter().any(|kept| oid_within(kept, oid)));
            }
        }

        #[test]
        fn dedupe_keeps_first_occurrence_order_of_unrelated_oids(
            oids in proptest::collection::vec("[1-9]", 0..16)
        ) {
            let walk = dedupe_walks(oids.clone());
            let mut expected: Vec<String> = Vec::new();
            for oid in oids {
                if !expected.contains(&oid) {
                    expected.push(oid);
                }
            }
            prop_assert_eq!(walk, expected);
        }
    }
}
