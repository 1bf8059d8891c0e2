// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Label and object identifier lookup over a normalized tree.

use std::{
    collections::{HashMap, HashSet},
    convert::Infallible,
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    error::{Error, ReferenceKind},
    node::{Node, walk_node},
};

static OID_PATTERN: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)*$",).expect("OID pattern is valid",),);

/// Returns `true` when `reference` is written as a dotted-decimal OID.
///
/// # Examples
///
/// ```
/// use snmpgen::looks_like_oid;
///
/// assert!(looks_like_oid("1.3.6.1.2.1.2"));
/// assert!(!looks_like_oid("ifTable"));
/// assert!(!looks_like_oid("1..3"));
/// ```
pub fn looks_like_oid(reference: &str,) -> bool
{
    OID_PATTERN.is_match(reference,)
}

/// Returns `true` when `oid` equals `root` or lies in its subtree.
pub fn oid_within(root: &str, oid: &str,) -> bool
{
    oid.strip_prefix(root,).is_some_and(|rest| rest.is_empty() || rest.starts_with('.',),)
}

/// Lookup tables built once per generation run from a normalized tree.
///
/// The first node carrying an OID wins. Labels carried by several nodes
/// are remembered and only rejected when resolution actually needs them.
#[derive(Debug,)]
pub struct NodeIndex<'tree,>
{
    by_label:     HashMap<&'tree str, Vec<&'tree Node,>,>,
    by_oid:       HashMap<&'tree str, &'tree Node,>,
    index_labels: HashSet<&'tree str,>,
    /// Every node in depth-first tree order.
    order:        Vec<&'tree Node,>,
}

impl<'tree,> NodeIndex<'tree,>
{
    /// Indexes every node of `root`.
    pub fn build(root: &'tree Node,) -> Self
    {
        let mut index = Self {
            by_label:     HashMap::new(),
            by_oid:       HashMap::new(),
            index_labels: HashSet::new(),
            order:        Vec::new(),
        };

        let Ok((),) = walk_node(root, &mut |node: &'tree Node| {
            index.by_oid.entry(node.oid.as_str(),).or_insert(node,);
            if !node.label.is_empty() {
                let carriers = index.by_label.entry(node.label.as_str(),).or_default();
                if carriers.iter().all(|kept| kept.oid != node.oid,) {
                    carriers.push(node,);
                }
            }
            index.index_labels.extend(node.indexes.iter().map(String::as_str,),);
            index.order.push(node,);
            Ok::<_, Infallible,>((),)
        },);

        index
    }

    /// Node carrying `oid`, if any.
    pub fn by_oid(&self, oid: &str,) -> Option<&'tree Node,>
    {
        self.by_oid.get(oid,).copied()
    }

    /// Outermost nodes inside the subtree rooted at `oid`, in tree order.
    ///
    /// When `oid` names a node this is that node alone. Otherwise it is every
    /// node under `oid` that no other node under `oid` contains. Children of
    /// a sparse tree may skip arcs, so an OID between two nodes still covers
    /// the deeper ones.
    pub fn subtree_roots(&self, oid: &str,) -> Vec<&'tree Node,>
    {
        if let Some(node,) = self.by_oid(oid,) {
            return vec![node];
        }
        let mut roots: Vec<&'tree Node,> = Vec::new();
        for node in &self.order {
            if !oid_within(oid, &node.oid,) {
                continue;
            }
            if roots.iter().any(|root| oid_within(&root.oid, &node.oid,),) {
                continue;
            }
            roots.push(node,);
        }
        roots
    }

    /// Whether some node of the tree lists `label` among its indexes.
    pub fn is_index_label(&self, label: &str,) -> bool
    {
        self.index_labels.contains(label,)
    }

    /// Number of distinct OIDs in the tree.
    pub fn len(&self,) -> usize
    {
        self.by_oid.len()
    }

    /// Whether the index holds no nodes.
    pub fn is_empty(&self,) -> bool
    {
        self.by_oid.is_empty()
    }

    /// Resolves a label or dotted OID to its node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedReference`] when nothing matches and
    /// [`Error::AmbiguousLabel`] when the label names several nodes.
    pub fn resolve(&self, reference: &str, kind: ReferenceKind,) -> Result<&'tree Node, Error,>
    {
        if looks_like_oid(reference,) {
            return self.by_oid(reference,).ok_or_else(|| Error::unresolved(kind, reference,),);
        }
        match self.by_label.get(reference,).map(Vec::as_slice,) {
            Some([node],) => Ok(*node,),
            Some([_, _, ..],) => Err(Error::AmbiguousLabel {
                label: reference.to_owned(),
            },),
            _ => Err(Error::unresolved(kind, reference,),),
        }
    }

    /// Resolves an index column label as seen from the node at `oid`.
    ///
    /// A label carried by several nodes resolves to the one sharing the
    /// longest OID prefix with `oid`, so a column of the metric's own table
    /// wins over an unrelated node of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedReference`] when no node carries `label`
    /// and [`Error::AmbiguousLabel`] when several carriers are equally near.
    pub fn resolve_index(&self, label: &str, oid: &str,) -> Result<&'tree Node, Error,>
    {
        let Some(carriers,) = self.by_label.get(label,) else {
            return Err(Error::unresolved(ReferenceKind::Index, label,),);
        };

        let mut nearest: Vec<&'tree Node,> = Vec::new();
        let mut best = 0;
        for &node in carriers {
            let shared = shared_arcs(&node.oid, oid,);
            if nearest.is_empty() || shared > best {
                best = shared;
                nearest = vec![node];
            } else if shared == best {
                nearest.push(node,);
            }
        }

        match nearest.as_slice() {
            [node] => Ok(*node,),
            _ => Err(Error::AmbiguousLabel {
                label: label.to_owned(),
            },),
        }
    }
}

/// Number of leading arcs two OIDs have in common.
fn shared_arcs(left: &str, right: &str,) -> usize
{
    left.split('.',).zip(right.split('.',),).take_while(|(a, b,)| a == b,).count()
}
