// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Normalization of the raw MIB tree handed over by the MIB compiler.
//!
//! The normalizer works in two phases. The first phase records every row
//! entry of the untouched tree in an [`EntryTable`], keyed by label. The
//! second phase rebuilds the tree top-down, resolving for every node:
//!
//! - the effective indexes, taken from the node's augments clause, its own
//!   explicit indexes or its parent, in that order;
//! - the implicit `INTEGER` index placeholder, renamed after its entry;
//! - the hardware address display hint, which sets the node type;
//! - the description, reduced to its first sentence.
//!
//! Augmentation targets are looked up in the entry table rather than in the
//! partially rebuilt tree, so the order in which tables appear in the MIB
//! does not matter. Normalizing an already normalized tree returns an equal
//! tree.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::{
    error::Error,
    node::{Node, NodeType, walk_node},
    types::is_phys_address_hint,
};

/// Index placeholder emitted by MIB compilers for tables keyed by an
/// unnamed running integer.
pub const IMPLICIT_INDEX: &str = "INTEGER";

/// Builds the normalized copy of `root`.
///
/// # Errors
///
/// Returns [`Error::Augmentation`] when an augments clause names an entry
/// that is missing, ambiguous, part of an augmentation cycle, or has no
/// indexes to share.
///
/// # Examples
///
/// ```
/// use snmpgen::{Node, prepare_tree};
///
/// let tree = Node::new("1", "tableEntry",)
///     .with_indexes(["tableIndex"],)
///     .with_children(vec![Node::new("1.1", "tableIndex",)],);
/// let normalized = prepare_tree(&tree,).expect("valid tree",);
/// assert_eq!(normalized.children[0].indexes, ["tableIndex"]);
/// ```
pub fn prepare_tree(root: &Node,) -> Result<Node, Error,>
{
    let mut entries = EntryTable::collect(root,);
    debug!("Collected {} row entries", entries.entries.len());
    normalize_node(root, &[], &mut entries,)
}

fn normalize_node(
    node: &Node,
    inherited: &[String],
    entries: &mut EntryTable<'_,>,
) -> Result<Node, Error,>
{
    let indexes = match node.augments.as_deref() {
        Some(target,) => entries.resolve_augmented(&node.label, target,)?,
        None if !node.indexes.is_empty() => explicit_indexes(node,),
        None => inherited.to_vec(),
    };

    let node_type = if is_phys_address_hint(node.hint.as_deref(),) {
        NodeType::PhysAddress48
    } else {
        node.node_type
    };

    let children = node
        .children
        .iter()
        .map(|child| normalize_node(child, &indexes, entries,),)
        .collect::<Result<Vec<_,>, _,>>()?;

    Ok(Node {
        oid: node.oid.clone(),
        label: node.label.clone(),
        description: summarize_description(&node.description,),
        node_type,
        access: node.access,
        hint: node.hint.clone(),
        augments: node.augments.clone(),
        indexes,
        children,
    },)
}

/// Explicit indexes of a row entry with the implicit placeholder resolved.
fn explicit_indexes(node: &Node,) -> Vec<String,>
{
    match node.indexes.as_slice() {
        [only] if only == IMPLICIT_INDEX => vec![node.label.clone()],
        indexes => indexes.to_vec(),
    }
}

/// Collapses whitespace runs and keeps the first sentence of `text`.
///
/// A sentence ends at a period followed by whitespace or at the end of the
/// text. Periods inside tokens such as `1.3.6.1` or `e.g.` followed by
/// more text on the same token are kept.
pub fn summarize_description(text: &str,) -> String
{
    let collapsed = text.split_whitespace().collect::<Vec<_,>>().join(" ",);
    let first = match collapsed.find(". ",) {
        Some(end,) => &collapsed[..end],
        None => collapsed.as_str(),
    };
    first.trim_end_matches(|ch: char| ch == '.' || ch.is_whitespace(),).to_owned()
}

/// Row entry as declared in the raw tree.
struct RowEntry<'tree,>
{
    indexes:  Vec<String,>,
    augments: Option<&'tree str,>,
}

/// Row entries of the raw tree by label, with memoized augmentation results.
struct EntryTable<'tree,>
{
    entries:    HashMap<&'tree str, RowEntry<'tree,>,>,
    duplicates: HashSet<&'tree str,>,
    resolved:   HashMap<&'tree str, Vec<String,>,>,
}

impl<'tree,> EntryTable<'tree,>
{
    fn collect(root: &'tree Node,) -> Self
    {
        let mut entries = HashMap::new();
        let mut duplicates = HashSet::new();

        let Ok((),) = walk_node(root, &mut |node: &'tree Node| {
            if node.indexes.is_empty() && node.augments.is_none() {
                return Ok::<_, std::convert::Infallible,>((),);
            }
            let entry = RowEntry {
                indexes:  explicit_indexes(node,),
                augments: node.augments.as_deref(),
            };
            if entries.insert(node.label.as_str(), entry,).is_some() {
                duplicates.insert(node.label.as_str(),);
            }
            Ok((),)
        },);

        Self {
            entries,
            duplicates,
            resolved: HashMap::new(),
        }
    }

    /// Indexes an augmenting entry takes over from `target`.
    fn resolve_augmented(&mut self, entry: &str, target: &str,) -> Result<Vec<String,>, Error,>
    {
        let mut chain = vec![entry.to_owned()];
        self.resolve(target, &mut chain,)
    }

    fn resolve(&mut self, label: &str, chain: &mut Vec<String,>,) -> Result<Vec<String,>, Error,>
    {
        if let Some(indexes,) = self.resolved.get(label,) {
            return Ok(indexes.clone(),);
        }

        let origin = chain[0].clone();
        if chain.iter().any(|seen| seen == label,) {
            return Err(Error::augmentation(&origin, label, "augmentation cycle",),);
        }
        if self.duplicates.contains(label,) {
            return Err(Error::augmentation(&origin, label, "target label is ambiguous",),);
        }

        let Some((key, augments, declared,),) = self
            .entries
            .get_key_value(label,)
            .map(|(key, entry,)| (*key, entry.augments, entry.indexes.clone(),),)
        else {
            return Err(Error::augmentation(&origin, label, "no such row entry",),);
        };
        // An augments clause takes precedence over indexes copied onto the
        // entry by an earlier normalization.
        let indexes = match augments {
            Some(base,) => {
                chain.push(label.to_owned(),);
                self.resolve(base, chain,)?
            }
            None if !declared.is_empty() => declared,
            None => {
                return Err(Error::augmentation(&origin, label, "target entry has no indexes",),);
            }
        };

        self.resolved.insert(key, indexes.clone(),);
        Ok(indexes,)
    }
}
