use crate::error::{Error, Result};
use crate::model::{Document, IndexNode, NodeRef};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Name of a registered index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexId(pub &'static str);

impl fmt::Display for IndexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Declares one index over all nodes of all documents.
///
/// `C` is the lookup context the functions may consult, e.g. the table of
/// term definitions a node refers to by id.
pub struct IndexSpec<N, C> {
    pub id: IndexId,
    pub title: &'static str,
    /// Selects the nodes to index
    pub filter: fn(&N, &C) -> bool,
    /// Derives the key of a selected node. `None` skips the node.
    pub key: fn(&N, &C) -> Option<String>,
}

/// A node in the context it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub node: NodeRef,
    /// File of the document containing the node
    pub file: String,
    /// Nearest heading above the node
    pub heading: Option<NodeRef>,
    /// Nearest heading above the node not deeper than the grouping depth
    pub group_heading: Option<NodeRef>,
}

/// Key to entries, keys in first-seen order
pub type Index = IndexMap<String, Vec<Entry>>;

/// The set of declared index specs
pub struct IndexRegistry<N, C> {
    specs: Vec<IndexSpec<N, C>>,
}

impl<N, C> Default for IndexRegistry<N, C> {
    fn default() -> Self {
        Self { specs: Vec::new() }
    }
}

impl<N: IndexNode, C> IndexRegistry<N, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: impl IntoIterator<Item = IndexSpec<N, C>>) -> Result<Self> {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, spec: IndexSpec<N, C>) -> Result<()> {
        if self.specs.iter().any(|s| s.id == spec.id) {
            return Err(Error::DuplicateIndex(spec.id));
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Build every registered index in a single pass over the documents.
    ///
    /// Documents and their nodes are visited in order, so entries of a key
    /// are in document order and building twice yields identical indexes.
    pub fn build(&self, documents: &[Document<N>], ctx: &C, group_depth: u8) -> Indexes {
        let mut indexes: Vec<Index> = self.specs.iter().map(|_| Index::new()).collect();

        for (doc_idx, document) in documents.iter().enumerate() {
            let mut heading: Option<NodeRef> = None;
            let mut group_heading: Option<NodeRef> = None;

            for (node_idx, node) in document.nodes.iter().enumerate() {
                let node_ref = NodeRef {
                    document: doc_idx,
                    node: node_idx,
                };

                if let Some(depth) = node.heading_depth() {
                    heading = Some(node_ref);
                    if depth <= group_depth {
                        group_heading = Some(node_ref);
                    }
                }

                for (spec, index) in self.specs.iter().zip(indexes.iter_mut()) {
                    if !(spec.filter)(node, ctx) {
                        continue;
                    }
                    let Some(key) = (spec.key)(node, ctx) else {
                        continue;
                    };
                    index.entry(key).or_default().push(Entry {
                        node: node_ref,
                        file: document.file.clone(),
                        heading,
                        group_heading,
                    });
                }
            }
        }

        for (spec, index) in self.specs.iter().zip(&indexes) {
            debug!(index = %spec.id, title = spec.title, keys = index.len(), "built index");
        }

        Indexes {
            indexes: self
                .specs
                .iter()
                .map(|s| s.id)
                .zip(indexes)
                .collect(),
        }
    }
}

/// Result of [`IndexRegistry::build`]
#[derive(Debug, Default, Clone)]
pub struct Indexes {
    indexes: FxHashMap<IndexId, Index>,
}

impl Indexes {
    pub fn get(&self, id: IndexId) -> Result<&Index> {
        self.indexes.get(&id).ok_or(Error::UnknownIndex(id))
    }
}

/// Partition items into groups sharing a key. Groups appear in the order
/// their key was first seen; items keep their relative order.
pub fn group<'a, T, K, F>(items: &'a [T], key: F) -> Vec<Vec<&'a T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<&'a T>> = IndexMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups.into_values().collect()
}

/// Like [`group`] but groups are ordered by key.
pub fn group_sorted<'a, T, K, F>(items: &'a [T], key: F) -> Vec<Vec<&'a T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups.into_values().collect()
}
