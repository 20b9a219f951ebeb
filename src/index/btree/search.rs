//! Search and range scans.
//!
//! A lookup descends from the root with the routing rule until it reaches a
//! leaf, then walks the leaf chain forward. Internal nodes are never
//! revisited during a scan.

use crate::common::{Key, NodeId, Value};

use super::node::Node;
use super::stats::TreeStats;
use super::tree::BPlusTree;

impl BPlusTree {
    /// Descend to the leaf that would contain `key`. `O(height)`.
    pub(super) fn find_leaf(&self, key: Key) -> NodeId {
        let mut current = self.root;
        while let Node::Internal(internal) = self.node(current) {
            current = internal.child(internal.key_index(key));
        }
        current
    }

    /// Values stored under `key`: empty or a single value.
    pub fn search(&self, key: Key) -> Vec<Value> {
        self.search_range(key, key)
    }

    /// Values for every key in `[start, end]`, in ascending key order.
    ///
    /// An empty or inverted range yields an empty result.
    pub fn search_range(&self, start: Key, end: Key) -> Vec<Value> {
        TreeStats::bump(&self.stats.searches);
        let values: Vec<Value> = self.range(start, end).map(|(_, value)| value).collect();
        tracing::trace!(start, end, found = values.len(), "search");
        values
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: Key) -> Option<Value> {
        TreeStats::bump(&self.stats.searches);
        let leaf = self.leaf(self.find_leaf(key));
        leaf.find(key).map(|index| leaf.entry(index).value)
    }

    pub fn contains_key(&self, key: Key) -> bool {
        let leaf = self.leaf(self.find_leaf(key));
        leaf.find(key).is_some()
    }

    /// Lazy iterator over `(key, value)` pairs with keys in `[start, end]`.
    pub fn range(&self, start: Key, end: Key) -> Range<'_> {
        Range {
            tree: self,
            leaf: Some(self.find_leaf(start)),
            index: 0,
            start,
            end,
            finished: false,
        }
    }

    /// Every `(key, value)` pair in ascending key order.
    pub fn iter(&self) -> Range<'_> {
        self.range(Key::MIN, Key::MAX)
    }
}

/// Forward scan over the leaf chain.
///
/// Scanning starts at the first entry of the leaf `start` routes to and
/// stops, without visiting further leaves, at the first key `>= end`.
#[derive(Debug)]
pub struct Range<'a> {
    tree: &'a BPlusTree,
    leaf: Option<NodeId>,
    index: usize,
    start: Key,
    end: Key,
    finished: bool,
}

impl Iterator for Range<'_> {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while !self.finished {
            let leaf = tree.leaf(self.leaf?);
            if self.index >= leaf.count() {
                self.leaf = leaf.next();
                self.index = 0;
                continue;
            }

            let entry = leaf.entry(self.index);
            self.index += 1;
            if entry.key >= self.end {
                self.finished = true;
            }
            if entry.key >= self.start && entry.key <= self.end {
                return Some((entry.key, entry.value));
            }
        }
        None
    }
}
