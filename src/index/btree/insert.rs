//! Insertion with split-and-promote.
//!
//! An insert that pushes a leaf to `order` entries splits it; the split
//! produces a [`Promotion`] that is pushed into the parent, which may in turn
//! overflow and split. The cascade runs as a loop bounded by tree height and
//! ends at a non-overflowing ancestor or by growing a new root.

use tracing::{debug, trace};

use crate::common::{Entry, Key, NodeId, Value};

use super::node::{InternalNode, LeafNode, Node};
use super::stats::TreeStats;
use super::tree::BPlusTree;

/// Separator plus new right sibling produced by a split.
#[derive(Debug, Clone, Copy)]
struct Promotion {
    key: Key,
    sibling: NodeId,
}

impl BPlusTree {
    /// Insert `key` with `value`, overwriting the value if the key exists.
    ///
    /// Returns the previous value when the key was already present.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        let leaf_id = self.find_leaf(key);
        let leaf = self.leaf_mut(leaf_id);

        if let Some(index) = leaf.find(key) {
            let previous = leaf.entry(index).value;
            leaf.set_value(index, value);
            TreeStats::bump(&self.stats.updates);
            trace!(key, value, previous, "upsert");
            return Some(previous);
        }

        let position = leaf.key_index(key);
        leaf.insert_entry(position, Entry::new(key, value));
        self.len += 1;
        TreeStats::bump(&self.stats.inserts);
        trace!(key, value, %leaf_id, "insert");

        if self.node(leaf_id).is_overflow(self.order()) {
            let promotion = self.split_leaf(leaf_id);
            self.propagate_split(leaf_id, promotion);
        }
        None
    }

    /// Move entries `[order/2, count)` into a new leaf.
    ///
    /// The promoted key is the new leaf's first key and stays in that leaf as
    /// a real entry. The new leaf is not yet linked into the chain or into
    /// the parent; [`propagate_split`](Self::propagate_split) does both.
    fn split_leaf(&mut self, id: NodeId) -> Promotion {
        let mid = self.config.split_index();
        let parent = self.node(id).parent();
        let right = self.leaf_mut(id).split_off(mid);
        let key = right[0].key;

        let sibling = self
            .nodes
            .alloc(Node::Leaf(LeafNode::from_entries(right, parent)));
        TreeStats::bump(&self.stats.leaf_splits);
        debug!(%id, %sibling, separator = key, "split leaf");

        Promotion { key, sibling }
    }

    /// Split an internal node around separator `order/2`.
    ///
    /// The middle separator moves up and appears in neither half; children
    /// right of it are re-parented to the new node.
    fn split_internal(&mut self, id: NodeId) -> Promotion {
        let mid = self.config.split_index();
        let parent = self.node(id).parent();
        let (key, keys, children) = self.internal_mut(id).split_off(mid);

        debug_assert!(children
            .iter()
            .all(|&child| self.first_leaf_key(child).map_or(true, |k| k >= key)));

        let moved = children.clone();
        let sibling = self
            .nodes
            .alloc(Node::Internal(InternalNode::new(keys, children, parent)));
        for child in moved {
            self.node_mut(child).set_parent(Some(sibling));
        }
        TreeStats::bump(&self.stats.internal_splits);
        debug!(%id, %sibling, separator = key, "split internal node");

        Promotion { key, sibling }
    }

    /// Push a promotion into the parent of `origin`, splitting upward as
    /// long as parents overflow.
    fn propagate_split(&mut self, origin: NodeId, promotion: Promotion) {
        let order = self.order();
        let mut origin = origin;
        let mut promotion = promotion;

        loop {
            let Some(parent) = self.node(origin).parent() else {
                self.grow_root(origin, promotion);
                return;
            };

            // Equal-or-greater keys route right of the separator.
            let position = self.internal(parent).key_index(promotion.key);
            debug_assert_eq!(self.internal(parent).child(position), origin);

            let node = self.internal_mut(parent);
            node.insert_key(position, promotion.key);
            node.insert_child(position + 1, promotion.sibling);
            self.node_mut(promotion.sibling).set_parent(Some(parent));

            if self.children_are_leaves(parent) {
                let left = self.internal(parent).child(position);
                self.link_leaf_after(left, promotion.sibling);
            }

            if !self.node(parent).is_overflow(order) {
                return;
            }
            promotion = self.split_internal(parent);
            origin = parent;
        }
    }

    /// Replace the root with a new internal node over `origin` and its new
    /// sibling.
    fn grow_root(&mut self, origin: NodeId, promotion: Promotion) {
        let Promotion { key, sibling } = promotion;
        let root = self.nodes.alloc(Node::Internal(InternalNode::new(
            vec![key],
            vec![origin, sibling],
            None,
        )));
        self.node_mut(origin).set_parent(Some(root));
        self.node_mut(sibling).set_parent(Some(root));

        if self.node(origin).is_leaf() {
            self.link_leaf_after(origin, sibling);
        }

        self.root = root;
        debug!(%root, separator = key, height = self.height(), "grew new root");
    }

    /// Splice `leaf` into the chain directly after `left`.
    fn link_leaf_after(&mut self, left: NodeId, leaf: NodeId) {
        let next = self.leaf(left).next();

        let node = self.leaf_mut(leaf);
        node.set_prev(Some(left));
        node.set_next(next);

        self.leaf_mut(left).set_next(Some(leaf));
        if let Some(next) = next {
            self.leaf_mut(next).set_prev(Some(leaf));
        }
    }

    /// First key stored in the leftmost leaf under `id`.
    pub(super) fn first_leaf_key(&self, id: NodeId) -> Option<Key> {
        let mut current = id;
        while let Node::Internal(internal) = self.node(current) {
            current = internal.child(0);
        }
        self.leaf(current).first_key()
    }
}
