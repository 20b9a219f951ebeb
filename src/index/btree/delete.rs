//! Deletion with borrow/merge rebalancing.
//!
//! A node is deficient only once it is completely empty. An empty leaf first
//! tries to borrow one entry from a sibling holding more than one, otherwise
//! it is merged away. Merging removes a separator from the parent; if that
//! leaves the parent empty, the parent is rebalanced the same way, up to the
//! root, where an empty internal root collapses into its only child.

use tracing::{debug, trace};

use crate::common::{Key, NodeId, Value};

use super::stats::TreeStats;
use super::tree::BPlusTree;

/// A node's position in its parent and its immediate neighbours.
#[derive(Debug, Clone, Copy)]
struct Siblings {
    parent: NodeId,
    /// Child index of the node in `parent`.
    index: usize,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl BPlusTree {
    /// Remove `key`, returning its value. Absent keys are a no-op.
    pub fn delete(&mut self, key: Key) -> Option<Value> {
        let leaf_id = self.find_leaf(key);
        let Some(index) = self.leaf(leaf_id).find(key) else {
            trace!(key, "delete of absent key");
            return None;
        };

        let removed = self.leaf_mut(leaf_id).remove_entry(index);
        self.len -= 1;
        TreeStats::bump(&self.stats.deletes);
        trace!(key, %leaf_id, "delete");

        // An empty root leaf is a valid empty tree.
        if leaf_id != self.root && self.node(leaf_id).count() == 0 {
            self.rebalance_leaf(leaf_id, key);
        }
        Some(removed.value)
    }

    /// Locate `node` in its parent by routing `key`, which still routes
    /// through every ancestor of the node being rebalanced.
    fn siblings(&self, node: NodeId, key: Key) -> Siblings {
        let parent = self.parent_of(node);
        let internal = self.internal(parent);
        let index = internal.key_index(key);
        debug_assert_eq!(internal.child(index), node);

        Siblings {
            parent,
            index,
            left: index.checked_sub(1).map(|i| internal.child(i)),
            right: internal.get_child(index + 1),
        }
    }

    fn can_lend(&self, sibling: Option<NodeId>) -> Option<NodeId> {
        sibling.filter(|&id| self.node(id).count() > 1)
    }

    fn rebalance_leaf(&mut self, node: NodeId, key: Key) {
        let siblings = self.siblings(node, key);

        if let Some(right) = self.can_lend(siblings.right) {
            let entry = self.leaf_mut(right).remove_entry(0);
            self.leaf_mut(node).insert_entry(0, entry);
            let separator = self.leaf(right).key_at(0);
            self.internal_mut(siblings.parent)
                .set_key(siblings.index, separator);
            TreeStats::bump(&self.stats.borrows);
            debug!(%node, %right, borrowed = entry.key, "leaf borrowed from right sibling");
            return;
        }

        if let Some(left) = self.can_lend(siblings.left) {
            let last = self.leaf(left).count() - 1;
            let entry = self.leaf_mut(left).remove_entry(last);
            self.leaf_mut(node).insert_entry(0, entry);
            self.internal_mut(siblings.parent)
                .set_key(siblings.index - 1, entry.key);
            TreeStats::bump(&self.stats.borrows);
            debug!(%node, %left, borrowed = entry.key, "leaf borrowed from left sibling");
            return;
        }

        // Merge: the node is empty, so only the parent slot and the chain
        // links need to go. Merging right drops the separator after the
        // node, merging left drops the one before it.
        let separator_index = if siblings.right.is_some() {
            siblings.index
        } else {
            siblings.index - 1
        };
        let parent = self.internal_mut(siblings.parent);
        parent.remove_key(separator_index);
        parent.remove_child(siblings.index);

        self.unlink_leaf(node);
        self.discard(node);
        TreeStats::bump(&self.stats.merges);
        debug!(%node, parent = %siblings.parent, "merged empty leaf");

        if self.node(siblings.parent).count() == 0 {
            self.rebalance_internal(siblings.parent, key);
        }
    }

    /// Rebalance empty internal nodes, walking up while merges keep emptying
    /// parents.
    fn rebalance_internal(&mut self, node: NodeId, key: Key) {
        let mut node = node;
        loop {
            if node == self.root {
                self.collapse_root();
                return;
            }

            let siblings = self.siblings(node, key);
            if let Some(left) = self.can_lend(siblings.left) {
                self.borrow_from_left_internal(node, left, siblings);
                return;
            }
            if let Some(right) = self.can_lend(siblings.right) {
                self.borrow_from_right_internal(node, right, siblings);
                return;
            }

            match (siblings.left, siblings.right) {
                (_, Some(right)) => self.merge_into_right_internal(node, right, siblings),
                (Some(left), None) => self.merge_into_left_internal(node, left, siblings),
                (None, None) => panic!("{} has no siblings to merge with", node),
            }
            self.discard(node);
            TreeStats::bump(&self.stats.merges);

            if self.node(siblings.parent).count() != 0 {
                return;
            }
            node = siblings.parent;
        }
    }

    /// The root has no separators left: its only child becomes the root.
    fn collapse_root(&mut self) {
        let old_root = self.root;
        let child = self.internal(old_root).child(0);
        self.node_mut(child).set_parent(None);
        self.root = child;
        self.discard(old_root);
        TreeStats::bump(&self.stats.root_collapses);
        debug!(%old_root, new_root = %child, height = self.height(), "collapsed root");
    }

    /// Take the left sibling's last child. The parent separator drops into
    /// the node and the sibling's last separator replaces it.
    fn borrow_from_left_internal(&mut self, node: NodeId, left: NodeId, siblings: Siblings) {
        let slot = siblings.index - 1;
        let separator = self.internal(siblings.parent).key(slot);

        let sibling = self.internal_mut(left);
        let last = sibling.count();
        let child = sibling.remove_child(last);
        let raised = sibling.remove_key(last - 1);

        let target = self.internal_mut(node);
        target.insert_child(0, child);
        target.insert_key(0, separator);
        self.node_mut(child).set_parent(Some(node));
        self.internal_mut(siblings.parent).set_key(slot, raised);

        TreeStats::bump(&self.stats.borrows);
        debug!(%node, %left, %child, "internal node borrowed from left sibling");
    }

    /// Take the right sibling's first child; mirror of the left borrow.
    fn borrow_from_right_internal(&mut self, node: NodeId, right: NodeId, siblings: Siblings) {
        let slot = siblings.index;
        let separator = self.internal(siblings.parent).key(slot);

        let sibling = self.internal_mut(right);
        let child = sibling.remove_child(0);
        let raised = sibling.remove_key(0);

        let target = self.internal_mut(node);
        target.push_child(child);
        target.insert_key(0, separator);
        self.node_mut(child).set_parent(Some(node));
        self.internal_mut(siblings.parent).set_key(slot, raised);

        TreeStats::bump(&self.stats.borrows);
        debug!(%node, %right, %child, "internal node borrowed from right sibling");
    }

    /// Fold the node's only child and the separator between the pair into
    /// the front of the right sibling.
    fn merge_into_right_internal(&mut self, node: NodeId, right: NodeId, siblings: Siblings) {
        let separator = self.internal(siblings.parent).key(siblings.index);
        let child = self.internal_mut(node).remove_child(0);

        let sibling = self.internal_mut(right);
        sibling.insert_child(0, child);
        sibling.insert_key(0, separator);
        self.node_mut(child).set_parent(Some(right));

        let parent = self.internal_mut(siblings.parent);
        parent.remove_key(siblings.index);
        parent.remove_child(siblings.index);
        debug!(%node, %right, "merged empty internal node into right sibling");
    }

    /// Fold the node's only child and the separator between the pair onto
    /// the end of the left sibling.
    fn merge_into_left_internal(&mut self, node: NodeId, left: NodeId, siblings: Siblings) {
        let slot = siblings.index - 1;
        let separator = self.internal(siblings.parent).key(slot);
        let child = self.internal_mut(node).remove_child(0);

        let sibling = self.internal_mut(left);
        sibling.push_child(child);
        let end = sibling.count();
        sibling.insert_key(end, separator);
        self.node_mut(child).set_parent(Some(left));

        let parent = self.internal_mut(siblings.parent);
        parent.remove_key(slot);
        parent.remove_child(siblings.index);
        debug!(%node, %left, "merged empty internal node into left sibling");
    }

    /// Splice a leaf out of the chain by joining its neighbours.
    fn unlink_leaf(&mut self, id: NodeId) {
        let leaf = self.leaf(id);
        let (prev, next) = (leaf.prev(), leaf.next());

        if let Some(next) = next {
            self.leaf_mut(next).set_prev(prev);
        }
        if let Some(prev) = prev {
            self.leaf_mut(prev).set_next(next);
        }
    }
}
