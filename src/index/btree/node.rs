//! Node - the tree's structural unit.
//!
//! A [`Node`] is either a [`LeafNode`] holding sorted entries and leaf-chain
//! links, or an [`InternalNode`] holding separator keys and child ids.
//! The engine components only touch node contents through the methods here.

use crate::common::{Entry, Key, NodeId, Value};

/// A node in the tree: leaf or internal.
#[derive(Debug)]
pub(crate) enum Node {
    Leaf(LeafNode),
    Internal(InternalNode),
}

/// Leaf node: sorted unique entries, parent link, and leaf-chain links.
#[derive(Debug, Default)]
pub(crate) struct LeafNode {
    entries: Vec<Entry>,
    parent: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Internal node: separators `k[0..n)` and children `c[0..n+1)`.
///
/// Keys under `c[i]` are `< k[i]`; keys under `c[i+1]` are `>= k[i]`.
#[derive(Debug, Default)]
pub(crate) struct InternalNode {
    keys: Vec<Key>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// Routing rule: number of keys `<= key`.
///
/// For an internal node this is the child index to descend into; for a leaf
/// it is the insertion position, with an exact match sitting just before it.
#[inline]
fn route(keys: impl Iterator<Item = Key>, key: Key) -> usize {
    let mut index = 0;
    for k in keys {
        if k > key {
            break;
        }
        index += 1;
    }
    index
}

impl Node {
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub(crate) fn as_leaf(&self) -> &LeafNode {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected leaf node"),
        }
    }

    pub(crate) fn as_leaf_mut(&mut self) -> &mut LeafNode {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected leaf node"),
        }
    }

    pub(crate) fn as_internal(&self) -> &InternalNode {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }

    pub(crate) fn as_internal_mut(&mut self) -> &mut InternalNode {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }

    /// Entry count for a leaf, separator count for an internal node.
    pub(crate) fn count(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.count(),
            Node::Internal(internal) => internal.count(),
        }
    }

    /// True once the node holds `order` entries and must be split.
    pub(crate) fn is_overflow(&self, order: usize) -> bool {
        self.count() == order
    }

    pub(crate) fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Leaf(leaf) => leaf.parent,
            Node::Internal(internal) => internal.parent,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::Leaf(leaf) => leaf.parent = parent,
            Node::Internal(internal) => internal.parent = parent,
        }
    }

    /// Release contents and links of a node that is being merged away.
    pub(crate) fn clear(&mut self) {
        match self {
            Node::Leaf(leaf) => {
                leaf.entries.clear();
                leaf.parent = None;
                leaf.prev = None;
                leaf.next = None;
            }
            Node::Internal(internal) => {
                internal.keys.clear();
                internal.children.clear();
                internal.parent = None;
            }
        }
    }
}

impl LeafNode {
    pub(crate) fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            ..Self::default()
        }
    }

    pub(crate) fn from_entries(entries: Vec<Entry>, parent: Option<NodeId>) -> Self {
        Self {
            entries,
            parent,
            prev: None,
            next: None,
        }
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub(crate) fn entry(&self, index: usize) -> Entry {
        self.entries[index]
    }

    pub(crate) fn key_at(&self, index: usize) -> Key {
        self.entries[index].key
    }

    pub(crate) fn first_key(&self) -> Option<Key> {
        self.entries.first().map(|e| e.key)
    }

    pub(crate) fn key_index(&self, key: Key) -> usize {
        route(self.entries.iter().map(|e| e.key), key)
    }

    /// Index of the entry holding exactly `key`, if present.
    pub(crate) fn find(&self, key: Key) -> Option<usize> {
        let index = self.key_index(key).checked_sub(1)?;
        (self.entries[index].key == key).then_some(index)
    }

    pub(crate) fn insert_entry(&mut self, index: usize, entry: Entry) {
        self.entries.insert(index, entry);
    }

    pub(crate) fn remove_entry(&mut self, index: usize) -> Entry {
        self.entries.remove(index)
    }

    pub(crate) fn set_value(&mut self, index: usize, value: Value) {
        self.entries[index].value = value;
    }

    /// Keep entries `[0, mid)`; return `[mid, count)`.
    pub(crate) fn split_off(&mut self, mid: usize) -> Vec<Entry> {
        self.entries.split_off(mid)
    }

    pub(crate) fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub(crate) fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub(crate) fn set_prev(&mut self, prev: Option<NodeId>) {
        self.prev = prev;
    }

    pub(crate) fn set_next(&mut self, next: Option<NodeId>) {
        self.next = next;
    }
}

impl InternalNode {
    pub(crate) fn new(keys: Vec<Key>, children: Vec<NodeId>, parent: Option<NodeId>) -> Self {
        debug_assert_eq!(children.len(), keys.len() + 1);
        Self {
            keys,
            children,
            parent,
        }
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn keys(&self) -> &[Key] {
        &self.keys
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> Key {
        self.keys[index]
    }

    pub(crate) fn set_key(&mut self, index: usize, key: Key) {
        self.keys[index] = key;
    }

    pub(crate) fn insert_key(&mut self, index: usize, key: Key) {
        self.keys.insert(index, key);
    }

    pub(crate) fn remove_key(&mut self, index: usize) -> Key {
        self.keys.remove(index)
    }

    pub(crate) fn key_index(&self, key: Key) -> usize {
        route(self.keys.iter().copied(), key)
    }

    pub(crate) fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> NodeId {
        self.children[index]
    }

    /// Child at `index`, or `None` when out of range (sibling lookups).
    pub(crate) fn get_child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied()
    }

    pub(crate) fn insert_child(&mut self, index: usize, child: NodeId) {
        self.children.insert(index, child);
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, index: usize) -> NodeId {
        self.children.remove(index)
    }

    /// Split around separator `mid`.
    ///
    /// This node keeps separators `[0, mid)` and children `[0, mid]`. Returns
    /// the promoted separator plus the separators `[mid+1, count)` and
    /// children `[mid+1, count+1)` for the new right node.
    pub(crate) fn split_off(&mut self, mid: usize) -> (Key, Vec<Key>, Vec<NodeId>) {
        let right_keys = self.keys.split_off(mid + 1);
        let promoted = self.keys.remove(mid);
        let right_children = self.children.split_off(mid + 1);
        (promoted, right_keys, right_children)
    }
}
