//! The tree handle: configuration, root reference, and node storage.

use crate::common::{NodeId, Result, TreeConfig};

use super::arena::NodeArena;
use super::node::{InternalNode, LeafNode, Node};
use super::stats::TreeStats;

/// An in-memory B+ tree mapping `i32` keys to `f64` values.
///
/// A node holds at most `order - 1` entries; reaching `order` entries forces
/// a split. A node is rebalanced on delete only once it becomes completely
/// empty, so non-root nodes may legitimately hold a single entry.
///
/// # Thread Safety
/// `BPlusTree` is **single-threaded**: mutation needs `&mut self`. Wrap it in
/// a [`SharedTree`](super::SharedTree) to share it between threads.
///
/// # Example
/// ```
/// use bplustree::BPlusTree;
///
/// let mut tree = BPlusTree::new(4).unwrap();
/// for key in 1..=7 {
///     tree.insert(key, key as f64);
/// }
/// tree.delete(4);
///
/// assert_eq!(tree.search(3), vec![3.0]);
/// assert_eq!(tree.search_range(1, 7), vec![1.0, 2.0, 3.0, 5.0, 6.0, 7.0]);
/// assert!(tree.search(4).is_empty());
/// ```
#[derive(Debug)]
pub struct BPlusTree {
    pub(super) config: TreeConfig,
    pub(super) root: NodeId,
    pub(super) nodes: NodeArena,
    /// Number of entries across all leaves.
    pub(super) len: usize,
    pub(super) stats: TreeStats,
}

impl BPlusTree {
    /// Create an empty tree of the given order.
    ///
    /// # Errors
    /// Returns `Error::InvalidOrder` if `order < 3`.
    pub fn new(order: usize) -> Result<Self> {
        Ok(Self::with_config(TreeConfig::new(order)?))
    }

    /// Create an empty tree from a validated configuration.
    ///
    /// The tree starts as a single empty leaf acting as root.
    pub fn with_config(config: TreeConfig) -> Self {
        let mut nodes = NodeArena::new();
        let root = nodes.alloc(Node::Leaf(LeafNode::new(None)));
        tracing::debug!(order = config.order(), "initialized tree");

        Self {
            config,
            root,
            nodes,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    pub fn order(&self) -> usize {
        self.config.order()
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels; a lone root leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let Node::Internal(internal) = self.node(current) {
            current = internal.child(0);
            height += 1;
        }
        height
    }

    /// Number of live nodes (leaves and internal).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    // ========================================================================
    // Node access for the engine components
    // ========================================================================

    #[inline]
    pub(super) fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(id)
    }

    #[inline]
    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes.get_mut(id)
    }

    #[inline]
    pub(super) fn leaf(&self, id: NodeId) -> &LeafNode {
        self.node(id).as_leaf()
    }

    #[inline]
    pub(super) fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode {
        self.node_mut(id).as_leaf_mut()
    }

    #[inline]
    pub(super) fn internal(&self, id: NodeId) -> &InternalNode {
        self.node(id).as_internal()
    }

    #[inline]
    pub(super) fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode {
        self.node_mut(id).as_internal_mut()
    }

    /// Parent of a node known not to be the root.
    pub(super) fn parent_of(&self, id: NodeId) -> NodeId {
        match self.node(id).parent() {
            Some(parent) => parent,
            None => panic!("non-root {} has no parent", id),
        }
    }

    /// Whether the children of internal node `id` are leaves.
    pub(super) fn children_are_leaves(&self, id: NodeId) -> bool {
        self.internal(id)
            .children()
            .first()
            .is_some_and(|&child| self.node(child).is_leaf())
    }

    /// Clear a node that has been merged away and recycle its slot.
    pub(super) fn discard(&mut self, id: NodeId) {
        self.node_mut(id).clear();
        self.nodes.release(id);
    }
}

impl Default for BPlusTree {
    fn default() -> Self {
        Self::with_config(TreeConfig::default())
    }
}
