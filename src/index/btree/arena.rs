//! Node arena - owning storage for every node in a tree.
//!
//! Nodes refer to each other by [`NodeId`], which is a slot index here.
//! Released slots go on a free list and are handed out again (LIFO), the
//! same way the buffer pool recycles frames.

use crate::common::NodeId;

use super::node::Node;

/// Slot table of nodes plus a free list of released slots.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    slots: Vec<Option<Node>>,
    free_list: Vec<NodeId>,
}

impl NodeArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Store a node, reusing a released slot when one is available.
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            self.slots[id.0] = Some(node);
            id
        } else {
            self.slots.push(Some(node));
            NodeId::new(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("{} is not a live node", id),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("{} is not a live node", id),
        }
    }

    /// Remove a node from the arena and recycle its slot.
    pub(crate) fn release(&mut self, id: NodeId) -> Node {
        let node = match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(node) => node,
            None => panic!("{} released twice or never allocated", id),
        };
        self.free_list.push(id);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::btree::node::LeafNode;

    fn leaf() -> Node {
        Node::Leaf(LeafNode::new(None))
    }

    #[test]
    fn test_alloc_and_get() {
        let mut arena = NodeArena::new();
        assert_eq!(arena.len(), 0);

        let a = arena.alloc(leaf());
        let b = arena.alloc(leaf());

        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert!(arena.get(a).is_leaf());
    }

    #[test]
    fn test_release_reuses_slot() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf());
        let _b = arena.alloc(leaf());

        arena.release(a);
        assert_eq!(arena.len(), 1);

        let c = arena.alloc(leaf());
        assert_eq!(c, a);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "is not a live node")]
    fn test_get_released_panics() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf());
        arena.release(a);
        let _ = arena.get(a);
    }

    #[test]
    #[should_panic(expected = "released twice")]
    fn test_double_release_panics() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf());
        arena.release(a);
        arena.release(a);
    }
}
