//! Thread-safe handle around a [`BPlusTree`].

use std::sync::Arc;

use parking_lot::RwLock;

use crate::common::{Key, Result, Value};

use super::stats::StatsSnapshot;
use super::tree::BPlusTree;

/// A cloneable, lock-guarded tree.
///
/// `BPlusTree` itself does no locking. `SharedTree` serializes access behind
/// one `RwLock`: searches take the read lock and run concurrently, inserts
/// and deletes take the write lock. Each call is atomic with respect to the
/// others; there are no multi-call transactions.
///
/// # Thread Safety
/// - `tree`: `RwLock`: many readers, one writer at a time
/// - Clones share the same tree through an `Arc`
///
/// # Example
/// ```
/// use bplustree::SharedTree;
/// use std::thread;
///
/// let tree = SharedTree::new(4).unwrap();
/// let writer = tree.clone();
/// thread::spawn(move || {
///     writer.insert(1, 1.5);
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(tree.search(1), vec![1.5]);
/// ```
#[derive(Debug, Clone)]
pub struct SharedTree {
    tree: Arc<RwLock<BPlusTree>>,
}

impl SharedTree {
    /// Create a shared empty tree of the given order.
    ///
    /// # Errors
    /// Returns `Error::InvalidOrder` if `order < 3`.
    pub fn new(order: usize) -> Result<Self> {
        Ok(Self::from_tree(BPlusTree::new(order)?))
    }

    /// Take ownership of an existing tree.
    pub fn from_tree(tree: BPlusTree) -> Self {
        Self {
            tree: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn insert(&self, key: Key, value: Value) -> Option<Value> {
        self.tree.write().insert(key, value)
    }

    pub fn delete(&self, key: Key) -> Option<Value> {
        self.tree.write().delete(key)
    }

    pub fn search(&self, key: Key) -> Vec<Value> {
        self.tree.read().search(key)
    }

    pub fn search_range(&self, start: Key, end: Key) -> Vec<Value> {
        self.tree.read().search_range(start, end)
    }

    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.tree.read().stats().snapshot()
    }

    /// Run `f` with shared access to the tree.
    pub fn read<R>(&self, f: impl FnOnce(&BPlusTree) -> R) -> R {
        f(&*self.tree.read())
    }

    /// Run `f` with exclusive access, e.g. for a batch of inserts that must
    /// not interleave with other writers.
    pub fn write<R>(&self, f: impl FnOnce(&mut BPlusTree) -> R) -> R {
        f(&mut *self.tree.write())
    }
}
