//! Structural checks and debug rendering.
//!
//! [`BPlusTree::check_invariants`] walks the whole tree and the leaf chain
//! and reports the first broken invariant. It is meant for tests and
//! debugging; normal operations never call it.

use std::collections::VecDeque;
use std::fmt;

use crate::common::{Error, Key, NodeId, Result};

use super::node::Node;
use super::tree::BPlusTree;

/// Pending node in the depth-first walk, with the key bounds its parent
/// imposes: every key below it must satisfy `lower <= key < upper`.
struct Visit {
    id: NodeId,
    parent: Option<NodeId>,
    lower: Option<Key>,
    upper: Option<Key>,
    depth: usize,
}

fn corrupted(message: String) -> Error {
    Error::Corrupted(message)
}

fn strictly_ascending(keys: &[Key]) -> bool {
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

impl BPlusTree {
    /// Verify every structural invariant of the tree.
    ///
    /// # Errors
    /// Returns `Error::Corrupted` describing the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        let max_entries = self.config.max_entries();
        let mut leaves = Vec::new();
        let mut leaf_depth = None;
        let mut visited = 0;

        let mut stack = vec![Visit {
            id: self.root,
            parent: None,
            lower: None,
            upper: None,
            depth: 1,
        }];

        while let Some(visit) = stack.pop() {
            visited += 1;
            let node = self.node(visit.id);

            if node.parent() != visit.parent {
                return Err(corrupted(format!(
                    "{} has parent {:?}, expected {:?}",
                    visit.id,
                    node.parent(),
                    visit.parent
                )));
            }
            if node.count() > max_entries {
                return Err(corrupted(format!(
                    "{} holds {} entries, max is {}",
                    visit.id,
                    node.count(),
                    max_entries
                )));
            }
            if visit.id != self.root && node.count() == 0 {
                return Err(corrupted(format!("non-root {} is empty", visit.id)));
            }

            match node {
                Node::Leaf(leaf) => {
                    let keys: Vec<Key> = leaf.entries().iter().map(|e| e.key).collect();
                    if !strictly_ascending(&keys) {
                        return Err(corrupted(format!("{} keys not ascending: {:?}", visit.id, keys)));
                    }
                    let out_of_bounds = keys.iter().find(|&&k| {
                        visit.lower.is_some_and(|lower| k < lower)
                            || visit.upper.is_some_and(|upper| k >= upper)
                    });
                    if let Some(key) = out_of_bounds {
                        return Err(corrupted(format!(
                            "{} key {} outside [{:?}, {:?})",
                            visit.id, key, visit.lower, visit.upper
                        )));
                    }
                    match leaf_depth {
                        None => leaf_depth = Some(visit.depth),
                        Some(depth) if depth != visit.depth => {
                            return Err(corrupted(format!(
                                "{} at depth {}, other leaves at depth {}",
                                visit.id, visit.depth, depth
                            )));
                        }
                        Some(_) => {}
                    }
                    leaves.push(visit.id);
                }
                Node::Internal(internal) => {
                    let keys = internal.keys();
                    if !strictly_ascending(keys) {
                        return Err(corrupted(format!(
                            "{} separators not ascending: {:?}",
                            visit.id, keys
                        )));
                    }
                    if internal.children().len() != keys.len() + 1 {
                        return Err(corrupted(format!(
                            "{} has {} separators but {} children",
                            visit.id,
                            keys.len(),
                            internal.children().len()
                        )));
                    }
                    // Reverse push so leaves are collected left to right.
                    for (i, &child) in internal.children().iter().enumerate().rev() {
                        stack.push(Visit {
                            id: child,
                            parent: Some(visit.id),
                            lower: if i == 0 { visit.lower } else { Some(keys[i - 1]) },
                            upper: keys.get(i).copied().or(visit.upper),
                            depth: visit.depth + 1,
                        });
                    }
                }
            }
        }

        if visited != self.nodes.len() {
            return Err(corrupted(format!(
                "{} nodes reachable but {} allocated",
                visited,
                self.nodes.len()
            )));
        }
        self.check_leaf_chain(&leaves)
    }

    /// The chain must visit exactly the leaves of the tree, left to right,
    /// with consistent back links and ascending keys.
    fn check_leaf_chain(&self, leaves: &[NodeId]) -> Result<()> {
        let mut current = leaves.first().copied();
        let mut prev: Option<NodeId> = None;
        let mut last_key: Option<Key> = None;
        let mut entries = 0;

        for &expected in leaves {
            let id = match current {
                Some(id) if id == expected => id,
                other => {
                    return Err(corrupted(format!(
                        "leaf chain reached {:?}, expected {}",
                        other, expected
                    )))
                }
            };
            let leaf = self.leaf(id);
            if leaf.prev() != prev {
                return Err(corrupted(format!(
                    "{} prev is {:?}, expected {:?}",
                    id,
                    leaf.prev(),
                    prev
                )));
            }
            for entry in leaf.entries() {
                if last_key.is_some_and(|last| entry.key <= last) {
                    return Err(corrupted(format!(
                        "leaf chain key {} after {:?}",
                        entry.key, last_key
                    )));
                }
                last_key = Some(entry.key);
            }
            entries += leaf.count();
            prev = Some(id);
            current = leaf.next();
        }

        if let Some(extra) = current {
            return Err(corrupted(format!("leaf chain continues past last leaf into {}", extra)));
        }
        if entries != self.len {
            return Err(corrupted(format!(
                "leaf chain holds {} entries, tree reports {}",
                entries, self.len
            )));
        }
        Ok(())
    }

    /// Keys of every node, level by level from the root.
    ///
    /// Internal nodes contribute their separators, leaves their entry keys.
    pub fn levels(&self) -> Vec<Vec<Vec<Key>>> {
        let mut levels: Vec<Vec<Vec<Key>>> = Vec::new();
        let mut queue = VecDeque::from([(self.root, 0usize)]);

        while let Some((id, depth)) = queue.pop_front() {
            if levels.len() <= depth {
                levels.push(Vec::new());
            }
            match self.node(id) {
                Node::Leaf(leaf) => {
                    levels[depth].push(leaf.entries().iter().map(|e| e.key).collect());
                }
                Node::Internal(internal) => {
                    levels[depth].push(internal.keys().to_vec());
                    queue.extend(internal.children().iter().map(|&child| (child, depth + 1)));
                }
            }
        }
        levels
    }

    /// Human-readable rendering of the tree, one line per level.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BPlusTree {
    /// Internal levels show separators; the leaf level is read off the leaf
    /// chain and shows `key:value` pairs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels = self.levels();
        let internal_levels = levels.len() - 1;

        for (depth, nodes) in levels.iter().take(internal_levels).enumerate() {
            let rendered: Vec<String> = nodes.iter().map(|keys| format!("{:?}", keys)).collect();
            writeln!(f, "level {}: {}", depth, rendered.join(" | "))?;
        }

        let mut rendered = Vec::new();
        let mut current = Some(self.find_leaf(Key::MIN));
        while let Some(id) = current {
            let leaf = self.leaf(id);
            let entries: Vec<String> = leaf
                .entries()
                .iter()
                .map(|e| format!("{}:{:?}", e.key, e.value))
                .collect();
            rendered.push(format!("[{}]", entries.join(", ")));
            current = leaf.next();
        }
        writeln!(f, "level {}: {}", internal_levels, rendered.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(order: usize, keys: impl IntoIterator<Item = Key>) -> BPlusTree {
        let mut tree = BPlusTree::new(order).unwrap();
        for key in keys {
            tree.insert(key, key as f64);
        }
        tree
    }

    #[test]
    fn test_empty_tree_is_valid() {
        BPlusTree::new(3).unwrap().check_invariants().unwrap();
    }

    #[test]
    fn test_built_tree_is_valid() {
        let tree = tree_with(3, (0..200).map(|k| (k * 37) % 200));
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_detects_broken_separator() {
        let mut tree = tree_with(4, 1..=4);
        let root = tree.root;
        tree.internal_mut(root).set_key(0, 100);

        let err = tree.check_invariants().unwrap_err();
        assert!(matches!(err, Error::Corrupted(_)));
    }

    #[test]
    fn test_detects_broken_leaf_chain() {
        let mut tree = tree_with(4, 1..=4);
        let first = tree.find_leaf(1);
        tree.leaf_mut(first).set_next(None);

        let err = tree.check_invariants().unwrap_err();
        assert!(err.to_string().contains("leaf chain"));
    }

    #[test]
    fn test_detects_wrong_parent() {
        let mut tree = tree_with(4, 1..=4);
        let leaf = tree.find_leaf(1);
        tree.node_mut(leaf).set_parent(None);

        let err = tree.check_invariants().unwrap_err();
        assert!(err.to_string().contains("parent"));
    }

    #[test]
    fn test_levels() {
        let tree = tree_with(4, 1..=7);
        assert_eq!(
            tree.levels(),
            vec![vec![vec![3, 5]], vec![vec![1, 2], vec![3, 4], vec![5, 6, 7]]]
        );
    }

    #[test]
    fn test_dump() {
        let tree = tree_with(4, 1..=4);
        assert_eq!(
            tree.dump(),
            "level 0: [3]\nlevel 1: [1:1.0, 2:2.0] | [3:3.0, 4:4.0]\n"
        );
        assert_eq!(BPlusTree::new(3).unwrap().dump(), "level 0: []\n");
    }
}
