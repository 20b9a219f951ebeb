//! Property tests: the tree against a `BTreeMap` model.
//!
//! Random operation sequences run against both; after every step the tree's
//! structural invariants must hold and its contents must match the model.

use std::collections::BTreeMap;

use bplustree::{BPlusTree, Key};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Operation {
    Insert(Key, f64),
    Delete(Key),
    Search(Key),
    SearchRange(Key, Key),
}

/// Narrow key space so deletes and upserts hit existing keys often.
fn key() -> impl Strategy<Value = Key> {
    -64..64i32
}

fn strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        6 => (key(), -1000.0..1000.0f64).prop_map(|(k, v)| Operation::Insert(k, v)),
        4 => key().prop_map(Operation::Delete),
        1 => key().prop_map(Operation::Search),
        1 => (key(), key()).prop_map(|(a, b)| Operation::SearchRange(a.min(b), a.max(b))),
    ]
}

fn model_range(model: &BTreeMap<Key, f64>, start: Key, end: Key) -> Vec<f64> {
    model.range(start..=end).map(|(_, &v)| v).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tree_matches_btreemap(
        order in 3usize..8,
        operations in prop::collection::vec(strategy(), 0..400),
    ) {
        let mut tree = BPlusTree::new(order).unwrap();
        let mut model: BTreeMap<Key, f64> = BTreeMap::new();

        for operation in operations {
            match operation {
                Operation::Insert(k, v) => {
                    prop_assert_eq!(tree.insert(k, v), model.insert(k, v));
                }
                Operation::Delete(k) => {
                    prop_assert_eq!(tree.delete(k), model.remove(&k));
                }
                Operation::Search(k) => {
                    prop_assert_eq!(tree.search(k), model_range(&model, k, k));
                }
                Operation::SearchRange(start, end) => {
                    prop_assert_eq!(tree.search_range(start, end), model_range(&model, start, end));
                }
            }

            if let Err(err) = tree.check_invariants() {
                return Err(TestCaseError::fail(format!("{}\n{}", err, tree.dump())));
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        let keys: Vec<Key> = tree.iter().map(|(k, _)| k).collect();
        let expected: Vec<Key> = model.keys().copied().collect();
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn drain_leaves_single_empty_leaf(
        order in 3usize..7,
        keys in prop::collection::btree_set(any::<i32>(), 1..200),
        seed in any::<u64>(),
    ) {
        let mut tree = BPlusTree::new(order).unwrap();
        for &k in &keys {
            tree.insert(k, k as f64);
        }

        // Deterministic shuffle of the delete order from the seed.
        let mut order_keys: Vec<Key> = keys.iter().copied().collect();
        order_keys.sort_by_key(|&k| (k as u64).wrapping_mul(seed | 1).rotate_left(17));

        for k in order_keys {
            prop_assert_eq!(tree.delete(k), Some(k as f64));
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.node_count(), 1);
        prop_assert_eq!(tree.height(), 1);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn ranges_are_sorted_and_bounded(
        keys in prop::collection::vec(any::<i16>(), 0..300),
        start in any::<i16>(),
        end in any::<i16>(),
    ) {
        let mut tree = BPlusTree::new(4).unwrap();
        for &k in &keys {
            tree.insert(k as Key, k as f64);
        }

        let found: Vec<(Key, f64)> = tree.range(start as Key, end as Key).collect();
        prop_assert!(found.windows(2).all(|w| w[0].0 < w[1].0));
        prop_assert!(found.iter().all(|&(k, _)| k >= start as Key && k <= end as Key));
    }
}
