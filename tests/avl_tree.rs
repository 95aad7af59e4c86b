use std::collections::BTreeMap;

use avl_rank_tree::{AvlTree, Error, Key};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys drawn from a range small enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = Key> {
    -1_000i64..1_000i64
}

fn tree_from(keys: impl IntoIterator<Item = Key>) -> AvlTree<Key> {
    let mut tree = AvlTree::new();
    for key in keys {
        tree.insert(key, key * 100).unwrap();
    }
    tree
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn ascending_inserts_rotate() {
    let mut tree = AvlTree::new();
    let counts: Vec<usize> = [10, 20, 30, 40, 50].into_iter().map(|k| tree.insert(k, ()).unwrap()).collect();

    // 30 and 50 each need a promotion followed by a single rotation.
    assert_eq!(counts, [0, 1, 3, 2, 3]);
    assert_eq!(tree.keys_to_vec(), [10, 20, 30, 40, 50]);
    assert_eq!(tree.rank(), 2);
}

#[test]
fn deleting_two_child_node_promotes_successor() {
    let mut tree = tree_from(1..=7);
    tree.delete(4).unwrap();

    assert_eq!(tree.keys_to_vec(), [1, 2, 3, 5, 6, 7]);
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.select(3), Some((5, &500)));
    assert_eq!(tree.search(4), None);
}

#[test]
fn split_three_keys() {
    let (lower, upper) = tree_from([1, 2, 3]).split(2);
    assert_eq!(lower.keys_to_vec(), [1]);
    assert_eq!(upper.keys_to_vec(), [3]);
}

#[test]
fn join_two_leaves() {
    let mut lower = tree_from([1]);
    let upper = tree_from([3]);
    assert_eq!(lower.join(2, 200, upper), 1);
    assert_eq!(lower.keys_to_vec(), [1, 2, 3]);
    assert_eq!(lower.values_to_vec(), [&100, &200, &300]);
}

// ─── Boundaries ──────────────────────────────────────────────────────────────

#[test]
fn empty_tree_boundaries() {
    let mut tree: AvlTree<Key> = AvlTree::new();
    assert_eq!(tree.search(0), None);
    assert_eq!(tree.delete(0), Err(Error::KeyNotFound(0)));
    assert_eq!(tree.min(), None);
    assert_eq!(tree.max(), None);
    assert!(tree.keys_to_vec().is_empty());
    assert_eq!(tree.iter().next(), None);

    assert_eq!(tree.insert(7, 70), Ok(0));
    assert_eq!(tree.min(), Some(&70));
    assert_eq!(tree.max(), Some(&70));
    assert_eq!(tree.first_key_value(), tree.last_key_value());
}

#[test]
fn duplicate_insert_keeps_original_value() {
    let mut tree = tree_from([5]);
    assert_eq!(tree.insert(5, 0), Err(Error::DuplicateKey(5)));
    assert_eq!(tree.search(5), Some(&500));
    assert_eq!(tree.len(), 1);
}

#[test]
fn error_messages() {
    assert_eq!(Error::DuplicateKey(3).to_string(), "key 3 is already present in the tree");
    assert_eq!(Error::KeyNotFound(-1).to_string(), "key -1 is not present in the tree");
}

#[test]
fn split_at_every_key() {
    let original = tree_from(0..64);
    for pivot in 0..64 {
        let (mut lower, entry, upper) = original.clone().split_entry(pivot);
        assert_eq!(lower.keys_to_vec(), (0..pivot).collect::<Vec<_>>());
        assert_eq!(upper.keys_to_vec(), (pivot + 1..64).collect::<Vec<_>>());
        assert_eq!(entry, (pivot, pivot * 100));

        lower.join(entry.0, entry.1, upper);
        assert_eq!(lower, original);
    }
}

#[test]
fn joins_grow_a_tree_in_both_directions() {
    let mut tree = tree_from([0]);
    for step in 1..50 {
        let rank = tree.rank();
        let left = tree_from([-3 * step]);
        // A rank-0 tree on either side costs `rank(tree) - 0 + 1`.
        assert_eq!(tree.join(-3 * step + 1, 0, left), rank.unsigned_abs() as usize + 1);

        let rank = tree.rank();
        let right = tree_from([3 * step]);
        assert_eq!(tree.join(3 * step - 1, 0, right), rank.unsigned_abs() as usize + 1);
    }
    assert_eq!(tree.len(), 1 + 49 * 4);
    assert!(tree.rank() <= 10, "rank {} too large", tree.rank());
}

// ─── Randomized comparisons against BTreeMap ─────────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(Key, i64),
    Delete(Key),
    Remove(Key),
    Search(Key),
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| TreeOp::Insert(k, v)),
        2 => key_strategy().prop_map(TreeOp::Delete),
        1 => key_strategy().prop_map(TreeOp::Remove),
        2 => key_strategy().prop_map(TreeOp::Search),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations on both `AvlTree` and `BTreeMap` and compares every result.
    #[test]
    fn tree_ops_match_btreemap(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: AvlTree<i64> = AvlTree::new();
        let mut model: BTreeMap<Key, i64> = BTreeMap::new();

        for op in &ops {
            match *op {
                TreeOp::Insert(k, v) => {
                    let result = tree.insert(k, v);
                    if let std::collections::btree_map::Entry::Vacant(entry) = model.entry(k) {
                        entry.insert(v);
                        prop_assert!(result.is_ok(), "insert({})", k);
                    } else {
                        prop_assert_eq!(result, Err(Error::DuplicateKey(k)));
                    }
                }
                TreeOp::Delete(k) => {
                    let result = tree.delete(k);
                    if model.remove(&k).is_some() {
                        prop_assert!(result.is_ok(), "delete({})", k);
                    } else {
                        prop_assert_eq!(result, Err(Error::KeyNotFound(k)));
                    }
                }
                TreeOp::Remove(k) => {
                    prop_assert_eq!(tree.remove(k), model.remove(&k), "remove({})", k);
                }
                TreeOp::Search(k) => {
                    prop_assert_eq!(tree.search(k), model.get(&k), "search({})", k);
                }
            }
            prop_assert_eq!(tree.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(tree.first_key_value(), model.first_key_value().map(|(&k, v)| (k, v)));
            prop_assert_eq!(tree.last_key_value(), model.last_key_value().map(|(&k, v)| (k, v)));
        }

        let expected: Vec<(Key, i64)> = model.into_iter().collect();
        prop_assert_eq!(tree.into_iter().collect::<Vec<_>>(), expected);
    }

    /// Searching never changes the tree.
    #[test]
    fn search_is_idempotent(keys in proptest::collection::vec(key_strategy(), 1..200), probe in key_strategy()) {
        let tree: AvlTree<Key> = keys.iter().map(|&k| (k, k)).collect();
        let before = tree.clone();
        let first = tree.search(probe).copied();
        prop_assert_eq!(tree.search(probe).copied(), first);
        prop_assert_eq!(&tree, &before);
        prop_assert_eq!(tree.rank(), before.rank());
    }

    /// Rebalance counts per insert stay within a constant plus two per level of the tree.
    #[test]
    fn insert_counts_are_bounded(keys in proptest::collection::vec(key_strategy(), 1..500)) {
        let mut tree = AvlTree::new();
        for key in keys {
            if let Ok(count) = tree.insert(key, ()) {
                let bound = 6 + usize::try_from(tree.rank().max(0)).unwrap_or(0);
                prop_assert!(count <= bound, "count {} exceeds {}", count, bound);
            }
        }
    }

    /// Splitting at a present key then joining the pieces back restores the entries and the
    /// extremes.
    #[test]
    fn split_join_round_trip(keys in proptest::collection::btree_set(key_strategy(), 1..300), pick in any::<prop::sample::Index>()) {
        let keys: Vec<Key> = keys.into_iter().collect();
        let pivot = keys[pick.index(keys.len())];
        let original: AvlTree<Key> = keys.iter().map(|&k| (k, k * 3)).collect();
        let expected_min = original.first_key_value().map(|(k, &v)| (k, v));
        let expected_max = original.last_key_value().map(|(k, &v)| (k, v));

        let (mut lower, (key, value), upper) = original.clone().split_entry(pivot);
        prop_assert!(lower.keys().all(|k| k < pivot));
        prop_assert!(upper.keys().all(|k| k > pivot));
        prop_assert_eq!(lower.len() + upper.len() + 1, keys.len());

        let lower_rank = lower.rank();
        let upper_rank = upper.rank();
        let cost = lower.join(key, value, upper);
        prop_assert_eq!(cost, lower_rank.abs_diff(upper_rank) as usize + 1);

        prop_assert_eq!(&lower, &original);
        prop_assert_eq!(lower.first_key_value().map(|(k, &v)| (k, v)), expected_min);
        prop_assert_eq!(lower.last_key_value().map(|(k, &v)| (k, v)), expected_max);
        for (index, &k) in keys.iter().enumerate() {
            prop_assert_eq!(lower.position(k), Some(index));
        }
    }

    /// Iteration from both ends visits the entries in the same order as `BTreeMap`.
    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), any::<i64>()), 0..500)) {
        let tree: AvlTree<i64> = entries.iter().copied().collect();
        let mut model: BTreeMap<Key, i64> = BTreeMap::new();
        for &(k, v) in &entries {
            model.entry(k).or_insert(v);
        }

        let forward: Vec<(Key, i64)> = tree.iter().map(|(k, &v)| (k, v)).collect();
        let expected: Vec<(Key, i64)> = model.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&forward, &expected);

        let backward: Vec<Key> = tree.keys().rev().collect();
        let expected_back: Vec<Key> = model.keys().rev().copied().collect();
        prop_assert_eq!(backward, expected_back);
        prop_assert_eq!(tree.iter().len(), model.len());
    }
}
