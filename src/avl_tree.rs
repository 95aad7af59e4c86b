use core::fmt;
use core::iter::FusedIterator;

use alloc::vec::Vec;

use crate::raw::{Forest, Link, RawAvlTree};
use crate::{Error, Key};

mod capacity;
mod order_statistic;
mod split_join;

/// An ordered map from [`Key`] to `V` kept as a rank-balanced [AVL tree].
///
/// Keys are distinct integers. Every node stores a rank (its height) and the rank difference to
/// each child is kept in `{1, 2}` and never `2` on both sides. Lookups, insertions and deletions
/// therefore take O(log n) time.
///
/// Mutations report their balancing work: [`insert`](AvlTree::insert) and
/// [`delete`](AvlTree::delete) return the number of rebalance operations they performed, counted
/// as follows:
///
/// | Operation | Count |
/// |---|---|
/// | promotion or demotion | 1 |
/// | single rotation (including its demotion) | 2 |
/// | single rotation during deletion, with its promote or demote | 3 |
/// | double rotation during insertion | 5 |
/// | double rotation during deletion | 6 |
///
/// The minimum, the maximum and the number of entries are cached and read in O(1).
///
/// # Examples
///
/// ```
/// use avl_rank_tree::{AvlTree, Error};
///
/// let mut tree = AvlTree::new();
///
/// // The first insert never rebalances.
/// assert_eq!(tree.insert(2, "two"), Ok(0));
/// // The root is promoted.
/// assert_eq!(tree.insert(1, "one"), Ok(1));
/// assert_eq!(tree.insert(3, "three"), Ok(0));
///
/// // Duplicates are rejected without touching the tree.
/// assert_eq!(tree.insert(3, "drei"), Err(Error::DuplicateKey(3)));
/// assert_eq!(tree.search(3), Some(&"three"));
///
/// assert_eq!(tree.delete(2), Ok(0));
/// assert_eq!(tree.delete(2), Err(Error::KeyNotFound(2)));
///
/// for (key, value) in &tree {
///     println!("{key}: {value}");
/// }
/// ```
///
/// An `AvlTree` with a known list of items can be initialized from an array:
///
/// ```
/// use avl_rank_tree::AvlTree;
///
/// let primes = AvlTree::from([(2, "two"), (3, "three"), (5, "five"), (7, "seven")]);
/// assert_eq!(primes.len(), 4);
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
pub struct AvlTree<V> {
    raw: RawAvlTree<V>,
}

impl<V> AvlTree<V> {
    /// Makes a new, empty `AvlTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1, "a").unwrap();
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlTree { raw: RawAvlTree::new() }
    }

    /// Returns `true` if the tree contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.is_empty());
    /// tree.insert(1, "a").unwrap();
    /// assert!(!tree.is_empty());
    /// ```
    #[doc(alias = "empty")]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Complexity
    ///
    /// O(1), read from the root's cached subtree size.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1, "a").unwrap();
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[doc(alias = "size")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the rank of the root, or -1 for an empty tree.
    ///
    /// The rank equals the height of the tree. [`join`](AvlTree::join) costs are measured in rank
    /// differences.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.rank(), -1);
    /// tree.insert(1, ()).unwrap();
    /// assert_eq!(tree.rank(), 0);
    /// tree.insert(2, ()).unwrap();
    /// assert_eq!(tree.rank(), 1);
    /// ```
    #[must_use]
    pub fn rank(&self) -> i32 {
        self.raw.rank()
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value stored under `key`, or `None` if it is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([(1, "a")]);
    /// assert_eq!(tree.search(1), Some(&"a"));
    /// assert_eq!(tree.search(2), None);
    /// ```
    #[doc(alias = "get")]
    #[must_use]
    pub fn search(&self, key: Key) -> Option<&V> {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([(1, "a")]);
    /// if let Some(x) = tree.get_mut(1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(tree.search(1), Some(&"b"));
    /// ```
    pub fn get_mut(&mut self, key: Key) -> Option<&mut V> {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the tree contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: Key) -> bool {
        self.raw.get(key).is_some()
    }

    /// Inserts `key` with `value`.
    ///
    /// Returns the number of rebalance operations performed, which is `0` when the tree was empty
    /// or the new node did not unbalance it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if `key` is already present. The tree is left unchanged and
    /// `value` is dropped.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::{AvlTree, Error};
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert(10, "a"), Ok(0));
    /// assert_eq!(tree.insert(20, "b"), Ok(1));
    /// // 10 -> 20 -> 30 is a chain; one promotion and one rotation fix it.
    /// assert_eq!(tree.insert(30, "c"), Ok(3));
    /// assert_eq!(tree.insert(30, "d"), Err(Error::DuplicateKey(30)));
    /// ```
    pub fn insert(&mut self, key: Key, value: V) -> Result<usize, Error> {
        self.raw.insert(key, value)
    }

    /// Deletes `key` from the tree.
    ///
    /// Returns the number of rebalance operations performed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent, including when the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::{AvlTree, Error};
    ///
    /// let mut tree = AvlTree::from([(1, "a"), (2, "b"), (3, "c")]);
    /// assert_eq!(tree.delete(1), Ok(0));
    /// // 2 is left as a leaf of rank 1 and is demoted.
    /// assert_eq!(tree.delete(3), Ok(1));
    /// assert_eq!(tree.delete(3), Err(Error::KeyNotFound(3)));
    /// ```
    pub fn delete(&mut self, key: Key) -> Result<usize, Error> {
        self.raw.delete(key)
    }

    /// Removes `key` from the tree, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([(1, "a")]);
    /// assert_eq!(tree.remove(1), Some("a"));
    /// assert_eq!(tree.remove(1), None);
    /// ```
    pub fn remove(&mut self, key: Key) -> Option<V> {
        self.raw.remove_entry(key).map(|(_, value)| value)
    }

    /// Returns the value stored under the smallest key.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.min(), None);
    /// tree.insert(2, "b").unwrap();
    /// tree.insert(1, "a").unwrap();
    /// assert_eq!(tree.min(), Some(&"a"));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<&V> {
        self.raw.first().map(|(_, value)| value)
    }

    /// Returns the value stored under the largest key.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn max(&self) -> Option<&V> {
        self.raw.last().map(|(_, value)| value)
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(Key, &V)> {
        self.raw.first()
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(Key, &V)> {
        self.raw.last()
    }

    /// Returns every key in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([(3, "c"), (1, "a"), (2, "b")]);
    /// assert_eq!(tree.keys_to_vec(), [1, 2, 3]);
    /// assert!(AvlTree::<()>::new().keys_to_vec().is_empty());
    /// ```
    #[doc(alias = "keys_to_array")]
    #[must_use]
    pub fn keys_to_vec(&self) -> Vec<Key> {
        self.keys().collect()
    }

    /// Returns every value, ordered by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([(3, "c"), (1, "a"), (2, "b")]);
    /// assert_eq!(tree.values_to_vec(), [&"a", &"b", &"c"]);
    /// ```
    #[doc(alias = "info_to_array")]
    #[must_use]
    pub fn values_to_vec(&self) -> Vec<&V> {
        self.values().collect()
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([(3, "c"), (1, "a")]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some((1, &"a")));
    /// assert_eq!(iter.next_back(), Some((3, &"c")));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        let (forest, header) = self.raw.parts();
        Iter {
            forest,
            front: header.min,
            back: header.max,
            remaining: self.len(),
        }
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the tree, in order by key.
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }
}

/// An iterator over the entries of an `AvlTree`.
///
/// This `struct` is created by the [`iter`] method on [`AvlTree`].
///
/// [`iter`]: AvlTree::iter
pub struct Iter<'a, V> {
    forest: &'a Forest<V>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.forest.successor(handle);
        let node = self.forest.node(handle);
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.forest.predecessor(handle);
        let node = self.forest.node(handle);
        Some((node.key(), node.value()))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<V: fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the keys of an `AvlTree`.
///
/// This `struct` is created by the [`keys`] method on [`AvlTree`].
///
/// [`keys`]: AvlTree::keys
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Iterator for Keys<'_, V> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Keys<'_, V> {
    fn next_back(&mut self) -> Option<Key> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> FusedIterator for Keys<'_, V> {}

/// An iterator over the values of an `AvlTree`.
///
/// This `struct` is created by the [`values`] method on [`AvlTree`].
///
/// [`values`]: AvlTree::values
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Values<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}

/// An owning iterator over the entries of an `AvlTree`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`AvlTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<V> {
    inner: alloc::vec::IntoIter<(Key, V)>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Key, V);

    fn next(&mut self) -> Option<(Key, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<(Key, V)> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> IntoIterator for AvlTree<V> {
    type Item = (Key, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(mut self) -> IntoIter<V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a AvlTree<V> {
    type Item = (Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for AvlTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for AvlTree<V> {
    fn clone(&self) -> Self {
        AvlTree { raw: self.raw.clone() }
    }
}

impl<V: PartialEq> PartialEq for AvlTree<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for AvlTree<V> {}

/// Builds a tree from entries. Later duplicates of a key are dropped.
impl<V> FromIterator<(Key, V)> for AvlTree<V> {
    fn from_iter<T: IntoIterator<Item = (Key, V)>>(iter: T) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

/// Inserts entries. Entries whose key is already present are dropped.
impl<V> Extend<(Key, V)> for AvlTree<V> {
    fn extend<T: IntoIterator<Item = (Key, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            let _ = self.insert(key, value);
        }
    }
}

impl<V, const N: usize> From<[(Key, V); N]> for AvlTree<V> {
    /// Converts a `[(Key, V); N]` into an `AvlTree<V>`.
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let tree1 = AvlTree::from([(1, 2), (3, 4)]);
    /// let tree2: AvlTree<_> = [(1, 2), (3, 4)].into();
    /// assert_eq!(tree1, tree2);
    /// ```
    fn from(arr: [(Key, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn iterators_meet_in_the_middle() {
        let tree: AvlTree<Key> = (0..10).map(|k| (k, k)).collect();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 10);
        assert_eq!(iter.next(), Some((0, &0)));
        assert_eq!(iter.next_back(), Some((9, &9)));
        let rest: Vec<Key> = iter.by_ref().map(|(k, _)| k).collect();
        assert_eq!(rest, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn keys_and_values_reverse() {
        let tree = AvlTree::from([(2, 'b'), (1, 'a'), (3, 'c')]);
        assert_eq!(tree.keys().rev().collect::<Vec<_>>(), [3, 2, 1]);
        assert_eq!(tree.values().rev().collect::<Vec<_>>(), [&'c', &'b', &'a']);
    }

    #[test]
    fn into_iter_is_sorted() {
        let tree = AvlTree::from([(5, "e"), (1, "a"), (3, "c")]);
        let entries: Vec<_> = tree.into_iter().collect();
        assert_eq!(entries, [(1, "a"), (3, "c"), (5, "e")]);
    }

    #[test]
    fn from_iter_keeps_first_duplicate() {
        let tree: AvlTree<&str> = [(1, "first"), (1, "second")].into_iter().collect();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.search(1), Some(&"first"));
    }

    #[test]
    fn debug_formats_as_map() {
        let tree = AvlTree::from([(2, "b"), (1, "a")]);
        assert_eq!(format!("{tree:?}"), r#"{1: "a", 2: "b"}"#);
        assert_eq!(format!("{:?}", tree.iter()), r#"[(1, "a"), (2, "b")]"#);
    }

    #[test]
    fn clone_is_independent() {
        let mut tree = AvlTree::from([(1, 10), (2, 20)]);
        let copy = tree.clone();
        tree.insert(3, 30).unwrap();
        assert_eq!(copy.len(), 2);
        assert_ne!(tree, copy);
        tree.remove(3);
        assert_eq!(tree, copy);
    }

    #[test]
    fn clear_resets_everything() {
        let mut tree = AvlTree::from([(1, 10), (2, 20)]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.rank(), -1);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.insert(4, 40), Ok(0));
    }
}
