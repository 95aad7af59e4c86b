use super::AvlTree;
use crate::Key;

impl<V> AvlTree<V> {
    /// Splits the tree around `key`, returning the trees of the keys below and above it. The entry
    /// stored under `key` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let tree: AvlTree<_> = (1..=7).map(|k| (k, k * 10)).collect();
    /// let (lower, upper) = tree.split(4);
    /// assert_eq!(lower.keys_to_vec(), [1, 2, 3]);
    /// assert_eq!(upper.keys_to_vec(), [5, 6, 7]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) rebalancing work. Each half then owns its nodes: the smaller half is moved into
    /// storage of its own, which costs O(length of the smaller half). The total is therefore
    /// O(log n + min(lower, upper)), not O(log n).
    #[must_use]
    pub fn split(self, key: Key) -> (Self, Self) {
        let (lower, _, upper) = self.split_entry(key);
        (lower, upper)
    }

    /// Splits the tree around `key` like [`split`](AvlTree::split), also returning the entry stored
    /// under `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([(1, "a"), (2, "b"), (3, "c")]);
    /// let (mut lower, (key, value), upper) = tree.split_entry(2);
    /// assert_eq!((key, value), (2, "b"));
    ///
    /// lower.join(key, value, upper);
    /// assert_eq!(lower.keys_to_vec(), [1, 2, 3]);
    /// ```
    #[must_use]
    pub fn split_entry(self, key: Key) -> (Self, (Key, V), Self) {
        match self.raw.split(key) {
            Ok((lower, entry, upper)) => (AvlTree { raw: lower }, entry, AvlTree { raw: upper }),
            Err(_) => panic!("`AvlTree::split()` - `key` is not present in the tree!"),
        }
    }

    /// Joins `self`, the connecting entry `(key, value)` and `other` into one tree stored in
    /// `self`.
    ///
    /// `other` may hold the keys either below or above those of `self`; `key` must lie strictly
    /// between the two trees. Either tree may be empty, in which case `key` must lie outside the
    /// other tree's key range.
    ///
    /// Returns the join cost `|rank(self) - rank(other)| + 1`, where an empty tree has rank -1.
    ///
    /// # Panics
    ///
    /// Panics if the keys are not ordered as described above. The check is O(1) against the
    /// cached extremes.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let mut lower = AvlTree::from([(1, "a")]);
    /// let upper = AvlTree::from([(3, "c")]);
    /// assert_eq!(lower.join(2, "b", upper), 1);
    /// assert_eq!(lower.keys_to_vec(), [1, 2, 3]);
    /// assert_eq!(lower.rank(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(|rank(self) - rank(other)| + 1) rebalancing work. The nodes of the smaller tree are then
    /// appended to the larger tree's storage, which costs O(length of the smaller tree). The
    /// returned cost counts only the rebalancing work.
    pub fn join(&mut self, key: Key, value: V, other: Self) -> usize {
        assert!(
            self.joinable(key, &other),
            "`AvlTree::join()` - `key` does not separate the two trees!"
        );
        self.raw.join(key, value, other.raw)
    }

    fn joinable(&self, key: Key, other: &Self) -> bool {
        let bounds = |tree: &Self| tree.first_key_value().zip(tree.last_key_value()).map(|((min, _), (max, _))| (min, max));
        match (bounds(self), bounds(other)) {
            (None, None) => true,
            (Some((min, max)), None) | (None, Some((min, max))) => key < min || key > max,
            (Some((self_min, self_max)), Some((other_min, other_max))) => {
                (self_max < key && key < other_min) || (other_max < key && key < self_min)
            }
        }
    }
}
