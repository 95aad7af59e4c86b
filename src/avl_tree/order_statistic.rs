use super::AvlTree;
use crate::Key;

impl<V> AvlTree<V> {
    /// Returns the entry at zero-based position `index` in key order, or `None` if `index` is out
    /// of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([(30, "c"), (10, "a"), (20, "b")]);
    /// assert_eq!(tree.select(0), Some((10, &"a")));
    /// assert_eq!(tree.select(2), Some((30, &"c")));
    /// assert_eq!(tree.select(3), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n), guided by the cached subtree sizes.
    #[doc(alias = "get_by_rank")]
    #[must_use]
    pub fn select(&self, index: usize) -> Option<(Key, &V)> {
        self.raw.select(index)
    }

    /// Returns the zero-based position of `key` in key order, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([(30, "c"), (10, "a"), (20, "b")]);
    /// assert_eq!(tree.position(20), Some(1));
    /// assert_eq!(tree.position(25), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn position(&self, key: Key) -> Option<usize> {
        self.raw.position(key)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn select_follows_deletes() {
        let mut tree: AvlTree<Key> = (0..100).map(|k| (k * 2, k)).collect();
        for key in (0..200).step_by(4) {
            tree.delete(key).unwrap();
        }
        // Remaining keys are 2, 6, 10, ...
        for index in 0..tree.len() {
            let (key, _) = tree.select(index).unwrap();
            assert_eq!(key, 2 + 4 * index as Key);
            assert_eq!(tree.position(key), Some(index));
        }
        assert_eq!(tree.select(tree.len()), None);
    }

    #[test]
    fn empty_tree_has_no_positions() {
        let tree: AvlTree<()> = AvlTree::new();
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.position(0), None);
    }
}
