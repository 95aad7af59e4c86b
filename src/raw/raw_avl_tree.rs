use super::forest::Forest;
use super::handle::Handle;
use super::node::{Header, Side, is_real};
use super::search::Located;
use crate::{Error, Key};

/// The core AVL tree backing `AvlTree`.
#[derive(Clone)]
pub(crate) struct RawAvlTree<V> {
    /// Arena storing every node of the tree.
    forest: Forest<V>,
    /// Root and cached extremes.
    header: Header,
}

impl<V> RawAvlTree<V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            forest: Forest::new(),
            header: Header::EMPTY,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            forest: Forest::with_capacity(capacity),
            header: Header::EMPTY,
        }
    }

    pub(crate) fn from_parts(forest: Forest<V>, header: Header) -> Self {
        Self { forest, header }
    }

    pub(crate) fn into_parts(self) -> (Forest<V>, Header) {
        (self.forest, self.header)
    }

    pub(crate) fn parts(&self) -> (&Forest<V>, &Header) {
        (&self.forest, &self.header)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.forest.capacity()
    }

    /// Number of entries, read from the root's subtree size.
    pub(crate) fn len(&self) -> usize {
        self.forest.size(self.header.root)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Rank of the root, -1 for an empty tree.
    pub(crate) fn rank(&self) -> i32 {
        self.forest.rank(self.header.root)
    }

    pub(crate) fn clear(&mut self) {
        self.forest.clear();
        self.header = Header::EMPTY;
    }

    pub(crate) fn get(&self, key: Key) -> Option<&V> {
        let handle = self.forest.find(&self.header, key)?;
        Some(self.forest.node(handle).value())
    }

    pub(crate) fn get_mut(&mut self, key: Key) -> Option<&mut V> {
        let handle = self.forest.find(&self.header, key)?;
        Some(self.forest.node_mut(handle).value_mut())
    }

    pub(crate) fn entry(&self, handle: Handle) -> (Key, &V) {
        let node = self.forest.node(handle);
        (node.key(), node.value())
    }

    pub(crate) fn first(&self) -> Option<(Key, &V)> {
        self.header.min.map(|h| self.entry(h))
    }

    pub(crate) fn last(&self) -> Option<(Key, &V)> {
        self.header.max.map(|h| self.entry(h))
    }

    pub(crate) fn select(&self, index: usize) -> Option<(Key, &V)> {
        self.forest.select(&self.header, index).map(|h| self.entry(h))
    }

    pub(crate) fn position(&self, key: Key) -> Option<usize> {
        self.forest.position(&self.header, key)
    }

    /// Inserts `key`, returning the rebalance operation count.
    pub(crate) fn insert(&mut self, key: Key, value: V) -> Result<usize, Error> {
        let handle = self.forest.alloc(key, value);
        self.forest.insert_node(&mut self.header, handle).map_err(|handle| {
            drop(self.forest.take(handle));
            Error::DuplicateKey(key)
        })
    }

    /// Deletes `key`, returning the rebalance operation count.
    pub(crate) fn delete(&mut self, key: Key) -> Result<usize, Error> {
        let handle = self.forest.find(&self.header, key).ok_or(Error::KeyNotFound(key))?;
        let count = self.forest.unlink(&mut self.header, handle);
        drop(self.forest.take(handle));
        Ok(count)
    }

    /// Deletes `key`, returning its entry.
    pub(crate) fn remove_entry(&mut self, key: Key) -> Option<(Key, V)> {
        let handle = self.forest.find(&self.header, key)?;
        self.forest.unlink(&mut self.header, handle);
        Some(self.forest.take(handle).into_entry())
    }

    /// Drains all entries in key order.
    pub(crate) fn drain_to_vec(&mut self) -> alloc::vec::Vec<(Key, V)> {
        let order = self.forest.in_order(&self.header);
        let entries = order.into_iter().map(|h| self.forest.take(h).into_entry()).collect();
        self.clear();
        entries
    }
}

impl<V> Forest<V> {
    /// Hangs the detached node `handle` at its key's position in the tree of `header` and restores
    /// the rank invariant.
    ///
    /// Returns the rebalance operation count, or gives `handle` back if its key is already present.
    pub(crate) fn insert_node(&mut self, header: &mut Header, handle: Handle) -> Result<usize, Handle> {
        let key = self.key(handle);
        let (parent, side) = match self.locate(header, key) {
            Located::Found(_) => return Err(handle),
            Located::Vacant { parent, side } => (parent, side),
        };

        {
            let node = self.node_mut(handle);
            node.set_rank(0);
            node.set_size(1);
            node.set_left(None);
            node.set_right(None);
        }
        self.attach(header, parent, side, Some(handle));

        if header.min.is_none_or(|min| key < self.key(min)) {
            header.min = Some(handle);
        }
        if header.max.is_none_or(|max| key > self.key(max)) {
            header.max = Some(handle);
        }

        self.update_sizes_upward(parent);
        Ok(self.rebalance(header, parent))
    }

    /// Takes `handle` out of the tree of `header` and restores the rank invariant.
    ///
    /// The node stays allocated; the caller reclaims it. Returns the rebalance operation count.
    pub(crate) fn unlink(&mut self, header: &mut Header, handle: Handle) -> usize {
        let (left, right) = (self.left(handle), self.right(handle));
        if header.root == Some(handle) && !is_real(left) && !is_real(right) {
            *header = Header::EMPTY;
            return 0;
        }

        if header.min == Some(handle) {
            header.min = self.successor(handle);
        }
        if header.max == Some(handle) {
            header.max = self.predecessor(handle);
        }

        let parent = self.parent(handle);
        let start = match (left, right) {
            (None, None) => {
                self.replace(header, handle, None);
                parent
            }
            (Some(child), None) | (None, Some(child)) => {
                self.replace(header, handle, Some(child));
                parent
            }
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                let successor_parent = self.parent(successor);
                self.replace(header, successor, self.right(successor));

                // Re-read: the successor may have been the right child.
                let (left, right) = (self.left(handle), self.right(handle));
                let rank = self.rank(Some(handle));
                self.replace(header, handle, Some(successor));
                self.node_mut(successor).set_rank(rank);
                self.attach(header, Some(successor), Side::Left, left);
                self.attach(header, Some(successor), Side::Right, right);

                if successor_parent == Some(handle) {
                    Some(successor)
                } else {
                    successor_parent
                }
            }
        };

        {
            let node = self.node_mut(handle);
            node.set_parent(None);
            node.set_left(None);
            node.set_right(None);
        }

        self.update_sizes_upward(start);
        self.rebalance(header, start)
    }
}
