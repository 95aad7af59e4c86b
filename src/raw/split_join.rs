use super::forest::Forest;
use super::handle::Handle;
use super::node::{Header, Side};
use super::raw_avl_tree::RawAvlTree;
use crate::Key;

/// `|rank(a) - rank(b)| + 1`, the number of spine nodes a join visits.
fn join_cost(receiver: i32, other: i32) -> usize {
    receiver.abs_diff(other) as usize + 1
}

impl<V> Forest<V> {
    /// Joins the tree of `header`, the detached node `connector` and the tree `other` into one tree
    /// described by `header`.
    ///
    /// Every key of `other` must lie on the same side of every key of `header`, with the connector
    /// key between them. Returns `|rank(header) - rank(other)| + 1`, where an empty tree has rank -1.
    pub(crate) fn join(&mut self, header: &mut Header, connector: Handle, other: Header) -> usize {
        let receiver_rank = self.rank(header.root);
        let other_rank = self.rank(other.root);
        let cost = join_cost(receiver_rank, other_rank);
        let key = self.key(connector);

        let (low, high) = match (header.root, other.root) {
            (None, None) => {
                self.reset_leaf(connector);
                *header = Header {
                    root: Some(connector),
                    min: Some(connector),
                    max: Some(connector),
                };
                return cost;
            }
            (None, Some(_)) | (Some(_), None) => {
                if header.is_empty() {
                    *header = other;
                }
                log::trace!("joining key {key} into a tree of rank {}", receiver_rank.max(other_rank));
                self.insert_node(header, connector)
                    .expect("`Forest::join()` - connector key is already present!");
                return cost;
            }
            (Some(root), Some(_)) if key > self.key(root) => (*header, other),
            (Some(_), Some(_)) => (other, *header),
        };

        let low_rank = self.rank(low.root);
        let high_rank = self.rank(high.root);
        self.reset_leaf(connector);
        *header = Header {
            root: None,
            min: low.min,
            max: high.max,
        };

        if low_rank == high_rank {
            self.attach(header, None, Side::Left, Some(connector));
            self.attach(header, Some(connector), Side::Left, low.root);
            self.attach(header, Some(connector), Side::Right, high.root);
            self.node_mut(connector).set_rank(low_rank + 1);
            self.update_size(connector);
            log::trace!("joined key {key} as the new root of rank {}", low_rank + 1);
            return cost;
        }

        // Walk down the taller tree's spine facing the shorter tree.
        let (tall, short, inward) = if low_rank > high_rank {
            (low, high, Side::Right)
        } else {
            (high, low, Side::Left)
        };
        let short_rank = self.rank(short.root);
        header.root = tall.root;

        let mut parent = None;
        let mut current = tall.root;
        while self.rank(current) > short_rank {
            parent = current;
            current = current.and_then(|h| self.child(h, inward));
        }

        log::trace!("splicing key {key} into the {inward:?} spine at rank {}", self.rank(current));
        self.attach(header, parent, inward, Some(connector));
        // `current` holds tall-tree keys, so it hangs opposite the short tree.
        self.attach(header, Some(connector), inward.opposite(), current);
        self.attach(header, Some(connector), inward, short.root);
        self.node_mut(connector).set_rank(short_rank + 1);

        self.update_sizes_upward(Some(connector));
        self.rebalance(header, parent);
        cost
    }

    fn reset_leaf(&mut self, handle: Handle) {
        let node = self.node_mut(handle);
        node.set_parent(None);
        node.set_left(None);
        node.set_right(None);
        node.set_rank(0);
        node.set_size(1);
    }

    /// Detaches the subtree hanging at `side` of `handle` as a tree of its own, extremes unset.
    fn detach_child(&mut self, handle: Handle, side: Side) -> Header {
        let child = self.child(handle, side);
        self.node_mut(handle).set_child(side, None);
        if let Some(child) = child {
            self.node_mut(child).set_parent(None);
        }
        Header {
            root: child,
            min: None,
            max: None,
        }
    }

    /// Splits the tree of `header` around `pivot` into the trees of keys below and above it.
    ///
    /// The pivot node is left detached for the caller to reclaim. Returns both headers and the
    /// summed cost of the joins performed.
    pub(crate) fn split(&mut self, header: Header, pivot: Handle) -> (Header, Header, usize) {
        let pivot_key = self.key(pivot);

        // Extremes are known up front; the folds below only build structure.
        let lower_extremes = (header.min, self.predecessor(pivot));
        let upper_extremes = (self.successor(pivot), header.max);

        let mut lower = self.detach_child(pivot, Side::Left);
        let mut upper = self.detach_child(pivot, Side::Right);
        let mut ancestor = self.parent(pivot);
        self.node_mut(pivot).set_parent(None);
        let mut cost = 0;

        while let Some(current) = ancestor {
            ancestor = self.parent(current);
            if self.key(current) < pivot_key {
                let subtree = self.detach_child(current, Side::Left);
                log::trace!("folding key {} into the lower tree", self.key(current));
                cost += self.join(&mut lower, current, subtree);
            } else {
                let subtree = self.detach_child(current, Side::Right);
                log::trace!("folding key {} into the upper tree", self.key(current));
                cost += self.join(&mut upper, current, subtree);
            }
        }

        if lower.is_empty() {
            lower = Header::EMPTY;
        } else {
            (lower.min, lower.max) = lower_extremes;
        }
        if upper.is_empty() {
            upper = Header::EMPTY;
        } else {
            (upper.min, upper.max) = upper_extremes;
        }

        log::debug!(
            "split at key {pivot_key}: {} below, {} above, join cost {cost}",
            self.size(lower.root),
            self.size(upper.root)
        );
        (lower, upper, cost)
    }
}

impl<V> RawAvlTree<V> {
    /// Splits the tree around `key`, returning the lower tree, the pivot entry and the upper tree.
    ///
    /// Gives the tree back unchanged if `key` is absent.
    pub(crate) fn split(self, key: Key) -> Result<(Self, (Key, V), Self), Self> {
        let (mut forest, header) = self.into_parts();
        let Some(pivot) = forest.find(&header, key) else {
            return Err(Self::from_parts(forest, header));
        };

        let (mut lower, mut upper, _) = forest.split(header, pivot);
        let entry = forest.take(pivot).into_entry();

        // The larger half keeps the arena; the smaller one moves out.
        if forest.size(lower.root) >= forest.size(upper.root) {
            let moved = forest.extract(&mut upper);
            Ok((Self::from_parts(forest, lower), entry, Self::from_parts(moved, upper)))
        } else {
            let moved = forest.extract(&mut lower);
            Ok((Self::from_parts(moved, lower), entry, Self::from_parts(forest, upper)))
        }
    }

    /// Joins the connector entry and `other` into `self`, returning the join cost.
    ///
    /// The caller guarantees that `key` separates the keys of `self` from the keys of `other`.
    pub(crate) fn join(&mut self, key: Key, value: V, other: Self) -> usize {
        let (forest, header) = core::mem::replace(self, Self::new()).into_parts();
        let (other_forest, other_header) = other.into_parts();

        // The smaller arena moves into the larger one.
        let (mut forest, mut receiver, other_header) = if forest.len() >= other_forest.len() {
            let mut base = forest;
            let mut moved = other_header;
            base.absorb(other_forest, &mut moved);
            (base, header, moved)
        } else {
            let mut base = other_forest;
            let mut moved = header;
            base.absorb(forest, &mut moved);
            (base, moved, other_header)
        };

        let connector = forest.alloc(key, value);
        let cost = forest.join(&mut receiver, connector, other_header);
        log::debug!("joined key {key} with cost {cost}");
        *self = Self::from_parts(forest, receiver);
        cost
    }
}
