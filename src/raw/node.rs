use super::handle::Handle;
use crate::Key;

/// A child or parent link. `None` is the sentinel for an absent child.
pub(crate) type Link = Option<Handle>;

/// Rank reported for an absent child.
pub(crate) const ABSENT_RANK: i32 = -1;

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A real node: one key/value pair plus its balance bookkeeping.
#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    key: Key,
    value: V,
    rank: i32,
    // Number of real nodes in the subtree rooted here.
    size: usize,
    parent: Link,
    left: Link,
    right: Link,
}

impl<V> Node<V> {
    /// Creates a detached leaf: rank 0, size 1, both children absent.
    pub(crate) const fn new(key: Key, value: V) -> Self {
        Self {
            key,
            value,
            rank: 0,
            size: 1,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> Key {
        self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub(crate) fn into_entry(self) -> (Key, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) const fn rank(&self) -> i32 {
        self.rank
    }

    #[inline]
    pub(crate) fn set_rank(&mut self, rank: i32) {
        self.rank = rank;
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Link {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Link) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Link {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Link) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn right(&self) -> Link {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Link) {
        self.right = right;
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Rewrites every link after the owning arena was appended at slot `base`.
    pub(crate) fn offset_links(&mut self, base: usize) {
        self.parent = self.parent.map(|h| h.offset(base));
        self.left = self.left.map(|h| h.offset(base));
        self.right = self.right.map(|h| h.offset(base));
    }
}

/// Root and cached extremes of one tree living in a [`Forest`](super::forest::Forest).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Header {
    pub(crate) root: Link,
    pub(crate) min: Link,
    pub(crate) max: Link,
}

impl Header {
    pub(crate) const EMPTY: Self = Self {
        root: None,
        min: None,
        max: None,
    };

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn offset(&mut self, base: usize) {
        self.root = self.root.map(|h| h.offset(base));
        self.min = self.min.map(|h| h.offset(base));
        self.max = self.max.map(|h| h.offset(base));
    }
}

/// Returns true if `link` refers to a real node rather than the absent sentinel.
#[inline]
pub(crate) const fn is_real(link: Link) -> bool {
    link.is_some()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_detached_leaf() {
        let node = Node::new(7, "seven");
        assert_eq!(node.key(), 7);
        assert_eq!(*node.value(), "seven");
        assert_eq!(node.rank(), 0);
        assert_eq!(node.size(), 1);
        assert!(!is_real(node.parent()));
        assert!(!is_real(node.left()));
        assert!(!is_real(node.right()));
    }

    #[test]
    fn child_by_side() {
        let mut node = Node::new(1, ());
        let h = Handle::from_index(3);
        node.set_child(Side::Right, Some(h));
        assert_eq!(node.child(Side::Right), Some(h));
        assert_eq!(node.child(Side::Left), None);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn offset_links_shifts_every_link() {
        let mut node = Node::new(1, ());
        node.set_parent(Some(Handle::from_index(0)));
        node.set_left(Some(Handle::from_index(1)));
        node.offset_links(10);
        assert_eq!(node.parent(), Some(Handle::from_index(10)));
        assert_eq!(node.left(), Some(Handle::from_index(11)));
        assert_eq!(node.right(), None);
    }
}
