use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{ABSENT_RANK, Header, Link, Node, Side};
use crate::Key;

/// Explicit stack for walks bounded by the tree height.
pub(crate) type Stack<T> = SmallVec<[T; 64]>;

/// Node storage shared by every tree that takes part in one split or join.
///
/// Trees are described by a [`Header`]; all structural operations take the header of the tree they
/// mutate so that several trees can be rearranged inside one forest without moving nodes.
#[derive(Clone)]
pub(crate) struct Forest<V> {
    nodes: Arena<Node<V>>,
}

impl<V> Forest<V> {
    pub(crate) const fn new() -> Self {
        Self { nodes: Arena::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of live nodes across every tree in the forest.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn alloc(&mut self, key: Key, value: V) -> Handle {
        self.nodes.alloc(Node::new(key, value))
    }

    pub(crate) fn take(&mut self, handle: Handle) -> Node<V> {
        self.nodes.take(handle)
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<V> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> Key {
        self.node(handle).key()
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Link {
        self.node(handle).parent()
    }

    #[inline]
    pub(crate) fn left(&self, handle: Handle) -> Link {
        self.node(handle).left()
    }

    #[inline]
    pub(crate) fn right(&self, handle: Handle) -> Link {
        self.node(handle).right()
    }

    #[inline]
    pub(crate) fn child(&self, handle: Handle, side: Side) -> Link {
        self.node(handle).child(side)
    }

    /// Rank of a link; an absent child has rank -1.
    #[inline]
    pub(crate) fn rank(&self, link: Link) -> i32 {
        link.map_or(ABSENT_RANK, |h| self.node(h).rank())
    }

    /// Subtree size of a link; an absent child has size 0.
    #[inline]
    pub(crate) fn size(&self, link: Link) -> usize {
        link.map_or(0, |h| self.node(h).size())
    }

    #[inline]
    pub(crate) fn promote(&mut self, handle: Handle) {
        let node = self.node_mut(handle);
        node.set_rank(node.rank() + 1);
    }

    #[inline]
    pub(crate) fn demote(&mut self, handle: Handle) {
        let node = self.node_mut(handle);
        node.set_rank(node.rank() - 1);
    }

    /// Rank differences `(rank - rank(left), rank - rank(right))`.
    #[inline]
    pub(crate) fn rank_differences(&self, handle: Handle) -> (i32, i32) {
        let node = self.node(handle);
        (node.rank() - self.rank(node.left()), node.rank() - self.rank(node.right()))
    }

    /// Returns which child slot of its parent `handle` occupies, or `None` for a root.
    pub(crate) fn side_of(&self, handle: Handle) -> Option<Side> {
        let parent = self.parent(handle)?;
        if self.left(parent) == Some(handle) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Links `child` into slot `side` of `parent` (or makes it the root of `header`).
    pub(crate) fn attach(&mut self, header: &mut Header, parent: Link, side: Side, child: Link) {
        match parent {
            Some(p) => self.node_mut(p).set_child(side, child),
            None => header.root = child,
        }
        if let Some(c) = child {
            self.node_mut(c).set_parent(parent);
        }
    }

    /// Puts `new` where `old` hangs today (same parent, same side).
    pub(crate) fn replace(&mut self, header: &mut Header, old: Handle, new: Link) {
        let parent = self.parent(old);
        let side = self.side_of(old).unwrap_or(Side::Left);
        self.attach(header, parent, side, new);
    }

    /// Recomputes the size of `handle` from its children.
    #[inline]
    pub(crate) fn update_size(&mut self, handle: Handle) {
        let size = self.size(self.left(handle)) + self.size(self.right(handle)) + 1;
        self.node_mut(handle).set_size(size);
    }

    /// Recomputes sizes from `start` up to the root.
    pub(crate) fn update_sizes_upward(&mut self, start: Link) {
        let mut current = start;
        while let Some(handle) = current {
            self.update_size(handle);
            current = self.parent(handle);
        }
    }

    pub(crate) fn leftmost(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(left) = self.left(current) {
            current = left;
        }
        current
    }

    pub(crate) fn rightmost(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(right) = self.right(current) {
            current = right;
        }
        current
    }

    /// Moves every node of `other` into `self`, rewriting the handles in `header` (a tree of
    /// `other`) so that it refers to the moved nodes.
    ///
    /// O(slots of `other`).
    pub(crate) fn absorb(&mut self, other: Self, header: &mut Header) {
        let base = self.nodes.absorb(other.nodes);
        for node in self.nodes.elements_from_mut(base) {
            node.offset_links(base);
        }
        header.offset(base);
    }

    /// Moves the tree described by `header` out into a fresh forest and rewrites `header` to point
    /// into it.
    ///
    /// O(size of the moved tree). Ranks and sizes carry over unchanged.
    pub(crate) fn extract(&mut self, header: &mut Header) -> Self {
        let Some(root) = header.root else {
            return Self::new();
        };

        let mut out = Self::with_capacity(self.size(Some(root)));
        let mut moved = Header::EMPTY;
        let mut stack: Stack<(Handle, Link, Side)> = Stack::new();
        stack.push((root, None, Side::Left));

        while let Some((old, parent, side)) = stack.pop() {
            let mut node = self.nodes.take(old);
            let (left, right) = (node.left(), node.right());
            node.set_parent(parent);
            node.set_left(None);
            node.set_right(None);

            let new = out.nodes.alloc(node);
            out.attach(&mut moved, parent, side, Some(new));
            if header.min == Some(old) {
                moved.min = Some(new);
            }
            if header.max == Some(old) {
                moved.max = Some(new);
            }

            if let Some(right) = right {
                stack.push((right, Some(new), Side::Right));
            }
            if let Some(left) = left {
                stack.push((left, Some(new), Side::Left));
            }
        }

        *header = moved;
        out
    }
}
