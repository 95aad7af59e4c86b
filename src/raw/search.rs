use core::cmp::Ordering;

use alloc::vec::Vec;

use super::forest::{Forest, Stack};
use super::handle::Handle;
use super::node::{Header, Link, Side};
use crate::Key;

/// Result of descending a tree by key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Located {
    /// A real node holds the key.
    Found(Handle),
    /// The descent stopped at an absent child of `parent` (or at an empty tree).
    Vacant { parent: Link, side: Side },
}

impl<V> Forest<V> {
    /// Descends from the root of `header`, comparing keys.
    pub(crate) fn locate(&self, header: &Header, key: Key) -> Located {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = header.root;

        while let Some(handle) = current {
            side = match key.cmp(&self.key(handle)) {
                Ordering::Equal => return Located::Found(handle),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            parent = Some(handle);
            current = self.child(handle, side);
        }

        Located::Vacant { parent, side }
    }

    pub(crate) fn find(&self, header: &Header, key: Key) -> Option<Handle> {
        match self.locate(header, key) {
            Located::Found(handle) => Some(handle),
            Located::Vacant { .. } => None,
        }
    }

    /// In-order predecessor within the tree containing `handle`.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.left(handle) {
            return Some(self.rightmost(left));
        }
        self.climb(handle, Side::Left)
    }

    /// In-order successor within the tree containing `handle`.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.right(handle) {
            return Some(self.leftmost(right));
        }
        self.climb(handle, Side::Right)
    }

    // Climbs while the node hangs on `from` side of its parent, returning the first ancestor reached
    // from the other side.
    fn climb(&self, handle: Handle, from: Side) -> Option<Handle> {
        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(p) = parent {
            if self.child(p, from) != Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.parent(p);
        }
        None
    }

    /// Collects the handles of the tree in key order.
    pub(crate) fn in_order(&self, header: &Header) -> Vec<Handle> {
        let mut out = Vec::with_capacity(self.size(header.root));
        let mut stack: Stack<Handle> = Stack::new();
        let mut current = header.root;

        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.left(handle);
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            out.push(handle);
            current = self.right(handle);
        }

        out
    }

    /// Returns the node at zero-based position `index` in key order.
    pub(crate) fn select(&self, header: &Header, index: usize) -> Option<Handle> {
        let mut remaining = index;
        let mut current = header.root;

        while let Some(handle) = current {
            let left = self.left(handle);
            let left_size = self.size(left);
            match remaining.cmp(&left_size) {
                Ordering::Less => current = left,
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = self.right(handle);
                }
            }
        }

        None
    }

    /// Returns the zero-based position of `key` in key order.
    pub(crate) fn position(&self, header: &Header, key: Key) -> Option<usize> {
        let mut before = 0;
        let mut current = header.root;

        while let Some(handle) = current {
            match key.cmp(&self.key(handle)) {
                Ordering::Less => current = self.left(handle),
                Ordering::Equal => return Some(before + self.size(self.left(handle))),
                Ordering::Greater => {
                    before += self.size(self.left(handle)) + 1;
                    current = self.right(handle);
                }
            }
        }

        None
    }
}
