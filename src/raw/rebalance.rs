use super::forest::Forest;
use super::handle::Handle;
use super::node::{Header, Link, Side};

// Rebalance operation counts reported by insert and delete.
pub(crate) const PROMOTE: usize = 1;
pub(crate) const DEMOTE: usize = 1;
/// A single rotation, including the demotion of the node rotated down.
pub(crate) const ROTATION: usize = 2;
/// Promotion of the inner grandchild plus two rotations.
pub(crate) const INSERT_DOUBLE_ROTATION: usize = 5;
/// A delete-side single rotation plus the promote or demote that accompanies it.
pub(crate) const DELETE_ROTATION: usize = 3;
/// [`INSERT_DOUBLE_ROTATION`] plus the demotion of the node at the top.
pub(crate) const DELETE_DOUBLE_ROTATION: usize = 6;

impl<V> Forest<V> {
    /// Rotates the `rising` child of `node` into `node`'s position.
    ///
    /// `node` moves down to the opposite side of the risen child and is demoted by one. Both sizes
    /// are recomputed, and `header.root` follows when `node` was the root.
    pub(crate) fn rotate(&mut self, header: &mut Header, node: Handle, rising: Side) -> Handle {
        let sinking = rising.opposite();
        let risen = self
            .child(node, rising)
            .expect("`Forest::rotate()` - rotating child is absent!");
        let inner = self.child(risen, sinking);

        log::trace!("rotating key {} {:?} over key {}", self.key(risen), sinking, self.key(node));

        self.replace(header, node, Some(risen));
        self.node_mut(node).set_child(rising, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(node));
        }
        self.node_mut(risen).set_child(sinking, Some(node));
        self.node_mut(node).set_parent(Some(risen));

        self.demote(node);
        self.update_size(node);
        self.update_size(risen);
        risen
    }

    /// Restores the rank invariant walking up from `start` and returns the operation count.
    pub(crate) fn rebalance(&mut self, header: &mut Header, start: Link) -> usize {
        let mut count = 0;
        let mut current = start;

        while let Some(node) = current {
            let (left, right) = self.rank_differences(node);
            current = match (left, right) {
                (0, 1) | (1, 0) => {
                    log::trace!("promoting key {}", self.key(node));
                    self.promote(node);
                    count += PROMOTE;
                    self.parent(node)
                }
                (0, 2) => self.fix_insert(header, node, Side::Left, &mut count),
                (2, 0) => self.fix_insert(header, node, Side::Right, &mut count),
                (2, 2) => {
                    log::trace!("demoting key {}", self.key(node));
                    self.demote(node);
                    count += DEMOTE;
                    self.parent(node)
                }
                (3, 1) => self.fix_delete(header, node, Side::Right, &mut count),
                (1, 3) => self.fix_delete(header, node, Side::Left, &mut count),
                _ => None,
            };
        }

        count
    }

    /// `node` has rank difference 0 on the `tall` side and 2 on the other.
    fn fix_insert(&mut self, header: &mut Header, node: Handle, tall: Side, count: &mut usize) -> Link {
        let short = tall.opposite();
        let child = self.child(node, tall).expect("`Forest::fix_insert()` - tall child is absent!");
        let rank = self.rank(Some(child));
        let outer = rank - self.rank(self.child(child, tall));
        let inner = rank - self.rank(self.child(child, short));

        if outer == 2 {
            let grandchild = self.child(child, short).expect("`Forest::fix_insert()` - inner grandchild is absent!");
            self.promote(grandchild);
            self.rotate(header, child, short);
            self.rotate(header, node, tall);
            *count += INSERT_DOUBLE_ROTATION;
            None
        } else if inner == 2 {
            self.rotate(header, node, tall);
            *count += ROTATION;
            None
        } else {
            // Both children of `child` share its rank difference of 1. Only a join splice
            // produces this shape; the subtree grows by one rank.
            self.rotate(header, node, tall);
            self.promote(node);
            self.promote(child);
            *count += ROTATION + 2 * PROMOTE;
            self.parent(child)
        }
    }

    /// `node` has rank difference 1 on the `tall` side and 3 on the other.
    fn fix_delete(&mut self, header: &mut Header, node: Handle, tall: Side, count: &mut usize) -> Link {
        let short = tall.opposite();
        let child = self.child(node, tall).expect("`Forest::fix_delete()` - tall child is absent!");
        let rank = self.rank(Some(child));
        let outer = rank - self.rank(self.child(child, tall));
        let inner = rank - self.rank(self.child(child, short));

        if outer == 2 {
            let grandchild = self.child(child, short).expect("`Forest::fix_delete()` - inner grandchild is absent!");
            self.demote(node);
            self.promote(grandchild);
            self.rotate(header, child, short);
            self.rotate(header, node, tall);
            *count += DELETE_DOUBLE_ROTATION;
            self.parent(grandchild)
        } else if inner == 2 {
            self.demote(node);
            self.rotate(header, node, tall);
            *count += DELETE_ROTATION;
            self.parent(child)
        } else {
            self.promote(child);
            self.rotate(header, node, tall);
            *count += DELETE_ROTATION;
            None
        }
    }
}
