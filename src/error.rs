use crate::Key;

/// Errors reported by [`AvlTree`](crate::AvlTree) mutations.
///
/// Both variants leave the tree unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// [`insert`](crate::AvlTree::insert) was given a key that is already present.
    #[error("key {0} is already present in the tree")]
    DuplicateKey(Key),
    /// [`delete`](crate::AvlTree::delete) was given a key that is not present.
    #[error("key {0} is not present in the tree")]
    KeyNotFound(Key),
}
