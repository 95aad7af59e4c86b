//! A rank-balanced AVL tree over integer keys with logarithmic split and join.
//!
//! This crate provides [`AvlTree`], an ordered map from [`Key`] (`i64`) to any value type. Besides
//! the usual map operations it exposes the balancing work it performs and two structural
//! operations:
//!
//! - [`split`](AvlTree::split) - Partition a tree around a pivot key into two trees
//! - [`join`](AvlTree::join) - Merge two trees and a connecting entry into one
//!
//! # Example
//!
//! ```
//! use avl_rank_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [10, 20, 30, 40, 50] {
//!     tree.insert(key, key * 100).unwrap();
//! }
//!
//! assert_eq!(tree.search(30), Some(&3000));
//! assert_eq!(tree.keys_to_vec(), [10, 20, 30, 40, 50]);
//! assert_eq!(tree.min(), Some(&1000));
//!
//! // Split around 30, then put everything back together.
//! let (mut lower, upper) = tree.split(30);
//! assert_eq!(lower.keys_to_vec(), [10, 20]);
//! assert_eq!(upper.keys_to_vec(), [40, 50]);
//!
//! lower.join(30, 3000, upper);
//! assert_eq!(lower.keys_to_vec(), [10, 20, 30, 40, 50]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Observable balancing** - [`insert`](AvlTree::insert) and [`delete`](AvlTree::delete) report
//!   how many promotions, demotions and rotations they performed
//! - **O(1) extremes and size** - Cached minimum, maximum and subtree sizes
//! - **Order statistics** - [`select`](AvlTree::select) and [`position`](AvlTree::position) in
//!   O(log n) via the stored subtree sizes
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to their parent and children by index, so no node owns
//! another. Each node stores a *rank* (its height) and the rank difference to each child is kept in
//! `{1, 2}`, never `2` on both sides.
//!
//! Split and join rebalance in time logarithmic in the tree size. Afterwards the smaller tree's
//! nodes are moved so that every tree owns its storage, which is linear in that smaller tree.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod avl_tree;

pub use avl_tree::AvlTree;
pub use error::Error;

/// The key type stored by [`AvlTree`].
pub type Key = i64;
