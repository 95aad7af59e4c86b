mod arena;
mod forest;
mod handle;
mod node;
mod raw_avl_tree;
mod rebalance;
mod search;
mod split_join;

pub(crate) use forest::Forest;
pub(crate) use node::Link;
pub(crate) use raw_avl_tree::RawAvlTree;
