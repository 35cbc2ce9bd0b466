use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError<K> {
    /// Carries the key that was searched for.
    #[error("node with key {0} not found in the tree")]
    KeyNotFound(K),
}

/// A broken red-black or search-tree property, as reported by
/// [`RedBlackTree::validate`](crate::RedBlackTree::validate).
///
/// Nodes are identified by their arena slot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root node at slot {slot} is red")]
    RedRoot { slot: usize },
    #[error("red node at slot {slot} has a red child")]
    RedChildOfRed { slot: usize },
    #[error("black height differs below slot {slot}: {left} on the left, {right} on the right")]
    BlackHeightMismatch {
        slot: usize,
        left: usize,
        right: usize,
    },
    #[error("key at slot {slot} is smaller than its in-order predecessor")]
    OutOfOrder { slot: usize },
    #[error("parent link of slot {slot} does not point at the node that owns it")]
    BrokenParentLink { slot: usize },
    #[error("tree records {recorded} nodes but {reachable} are reachable from the root")]
    LengthMismatch { recorded: usize, reachable: usize },
}
