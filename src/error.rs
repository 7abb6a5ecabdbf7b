use thiserror::Error;

/// A red-black tree invariant that does not hold
///
/// Returned by [`RBTree::validate`](crate::RBTree::validate). A correctly implemented tree never
/// produces any of these, so seeing one means the tree's structure was corrupted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("the root node is red")]
    RedRoot,
    #[error("the root node has a parent link")]
    RootHasParent,
    #[error("a child's parent link does not point back at the node that owns it")]
    BrokenParentLink,
    #[error("in-order traversal is not strictly increasing at position {position}")]
    OutOfOrder { position: usize },
    #[error("a red node has a red child (depth {depth})")]
    ConsecutiveReds { depth: usize },
    #[error("unbalanced blacks: {left} on the left and {right} on the right (depth {depth})")]
    UnbalancedBlacks { left: usize, right: usize, depth: usize },
    #[error("tree reports {reported} values but {reachable} nodes are reachable from the root")]
    SizeMismatch { reported: usize, reachable: usize },
}
