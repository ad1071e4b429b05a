//! Errors reported by the structural self-checks.

use thiserror::Error;

/// A broken structural invariant, as reported by `check_invariants`.
///
/// None of these can be produced through the public mutation API. They show up when a tree is
/// adopted from a [`Subtree`][crate::Subtree] that was never a valid search tree, or when the
/// tree itself has a bug.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    /// The root node has a parent link.
    #[error("root node has a parent")]
    RootHasParent,
    /// A link points at a vacant arena slot.
    #[error("node links to a vacant slot")]
    DanglingLink,
    /// A child's parent link does not point back at the node owning it.
    #[error("child does not point back at its parent")]
    ParentMismatch,
    /// A node's cached height disagrees with its children.
    #[error("cached height {cached} but subtree height is {actual}")]
    StaleHeight {
        /// Height stored in the node.
        cached: usize,
        /// Height recomputed from the children.
        actual: usize,
    },
    /// An in-order walk found a value smaller than its predecessor.
    #[error("values out of order")]
    OutOfOrder,
    /// Some allocated nodes can't be reached from the root.
    #[error("{reachable} nodes reachable from the root but {allocated} allocated")]
    LengthMismatch {
        /// Nodes found by walking down from the root.
        reachable: usize,
        /// Nodes held by the tree's arena.
        allocated: usize,
    },
    /// A node's subtrees differ in height by more than one.
    #[error("balance factor {balance_factor} outside of [-1, 1]")]
    Unbalanced {
        /// Right subtree height minus left subtree height.
        balance_factor: isize,
    },
}
