//! Non-owning handles for reading and walking a tree.

use std::fmt;

use crate::node::{Node, NodeId};
use crate::search::SearchTree;

/// A read-only position in a tree, as returned by lookups such as `find` or `minimum`.
///
/// A cursor is either *valid*, pointing at a node, or *invalid*, meaning the lookup found
/// nothing or the walk ran off the end of the tree. Walking an invalid cursor keeps it invalid.
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree: AvlTree<_> = [4, 2, 6].into_iter().collect();
///
/// let two = tree.find(&2);
/// assert_eq!(two.get(), Some(&2));
/// assert_eq!(two.successor().get(), Some(&4));
/// assert!(!two.predecessor().is_valid());
/// ```
pub struct Cursor<'a, T> {
    tree: &'a SearchTree<T>,
    id: Option<NodeId>,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(tree: &'a SearchTree<T>, id: Option<NodeId>) -> Self {
        Self { tree, id }
    }

    fn node(&self) -> Option<&'a Node<T>> {
        self.id.and_then(|id| self.tree.nodes().get(id))
    }

    fn step(&self, f: impl FnOnce(&Node<T>) -> Option<NodeId>) -> Self {
        Self::new(self.tree, self.node().and_then(f))
    }

    /// True iff the cursor points at a node of the tree.
    pub fn is_valid(&self) -> bool {
        self.id.map_or(false, |id| self.tree.nodes().contains(id))
    }

    /// The handle of the node under the cursor, usable with `remove` and `take`.
    pub fn id(&self) -> Option<NodeId> {
        self.node().and(self.id)
    }

    /// The value under the cursor.
    pub fn get(&self) -> Option<&'a T> {
        self.node().map(|node| &node.value)
    }

    /// Height of the subtree rooted under the cursor, 0 for an invalid cursor.
    pub fn height(&self) -> usize {
        self.node().map_or(0, |node| node.height)
    }

    /// True iff the node under the cursor has a left child.
    pub fn has_left(&self) -> bool {
        self.id().map_or(false, |id| self.tree.nodes().has_left(id))
    }

    /// True iff the node under the cursor has a right child.
    pub fn has_right(&self) -> bool {
        self.id().map_or(false, |id| self.tree.nodes().has_right(id))
    }

    /// The next node in sorted order.
    pub fn successor(&self) -> Self {
        Self::new(self.tree, self.id().and_then(|id| self.tree.successor(id)))
    }

    /// The previous node in sorted order.
    pub fn predecessor(&self) -> Self {
        Self::new(self.tree, self.id().and_then(|id| self.tree.predecessor(id)))
    }

    /// The parent node. Invalid for the root.
    pub fn parent(&self) -> Self {
        self.step(|node| node.parent)
    }

    /// The left child.
    pub fn left(&self) -> Self {
        self.step(|node| node.left)
    }

    /// The right child.
    pub fn right(&self) -> Self {
        self.step(|node| node.right)
    }
}
