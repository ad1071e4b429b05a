//! Iterators over the values of a tree.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::search::SearchTree;

/// The order in which [`Traverse`] visits nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Node, then its left subtree, then its right subtree.
    PreOrder,
    /// Left subtree, node, right subtree. This is sorted order.
    #[default]
    InOrder,
    /// Left subtree, right subtree, then the node.
    PostOrder,
    /// Level by level from the root, left to right within a level.
    BreadthFirst,
}

/// Iterator over a tree's values in sorted order. Created by `iter`.
pub struct Iter<'a, T> {
    tree: &'a SearchTree<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a SearchTree<T>) -> Self {
        Self {
            tree,
            front: tree.minimum().id(),
            back: tree.maximum().id(),
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.tree.successor(id);
        self.remaining -= 1;
        Some(&self.tree.nodes()[id].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.tree.predecessor(id);
        self.remaining -= 1;
        Some(&self.tree.nodes()[id].value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over a tree's values in a chosen [`Traversal`] order. Created by `traverse`.
///
/// # Examples
///
/// ```
/// use avl_tree::{AvlTree, Traversal};
///
/// let tree: AvlTree<_> = [2, 1, 3].into_iter().collect();
///
/// let pre: Vec<_> = tree.traverse(Traversal::PreOrder).copied().collect();
/// let post: Vec<_> = tree.traverse(Traversal::PostOrder).copied().collect();
///
/// assert_eq!(pre, [2, 1, 3]);
/// assert_eq!(post, [1, 3, 2]);
/// ```
pub struct Traverse<'a, T> {
    tree: &'a SearchTree<T>,
    order: Traversal,
    pending: VecDeque<NodeId>,
}

impl<'a, T> Traverse<'a, T> {
    pub(crate) fn new(tree: &'a SearchTree<T>, order: Traversal) -> Self {
        let pending = match order {
            Traversal::InOrder => tree.minimum().id().into_iter().collect(),
            Traversal::PreOrder | Traversal::BreadthFirst => {
                tree.root().id().into_iter().collect()
            }
            Traversal::PostOrder => {
                // Node, right, left is exactly post-order backwards.
                let nodes = tree.nodes();
                let mut stack: Vec<_> = tree.root().id().into_iter().collect();
                let mut reversed = Vec::with_capacity(tree.len());
                while let Some(id) = stack.pop() {
                    reversed.push(id);
                    stack.extend(nodes.left(id));
                    stack.extend(nodes.right(id));
                }
                reversed.into_iter().rev().collect()
            }
        };
        Self {
            tree,
            order,
            pending,
        }
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.tree.nodes();
        let id = match self.order {
            Traversal::PreOrder => {
                let id = self.pending.pop_back()?;
                self.pending.extend(nodes.right(id));
                self.pending.extend(nodes.left(id));
                id
            }
            Traversal::InOrder => {
                let id = self.pending.pop_front()?;
                self.pending.extend(self.tree.successor(id));
                id
            }
            Traversal::PostOrder => self.pending.pop_front()?,
            Traversal::BreadthFirst => {
                let id = self.pending.pop_front()?;
                self.pending.extend(nodes.left(id));
                self.pending.extend(nodes.right(id));
                id
            }
        };
        Some(&nodes[id].value)
    }
}

impl<T> FusedIterator for Traverse<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Subtree;

    /// ```text
    ///        4
    ///      /   \
    ///     2     6
    ///    / \     \
    ///   1   3     7
    /// ```
    fn tree() -> SearchTree<i32> {
        SearchTree::from_subtree(
            Subtree::new(4)
                .with_left(
                    Subtree::new(2)
                        .with_left(Subtree::new(1))
                        .with_right(Subtree::new(3)),
                )
                .with_right(Subtree::new(6).with_right(Subtree::new(7))),
        )
    }

    fn collect(tree: &SearchTree<i32>, order: Traversal) -> Vec<i32> {
        tree.traverse(order).copied().collect()
    }

    #[test]
    fn every_order() {
        let tree = tree();

        assert_eq!(collect(&tree, Traversal::PreOrder), [4, 2, 1, 3, 6, 7]);
        assert_eq!(collect(&tree, Traversal::InOrder), [1, 2, 3, 4, 6, 7]);
        assert_eq!(collect(&tree, Traversal::PostOrder), [1, 3, 2, 7, 6, 4]);
        assert_eq!(collect(&tree, Traversal::BreadthFirst), [4, 2, 6, 1, 3, 7]);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tree = SearchTree::<i32>::new();

        for order in [
            Traversal::PreOrder,
            Traversal::InOrder,
            Traversal::PostOrder,
            Traversal::BreadthFirst,
        ] {
            assert_eq!(tree.traverse(order).next(), None);
        }
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn iter_from_both_ends() {
        let tree = tree();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&7));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<_>>(), [&2, &3, &4]);

        let reversed: Vec<_> = tree.iter().rev().copied().collect();
        assert_eq!(reversed, [7, 6, 4, 3, 2, 1]);
    }
}
