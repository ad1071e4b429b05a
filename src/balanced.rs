//! A self-balancing Binary Search Tree (specifically, an AVL tree) built on
//! [`SearchTree`]. Every insertion and removal is followed by a walk towards the root that finds
//! nodes whose subtrees differ in height by more than one and rotates them back into shape, so
//! the tree height stays within `1.44 * lg(N + 2)`.
//!
//! # Examples
//!
//! ```
//! use avl_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.find(&1).is_valid());
//!
//! // Ascending inserts would build a chain in a plain search tree.
//! for x in 1..=7 {
//!     tree.insert(x);
//! }
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.root().get(), Some(&4));
//!
//! // Removing by value reports whether anything was there.
//! assert!(tree.remove_value(&4));
//! assert!(!tree.remove_value(&4));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 5, 6, 7]);
//! ```

use std::borrow::Borrow;
use std::fmt;

use crate::config::{Duplicates, TreeConfig};
use crate::cursor::Cursor;
use crate::error::InvariantError;
use crate::node::{NodeId, Side, Subtree};
use crate::search::{SearchTree, Vacancy};
use crate::traverse::{Iter, Traversal, Traverse};

/// Where the excess height sits below an unbalanced node `y`. See [the Wikipedia
/// page][wiki] for the terminology.
///
/// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Rotation {
    /// The left subtree of the left child of `y` is too tall.
    LeftLeft,
    /// The right subtree of the left child of `y` is too tall.
    LeftRight,
    /// The left subtree of the right child of `y` is too tall.
    RightLeft,
    /// The right subtree of the right child of `y` is too tall.
    RightRight,
}

impl Rotation {
    fn new(child: Side, grandchild: Side) -> Self {
        match (child, grandchild) {
            (Side::Left, Side::Left) => Self::LeftLeft,
            (Side::Left, Side::Right) => Self::LeftRight,
            (Side::Right, Side::Left) => Self::RightLeft,
            (Side::Right, Side::Right) => Self::RightRight,
        }
    }
}

/// An unbalanced node and the rotation that fixes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Imbalance {
    pub(crate) pos: NodeId,
    pub(crate) rotation: Rotation,
}

/// A self-balancing Binary Search Tree. This can be used for inserting, finding, and removing
/// values in `O(lg N)`.
pub struct AvlTree<T> {
    tree: SearchTree<T>,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for AvlTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T> fmt::Debug for AvlTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for AvlTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for AvlTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> AvlTree<T> {
    /// Generates a new, empty `AvlTree` that allows duplicates.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Generates a new, empty `AvlTree` with the given configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            tree: SearchTree::with_config(config),
        }
    }

    /// Builds a tree that takes ownership of an already assembled subtree. The subtree is used
    /// as is, so it should already be ordered and balanced. Use
    /// [`check_invariants`][AvlTree::check_invariants] if in doubt.
    pub fn from_subtree(subtree: Subtree<T>) -> Self {
        Self {
            tree: SearchTree::from_subtree(subtree),
        }
    }

    /// The configuration the tree was built with.
    pub fn config(&self) -> TreeConfig {
        self.tree.config()
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True iff the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of levels in the tree. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// A cursor at the root node.
    pub fn root(&self) -> Cursor<'_, T> {
        self.tree.root()
    }

    /// A cursor at the node behind `id`. Invalid if the node was removed.
    pub fn cursor(&self, id: NodeId) -> Cursor<'_, T> {
        self.tree.cursor(id)
    }

    /// The value of the node behind `id`, if it is still in the tree.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.tree.get(id)
    }

    /// A cursor at the smallest value. Invalid for an empty tree.
    pub fn minimum(&self) -> Cursor<'_, T> {
        self.tree.minimum()
    }

    /// A cursor at the largest value. Invalid for an empty tree.
    pub fn maximum(&self) -> Cursor<'_, T> {
        self.tree.maximum()
    }

    /// The node following `id` in sorted order, if any.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.tree.successor(id)
    }

    /// The node preceding `id` in sorted order, if any.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.tree.predecessor(id)
    }

    /// Iterates over the values in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Iterates over the values in the given order.
    pub fn traverse(&self, order: Traversal) -> Traverse<'_, T> {
        self.tree.traverse(order)
    }

    /// Drops every value. Outstanding handles all become stale.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Removes the node behind `id` and drops its value.
    ///
    /// Returns `false` if `id` no longer refers to a node of this tree. Passing a handle obtained
    /// from a *different* tree is a logic error: it may remove an unrelated node or panic.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// let id = tree.insert(1).unwrap();
    ///
    /// assert!(tree.remove(id));
    /// // The handle is stale now.
    /// assert!(!tree.remove(id));
    /// ```
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.take(id).is_some()
    }

    /// Removes the node behind `id` and returns its value. See [`AvlTree::remove`].
    pub fn take(&mut self, id: NodeId) -> Option<T> {
        let removal = self.tree.unlink(id)?;
        if removal.vacancy != Vacancy::TreeNowEmpty {
            self.rebalance_from(removal.changed_from);
        }
        Some(removal.value)
    }

    /// Checks the balance on the path from `end` up to the root, where `end` is a freshly
    /// inserted node. The first unbalanced node found (the deepest one) is reported along with
    /// the rotation that fixes it.
    pub(crate) fn check_balance_on_path(&self, end: NodeId) -> Option<Imbalance> {
        let nodes = self.tree.nodes();
        let mut x = end;
        while let Some((y, child)) = nodes.slot_of(x) {
            let left_height = nodes.subtree_height(nodes.left(y));
            let right_height = nodes.subtree_height(nodes.right(y));
            if left_height.abs_diff(right_height) > 1 {
                // `x` is the child of `y` that `end` was inserted under. Which side of `x` it
                // went to picks between the single and double rotation.
                let rotation = match nodes.is_on_left_or_right(x, end) {
                    Some(grandchild) => Rotation::new(child, grandchild),
                    None => self.rotation_by_height(y),
                };
                return Some(Imbalance { pos: y, rotation });
            }
            x = y;
        }
        None
    }

    /// Picks the rotation for an unbalanced `y` by looking at the heights below it. Ties in the
    /// taller child pick the single rotation, which is the only correct choice after a removal.
    fn rotation_by_height(&self, y: NodeId) -> Rotation {
        let nodes = self.tree.nodes();
        let child = if nodes.balance_factor(y) < 0 {
            Side::Left
        } else {
            Side::Right
        };
        let k = nodes
            .child(y, child)
            .expect("Taller side of an unbalanced node is not empty");
        let outer = nodes.subtree_height(nodes.child(k, child));
        let inner = nodes.subtree_height(nodes.child(k, child.opposite()));
        let grandchild = if outer >= inner {
            child
        } else {
            child.opposite()
        };
        Rotation::new(child, grandchild)
    }

    /// Walks from `start` to the root, rotating every unbalanced node on the way. A removal can
    /// need a rotation at every level.
    fn rebalance_from(&mut self, start: Option<NodeId>) {
        let mut next = start;
        while let Some(y) = next {
            let subtree_root = if self.tree.nodes().balance_factor(y).abs() > 1 {
                let rotation = self.rotation_by_height(y);
                self.rotate(Imbalance { pos: y, rotation })
            } else {
                y
            };
            next = self.tree.nodes().parent(subtree_root);
        }
    }

    /// Deals with the imbalance by rotating the tree and returns the new root of the rotated
    /// subtree.
    ///
    /// # Diagram
    ///
    /// The single rotation for `LeftLeft` (`RightRight` is its mirror):
    ///
    /// ```text
    ///       k2                k1
    ///      /  \              /  \
    ///     k1   z   --->     x    k2
    ///    /  \                   /  \
    ///   x    b                 b    z
    /// ```
    ///
    /// The double rotation for `LeftRight` (`RightLeft` is its mirror):
    ///
    /// ```text
    ///       k3                  k2
    ///      /  \               /    \
    ///     k1   d             k1     k3
    ///    /  \      --->     /  \   /  \
    ///   a    k2            a    b c    d
    ///       /  \
    ///      b    c
    /// ```
    pub(crate) fn rotate(&mut self, imbalance: Imbalance) -> NodeId {
        log::trace!("rotating {:?}", imbalance);
        let y = imbalance.pos;
        let new_root = match imbalance.rotation {
            Rotation::LeftLeft => self.rotate_single(y, Side::Left),
            Rotation::RightRight => self.rotate_single(y, Side::Right),
            Rotation::LeftRight => self.rotate_double(y, Side::Left),
            Rotation::RightLeft => self.rotate_double(y, Side::Right),
        };

        if cfg!(debug_assertions) {
            let nodes = self.tree.nodes();
            for id in [Some(new_root), nodes.left(new_root), nodes.right(new_root)]
                .into_iter()
                .flatten()
            {
                let left_height = nodes.subtree_height(nodes.left(id));
                let right_height = nodes.subtree_height(nodes.right(id));
                assert_eq!(nodes.height(id), left_height.max(right_height) + 1);
            }
        }
        new_root
    }

    /// Lifts the `side` child of `k2` into its place. `k2` moves down to the other side and
    /// adopts the lifted node's inner subtree.
    fn rotate_single(&mut self, k2: NodeId, side: Side) -> NodeId {
        let nodes = self.tree.nodes_mut();
        let k1 = nodes
            .release_child(k2, side)
            .expect("Single rotation needs a child on the tall side");
        let b = nodes.release_child(k1, side.opposite());

        self.tree.transplant(k2, Some(k1));

        let nodes = self.tree.nodes_mut();
        nodes.set_child(k1, side.opposite(), Some(k2));
        nodes.set_child(k2, side, b);
        k1
    }

    /// Lifts the inner grandchild `k2` of `k3` on `side` into `k3`'s place, with `k1` and `k3`
    /// splitting `k2`'s subtrees between them.
    fn rotate_double(&mut self, k3: NodeId, side: Side) -> NodeId {
        let nodes = self.tree.nodes_mut();
        let k1 = nodes
            .release_child(k3, side)
            .expect("Double rotation needs a child on the tall side");
        let k2 = nodes
            .release_child(k1, side.opposite())
            .expect("Double rotation needs an inner grandchild");
        let b = nodes.release_child(k2, side);
        let c = nodes.release_child(k2, side.opposite());

        self.tree.transplant(k3, Some(k2));

        let nodes = self.tree.nodes_mut();
        nodes.set_child(k1, side.opposite(), b);
        nodes.set_child(k3, side, c);
        nodes.set_child(k2, side, Some(k1));
        nodes.set_child(k2, side.opposite(), Some(k3));
        k2
    }
}

impl<T> AvlTree<T>
where
    T: Ord,
{
    /// Inserts `value` following the tree's duplicates policy and returns a handle to the new
    /// node, or `None` if the value was rejected as a duplicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for x in [10, 20, 30] {
    ///     tree.insert(x);
    /// }
    ///
    /// // The tree rotated to stay balanced.
    /// assert_eq!(tree.root().get(), Some(&20));
    /// ```
    pub fn insert(&mut self, value: T) -> Option<NodeId> {
        self.insert_with(value, self.config().duplicates)
    }

    /// Inserts `value` with an explicit duplicates policy.
    pub fn insert_with(&mut self, value: T, duplicates: Duplicates) -> Option<NodeId> {
        let id = self.tree.insert_with(value, duplicates)?;
        // An insertion raises heights by at most one, so a single rotation restores the
        // balance of the whole path.
        if let Some(imbalance) = self.check_balance_on_path(id) {
            self.rotate(imbalance);
        }
        Some(id)
    }

    /// Finds a node holding a value equal to `key`. The cursor is invalid if there is none.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }

    /// True iff a value equal to `key` is in the tree.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Removes one value equal to `key`. Returns `true` iff something was removed.
    pub fn remove_value<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take_value(key).is_some()
    }

    /// Removes one value equal to `key` and returns it.
    pub fn take_value<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key).id()?;
        self.take(id)
    }

    /// Checks everything [`SearchTree::check_invariants`] does, plus the balance of every node.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.tree.check_invariants()?;
        let nodes = self.tree.nodes();
        match nodes
            .ids()
            .map(|id| nodes.balance_factor(id))
            .find(|balance_factor| balance_factor.abs() > 1)
        {
            Some(balance_factor) => Err(InvariantError::Unbalanced { balance_factor }),
            None => Ok(()),
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a multiset (value -> count).
    /// This way we can ensure that after a random smattering of inserts
    /// and removes we have the same values in both.
    fn do_ops<K>(ops: &[Op<K>], tree: &mut AvlTree<K>, counts: &mut BTreeMap<K, usize>)
    where
        K: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    tree.insert(k.clone());
                    *counts.entry(k.clone()).or_default() += 1;
                }
                Op::Remove(k) => {
                    let expected = match counts.get_mut(k) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                counts.remove(k);
                            }
                            true
                        }
                        None => false,
                    };
                    assert_eq!(tree.remove_value(k), expected);
                }
                Op::Walk(order) => {
                    let expected: Vec<_> = counts
                        .iter()
                        .flat_map(|(k, count)| std::iter::repeat(k).take(*count))
                        .collect();
                    let mut walked: Vec<_> = tree.traverse(*order).collect();
                    if *order != Traversal::InOrder {
                        walked.sort();
                    }
                    assert_eq!(walked, expected);
                }
            }
            assert_eq!(tree.check_invariants(), Ok(()));
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = AvlTree::new();
            let mut counts = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut counts);
            tree.len() == counts.values().sum::<usize>()
                && counts.keys().all(|key| tree.contains(key))
        }
    }

    quickcheck::quickcheck! {
        fn height_stays_logarithmic(xs: Vec<i16>) -> bool {
            let tree: AvlTree<_> = xs.iter().copied().collect();
            let bound = 1.44 * ((tree.len() + 2) as f64).log2();

            tree.height() as f64 <= bound
        }
    }
}
