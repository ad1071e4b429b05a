//! A plain (unbalanced) Binary Search Tree over the node arena. It keeps the ordering invariant
//! and nothing else, so inserting sorted values degrades it into a linked list. The
//! [`AvlTree`][crate::AvlTree] wraps it to keep it balanced.
//!
//! # Examples
//!
//! ```
//! use avl_tree::SearchTree;
//!
//! let mut tree = SearchTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.find(&1).is_valid());
//!
//! let one = tree.insert(1).unwrap();
//! tree.insert(2);
//! assert_eq!(tree.find(&1).get(), Some(&1));
//!
//! // Without balancing, ascending inserts build a chain.
//! assert_eq!(tree.height(), 2);
//!
//! // Removing through a handle hands the value back.
//! assert_eq!(tree.take(one), Some(1));
//! assert!(!tree.find(&1).is_valid());
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::config::{Duplicates, TreeConfig};
use crate::cursor::Cursor;
use crate::error::InvariantError;
use crate::node::{NodeId, Nodes, Side, Subtree};
use crate::traverse::{Iter, Traversal, Traverse};

/// What happened to the position of a removed node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Vacancy {
    /// Another node now sits where the removed node was.
    Occupied(NodeId),
    /// The position is empty now. This is the parent of that empty slot.
    ParentOfEmpty(NodeId),
    /// The removed node was the last one.
    TreeNowEmpty,
}

/// The outcome of unlinking a node from the tree.
#[derive(Debug)]
pub(crate) struct Removal<T> {
    pub(crate) value: T,
    pub(crate) vacancy: Vacancy,
    /// The deepest node whose subtree changed shape. Ancestors of this node are the only ones
    /// whose heights could have changed.
    pub(crate) changed_from: Option<NodeId>,
}

/// A Binary Search Tree. This can be used for inserting, finding, and removing values.
pub struct SearchTree<T> {
    nodes: Nodes<T>,
    root: Option<NodeId>,
    config: TreeConfig,
}

impl<T> Default for SearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SearchTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            config: self.config,
        }
    }
}

impl<T> fmt::Debug for SearchTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a SearchTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for SearchTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for SearchTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> SearchTree<T> {
    /// Generates a new, empty `SearchTree` that allows duplicates.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Generates a new, empty `SearchTree` with the given configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            nodes: Nodes::new(),
            root: None,
            config,
        }
    }

    /// Builds a tree that takes ownership of an already assembled subtree. The subtree is used
    /// as is: it is neither reordered nor rebalanced.
    pub fn from_subtree(subtree: Subtree<T>) -> Self {
        let mut tree = Self::new();
        tree.root = Some(tree.nodes.adopt(subtree));
        tree
    }

    /// The configuration the tree was built with.
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True iff the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels in the tree. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.nodes.subtree_height(self.root)
    }

    /// A cursor at the root node.
    pub fn root(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.root)
    }

    /// A cursor at the node behind `id`. Invalid if the node was removed.
    pub fn cursor(&self, id: NodeId) -> Cursor<'_, T> {
        Cursor::new(self, Some(id))
    }

    /// The value of the node behind `id`, if it is still in the tree.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.value)
    }

    /// A cursor at the smallest value. Invalid for an empty tree.
    pub fn minimum(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.root.map(|root| self.minimum_from(root)))
    }

    /// A cursor at the largest value. Invalid for an empty tree.
    pub fn maximum(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.root.map(|root| self.maximum_from(root)))
    }

    /// The node following `id` in sorted order, if any.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Right)
    }

    /// The node preceding `id` in sorted order, if any.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Left)
    }

    /// Iterates over the values in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Iterates over the values in the given order.
    pub fn traverse(&self, order: Traversal) -> Traverse<'_, T> {
        Traverse::new(self, order)
    }

    /// Drops every value. Outstanding handles all become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Removes the node behind `id` and drops its value.
    ///
    /// Returns `false` if `id` no longer refers to a node of this tree. Passing a handle obtained
    /// from a *different* tree is a logic error: it may remove an unrelated node or panic.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.take(id).is_some()
    }

    /// Removes the node behind `id` and returns its value. See [`SearchTree::remove`].
    pub fn take(&mut self, id: NodeId) -> Option<T> {
        self.unlink(id).map(|removal| removal.value)
    }

    pub(crate) fn nodes(&self) -> &Nodes<T> {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut Nodes<T> {
        &mut self.nodes
    }

    fn minimum_from(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes.left(id) {
            id = left;
        }
        id
    }

    fn maximum_from(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes.right(id) {
            id = right;
        }
        id
    }

    /// The successor (`Side::Right`) or predecessor (`Side::Left`) of `id`.
    fn neighbour(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if let Some(child) = node.child(side) {
            return Some(match side {
                Side::Left => self.maximum_from(child),
                Side::Right => self.minimum_from(child),
            });
        }

        // Nothing beyond us below, so climb while we are on the `side` of our parent. The first
        // ancestor we reach from the other side is the answer.
        let mut child = id;
        let mut parent = node.parent;
        while let Some(p) = parent {
            if self.nodes.child(p, side) != Some(child) {
                break;
            }
            child = p;
            parent = self.nodes.parent(p);
        }
        parent
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v`, or empties `u`'s slot
    /// when `v` is `None`. `v` is first released from its own parent. `u` ends up detached but
    /// not destroyed.
    ///
    /// `u` must not be a proper descendant of `v`.
    pub(crate) fn transplant(&mut self, u: NodeId, v: Option<NodeId>) {
        let slot = self.nodes.slot_of(u);
        if let Some((v_parent, v_side)) = v.and_then(|v| self.nodes.slot_of(v)) {
            self.nodes.release_child(v_parent, v_side);
        }

        match slot {
            Some((parent, side)) => {
                self.nodes.release_child(parent, side);
                self.nodes.set_child(parent, side, v);
            }
            None => self.root = v,
        }
    }

    /// Unlinks the node behind `id` from the tree and frees it.
    ///
    /// 1. No left child: the right subtree (possibly empty) takes its place.
    /// 2. No right child: the left subtree takes its place.
    /// 3. Two children: its successor takes its place.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<Removal<T>> {
        let node = self.nodes.get(id)?;
        let (parent, left, right) = (node.parent, node.left, node.right);

        let (vacancy, changed_from) = match (left, right) {
            (None, replacement) | (replacement, None) => {
                self.transplant(id, replacement);
                let vacancy = match (replacement, parent) {
                    (Some(replacement), _) => Vacancy::Occupied(replacement),
                    (None, Some(parent)) => Vacancy::ParentOfEmpty(parent),
                    (None, None) => Vacancy::TreeNowEmpty,
                };
                (vacancy, parent)
            }
            (Some(_), Some(right)) => {
                let successor = self.minimum_from(right);
                let changed_from = if successor == right {
                    successor
                } else {
                    // The successor is the minimum of `right` so it is a left child without a
                    // left child of its own. Its right subtree takes its place.
                    let successor_parent = self
                        .nodes
                        .parent(successor)
                        .expect("Successor below the right child has a parent");
                    self.nodes.release_left(successor_parent);
                    let successor_right = self.nodes.release_right(successor);
                    self.nodes.set_left(successor_parent, successor_right);

                    let right = self.nodes.release_right(id);
                    self.nodes.set_right(successor, right);
                    successor_parent
                };
                let left = self.nodes.release_left(id);
                self.nodes.set_left(successor, left);
                self.transplant(id, Some(successor));
                (Vacancy::Occupied(successor), Some(changed_from))
            }
        };

        log::trace!("unlinked node, vacancy: {:?}", vacancy);
        let value = self
            .nodes
            .deallocate(id)
            .expect("Unlinked node is still allocated");
        Some(Removal {
            value,
            vacancy,
            changed_from,
        })
    }
}

impl<T> SearchTree<T>
where
    T: Ord,
{
    /// Inserts `value` following the tree's duplicates policy and returns a handle to the new
    /// node, or `None` if the value was rejected as a duplicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::SearchTree;
    ///
    /// let mut tree = SearchTree::new();
    /// let id = tree.insert(3).unwrap();
    ///
    /// assert_eq!(tree.get(id), Some(&3));
    /// ```
    pub fn insert(&mut self, value: T) -> Option<NodeId> {
        self.insert_with(value, self.config.duplicates)
    }

    /// Inserts `value` with an explicit duplicates policy.
    ///
    /// Allowing duplicates in one call and rejecting them in the next still works: a rejecting
    /// insert refuses the value if any equal value is already present.
    pub fn insert_with(&mut self, value: T, duplicates: Duplicates) -> Option<NodeId> {
        let mut slot = None;
        let mut next = self.root;
        while let Some(x) = next {
            let side = match (value.cmp(&self.nodes[x].value), duplicates) {
                (Ordering::Less, _) | (Ordering::Equal, Duplicates::Allow) => Side::Left,
                (Ordering::Greater, _) => Side::Right,
                (Ordering::Equal, Duplicates::Reject) => {
                    log::trace!("rejected duplicate value");
                    return None;
                }
            };
            slot = Some((x, side));
            next = self.nodes.child(x, side);
        }

        let id = self.nodes.allocate(value);
        match slot {
            Some((parent, side)) => self.nodes.set_child(parent, side, Some(id)),
            None => self.root = Some(id),
        }
        Some(id)
    }

    /// Finds a node holding a value equal to `key`. If there are several, the one closest to the
    /// root is returned. The cursor is invalid if there is no such value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::SearchTree;
    ///
    /// let tree: SearchTree<String> = ["b", "a", "c"].iter().map(|s| s.to_string()).collect();
    ///
    /// // Look up `String`s by `&str`.
    /// assert_eq!(tree.find("a").get().map(String::as_str), Some("a"));
    /// assert!(!tree.find("z").is_valid());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut next = self.root;
        while let Some(x) = next {
            next = match key.cmp(self.nodes[x].value.borrow()) {
                Ordering::Less => self.nodes.left(x),
                Ordering::Equal => break,
                Ordering::Greater => self.nodes.right(x),
            };
        }
        Cursor::new(self, next)
    }

    /// True iff a value equal to `key` is in the tree.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_valid()
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

    /// Walks the whole tree and checks the links, the cached heights and the ordering.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let nodes = &self.nodes;
        if let Some(root) = self.root {
            if nodes.get(root).ok_or(InvariantError::DanglingLink)?.parent.is_some() {
                return Err(InvariantError::RootHasParent);
            }
        }

        let mut reachable = 0;
        let mut pending: Vec<_> = self.root.into_iter().collect();
        while let Some(id) = pending.pop() {
            reachable += 1;
            if reachable > nodes.len() {
                break;
            }

            let node = nodes.get(id).ok_or(InvariantError::DanglingLink)?;
            let mut heights = [0; 2];
            for (height, side) in heights.iter_mut().zip([Side::Left, Side::Right]) {
                let Some(child) = node.child(side) else {
                    continue;
                };
                let child_node = nodes.get(child).ok_or(InvariantError::DanglingLink)?;
                if child_node.parent != Some(id) {
                    return Err(InvariantError::ParentMismatch);
                }
                *height = child_node.height;
                pending.push(child);
            }

            let actual = heights[0].max(heights[1]) + 1;
            if node.height != actual {
                return Err(InvariantError::StaleHeight {
                    cached: node.height,
                    actual,
                });
            }
        }

        if reachable != nodes.len() {
            return Err(InvariantError::LengthMismatch {
                reachable,
                allocated: nodes.len(),
            });
        }

        let mut values = self.iter();
        if let Some(mut previous) = values.next() {
            for value in values {
                if value < previous {
                    return Err(InvariantError::OutOfOrder);
                }
                previous = value;
            }
        }
        Ok(())
    }
}
