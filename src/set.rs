//! An ordered set on top of [`AvlTree`].
//!
//! # Examples
//!
//! ```
//! use avl_tree::TreeSet;
//!
//! let mut set = TreeSet::new();
//!
//! assert!(set.add(3));
//! assert!(set.add(1));
//! // Already there.
//! assert!(!set.add(3));
//!
//! assert!(set.contains(&1));
//! assert_eq!(set.len(), 2);
//!
//! // Hands out the smallest element.
//! assert_eq!(set.take_any(), Some(1));
//! assert_eq!(set.take_any(), Some(3));
//! assert_eq!(set.take_any(), None);
//! ```

use std::borrow::Borrow;
use std::fmt;

use crate::balanced::AvlTree;
use crate::config::{Duplicates, TreeConfig};
use crate::traverse::Iter;

/// A set of unique values kept in sorted order.
pub struct TreeSet<T> {
    container: AvlTree<T>,
}

impl<T> Default for TreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TreeSet<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
        }
    }
}

impl<T> fmt::Debug for TreeSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a TreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for TreeSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for TreeSet<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> TreeSet<T> {
    /// Generates a new, empty `TreeSet`.
    pub fn new() -> Self {
        Self {
            container: AvlTree::with_config(TreeConfig::new().duplicates(Duplicates::Reject)),
        }
    }

    /// Number of elements in the set.
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// True iff the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.container.iter()
    }

    /// Removes an element and hands it back, or `None` if the set is empty. The element chosen
    /// is the smallest one.
    pub fn take_any(&mut self) -> Option<T> {
        let id = self.container.minimum().id()?;
        self.container.take(id)
    }
}

impl<T> TreeSet<T>
where
    T: Ord,
{
    /// Adds `value` to the set. Returns `true` iff it wasn't already there.
    pub fn add(&mut self, value: T) -> bool {
        self.container.insert(value).is_some()
    }

    /// True iff the set holds an element equal to `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.container.contains(value)
    }

    /// Removes the element equal to `value`. Returns `true` iff it was there.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.container.remove_value(value)
    }
}
