//! Construction-time settings for trees.

/// What to do when inserting a value equal to one already in the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Duplicates {
    /// Keep both values. The new one is placed to the left of the equal values on its path.
    #[default]
    Allow,
    /// Leave the tree untouched and report the insertion as failed.
    Reject,
}

/// Settings a tree is constructed with.
///
/// # Examples
///
/// ```
/// use avl_tree::{AvlTree, Duplicates, TreeConfig};
///
/// let mut tree = AvlTree::with_config(TreeConfig::new().duplicates(Duplicates::Reject));
///
/// assert!(tree.insert(5).is_some());
/// assert!(tree.insert(5).is_none());
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TreeConfig {
    /// Policy applied by `insert`. `insert_with` can override it per call.
    pub duplicates: Duplicates,
}

impl TreeConfig {
    /// The default configuration, which allows duplicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicates policy.
    pub fn duplicates(mut self, duplicates: Duplicates) -> Self {
        self.duplicates = duplicates;
        self
    }
}
