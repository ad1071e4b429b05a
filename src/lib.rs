//! This crate provides a Binary Search Tree (BST) and a self-balancing AVL tree built on top
//! of it.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than or equal to its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). [`SearchTree`] makes no effort to keep that
//! height down. [`AvlTree`] rotates nodes after every insertion and removal so that the two
//! subtrees of any `Node` differ in height by at most one, which bounds the height by
//! `O(lg N)` where `N` is the number of nodes in the tree.
//!
//! ## Nodes and handles
//!
//! Nodes live in an arena owned by the tree. Operations that locate a node hand out a
//! [`NodeId`] or a [`Cursor`]. Neither owns anything: a handle keeps working across
//! rotations and turns stale once its node is removed.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod balanced;
pub mod config;
pub mod cursor;
pub mod error;
pub mod node;
pub mod search;
pub mod set;
pub mod traverse;

pub use balanced::AvlTree;
pub use config::{Duplicates, TreeConfig};
pub use cursor::Cursor;
pub use error::InvariantError;
pub use node::{NodeId, Side, Subtree};
pub use search::SearchTree;
pub use set::TreeSet;
pub use traverse::{Iter, Traversal, Traverse};
