//! This crate exposes binary trees built without parent pointers, from the plain shape-only
//! tree up to a search tree that reports its own imbalance.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree stores records under keys and supports operations to insert, find, and
//! delete them. BSTs are built out of `Node`s, each holding a key, an optional value and up to
//! two child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a key less than its
//!    own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a key greater than
//!    its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`, where `height` is the number of edges on the longest path from
//! the root `Node` to a leaf `Node`. Visiting the left subtree, then the subtree root, then the
//! right subtree yields the records in key order.
//!
//! ## Layers
//!
//! - [`BinaryTree`] only knows how its nodes are linked. Everything that depends on the shape
//!   alone (size, height, traversals) lives on the [`Shape`] trait.
//! - [`BinarySearchTree`] adds key order. It can be built from a key sequence in any of the four
//!   traversal orders (see [`Encoding`]), and supports `get`, `put` and `remove`.
//! - [`AvlTree`] additionally stores the height of every node and reports the first node whose
//!   subtrees differ in height by more than one. It never rotates.
//!
//! Nodes don't point to their parents. Every depth-first algorithm in the crate keeps the path to
//! the current node on a [`Stack`] instead, and breadth-first ones use a [`Queue`].

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod avl;
mod binary_tree;
mod containers;
mod encoding;
mod error;
mod key;
mod node;
mod search_tree;
mod walk;

pub use avl::{AvlTree, Height, Imbalance, NodeHeight};
pub use binary_tree::{BinaryTree, Shape};
pub use containers::{Queue, Stack};
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use key::{Key, Typed, Value};
pub use node::{Entry, Node};
pub use search_tree::BinarySearchTree;
