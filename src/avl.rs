//! Binary search trees that know the height of every subtree.
//!
//! An [`AvlTree`] is a [`BinarySearchTree`] whose nodes carry a [`Height`]. Heights are assigned
//! by a single bottom-up pass after bulk construction (and on [`AvlTree::recompute_heights`]);
//! they are not maintained by [`put`](AvlTree::put) and [`remove`](AvlTree::remove), and the tree
//! never rotates. The tree only reports where it is out of balance.

use std::cell::Cell;
use std::fmt;
use std::ops::ControlFlow;

use tracing::debug;

use crate::binary_tree::{Nodes, Shape};
use crate::encoding::Encoding;
use crate::error::Result;
use crate::key::{Key, Typed};
use crate::node::Node;
use crate::search_tree::BinarySearchTree;
use crate::walk::{self, walk, Visit};

/// The height of the subtree under a node, in edges. A leaf has height `0`.
///
/// Kept in a [`Cell`] so the height pass can run over shared references.
#[derive(Debug, Clone, Default)]
pub struct Height(Cell<i64>);

impl Height {
    /// The stored height.
    pub fn get(&self) -> i64 {
        self.0.get()
    }

    fn set(&self, height: i64) {
        self.0.set(height)
    }
}

impl<K, V> Node<K, V, Height> {
    /// The height of the subtree under this node as of the last height pass.
    pub fn height(&self) -> i64 {
        self.aux.get()
    }
}

fn height_of<K, V>(node: Option<&Node<K, V, Height>>) -> i64 {
    node.map_or(-1, Node::height)
}

/// A key together with the height of its node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeHeight {
    /// The key of the node.
    pub key: Key,
    /// The stored height of the node.
    pub height: i64,
}

/// A node whose subtrees differ in height by more than one.
#[derive(Debug, Clone, PartialEq)]
pub struct Imbalance {
    /// The key of the node.
    pub key: Key,
    /// Height of the left subtree, `-1` if there is none.
    pub left_height: i64,
    /// Height of the right subtree, `-1` if there is none.
    pub right_height: i64,
}

/// A binary search tree with per-node heights and balance reporting.
///
/// # Examples
///
/// ```
/// use bintree::{AvlTree, Imbalance, Key};
///
/// let mut tree: AvlTree<i64> = AvlTree::new((1..=3).map(|k| (k, None)), None).unwrap();
/// assert_eq!(tree.find_height_imbalance(), None);
///
/// tree.put(4, None).unwrap();
/// tree.put(5, None).unwrap();
/// tree.recompute_heights();
/// assert_eq!(
///     tree.find_height_imbalance(),
///     Some(Imbalance { key: Key::Int(3), left_height: -1, right_height: 1 })
/// );
/// ```
pub struct AvlTree<V> {
    tree: BinarySearchTree<V, Height>,
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V: Clone> Clone for AvlTree<V> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<V: fmt::Debug> fmt::Debug for AvlTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("key_type", &self.key_type())
            .field("value_type", &self.value_type())
            .field("nodes", &Nodes(self.root()))
            .finish()
    }
}

impl<V> Shape for AvlTree<V> {
    type Key = Key;
    type Value = V;
    type Aux = Height;

    fn root(&self) -> Option<&Node<Key, V, Height>> {
        self.tree.root()
    }
}

impl<V> AvlTree<V> {
    /// Creates an empty tree.
    pub fn empty() -> Self {
        Self {
            tree: BinarySearchTree::empty(),
        }
    }

    /// Builds the tree exactly as [`BinarySearchTree::new`] does, then assigns every node its
    /// height.
    pub fn new<K, I>(pairs: I, encoding: Option<Encoding>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<Key>,
        V: Typed,
    {
        let tree = Self {
            tree: BinarySearchTree::new(pairs, encoding)?,
        };
        tree.recompute_heights();
        Ok(tree)
    }

    /// See [`BinarySearchTree::key_type`].
    pub fn key_type(&self) -> Option<&'static str> {
        self.tree.key_type()
    }

    /// See [`BinarySearchTree::value_type`].
    pub fn value_type(&self) -> Option<&'static str> {
        self.tree.value_type()
    }

    /// See [`BinarySearchTree::get`].
    pub fn get(&self, key: impl Into<Key>) -> Result<Option<&V>> {
        self.tree.get(key)
    }

    /// See [`BinarySearchTree::put`]. Heights are left as they were; a new leaf starts at `0`.
    pub fn put(&mut self, key: impl Into<Key>, value: Option<V>) -> Result<()>
    where
        V: Typed,
    {
        self.tree.put(key, value)
    }

    /// See [`BinarySearchTree::remove`]. Heights are left as they were.
    pub fn remove(&mut self, key: impl Into<Key>) -> Result<()> {
        self.tree.remove(key)
    }

    /// Reassigns every height bottom-up: a node is one higher than its higher child, and a
    /// missing child counts as `-1`.
    pub fn recompute_heights(&self) {
        let _ = walk::<_, _, _, (), _>(self.root(), |visit, node| {
            if visit == Visit::Last {
                let height = 1 + height_of(node.left()).max(height_of(node.right()));
                node.aux.set(height);
            }
            ControlFlow::Continue(())
        });

        debug!(root_height = height_of(self.root()), "assigned node heights");
    }

    /// The stored height of every node, in key order.
    pub fn node_heights(&self) -> Vec<NodeHeight> {
        walk::collect(self.root(), Visit::Middle)
            .into_iter()
            .map(|node| NodeHeight {
                key: node.key.clone(),
                height: node.height(),
            })
            .collect()
    }

    /// The first node, in post-order, whose subtree heights differ by more than one. Uses the
    /// stored heights, so call [`recompute_heights`](AvlTree::recompute_heights) first if the tree
    /// was changed since it was built.
    pub fn find_height_imbalance(&self) -> Option<Imbalance> {
        let found = walk(self.root(), |visit, node| {
            if visit != Visit::Last {
                return ControlFlow::Continue(());
            }

            let left_height = height_of(node.left());
            let right_height = height_of(node.right());
            if (left_height - right_height).abs() > 1 {
                ControlFlow::Break(Imbalance {
                    key: node.key.clone(),
                    left_height,
                    right_height,
                })
            } else {
                ControlFlow::Continue(())
            }
        });

        match found {
            ControlFlow::Break(imbalance) => Some(imbalance),
            ControlFlow::Continue(()) => None,
        }
    }

    /// A deep copy of the tree with freshly computed heights.
    pub fn copy(&self) -> Self
    where
        V: Clone,
    {
        let copy = Self {
            tree: self.tree.copy(),
        };
        copy.recompute_heights();
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect(len: i64) -> AvlTree<i64> {
        AvlTree::new((1..=len).map(|k| (k, Some(k * 100))), None).expect("distinct keys")
    }

    fn heights(tree: &AvlTree<i64>) -> Vec<(i64, i64)> {
        tree.node_heights()
            .into_iter()
            .map(|NodeHeight { key, height }| match key {
                Key::Int(k) => (k, height),
                other => panic!("unexpected key {}", other),
            })
            .collect()
    }

    #[test]
    fn heights_after_construction() {
        assert_eq!(heights(&perfect(3)), [(1, 0), (2, 1), (3, 0)]);
        assert_eq!(
            heights(&perfect(7)),
            [(1, 0), (2, 1), (3, 0), (4, 2), (5, 0), (6, 1), (7, 0)]
        );
        assert_eq!(
            heights(&perfect(15)),
            [
                (1, 0),
                (2, 1),
                (3, 0),
                (4, 2),
                (5, 0),
                (6, 1),
                (7, 0),
                (8, 3),
                (9, 0),
                (10, 1),
                (11, 0),
                (12, 2),
                (13, 0),
                (14, 1),
                (15, 0)
            ]
        );
        assert!(AvlTree::<i64>::empty().node_heights().is_empty());
    }

    #[test]
    fn root_height_matches_shape_height() {
        for len in [1, 2, 5, 10, 15, 33] {
            let tree = perfect(len);
            assert_eq!(tree.root().map(Node::height), Some(tree.height()));
        }
    }

    #[test]
    fn balanced_construction_has_no_imbalance() {
        for len in 0..40 {
            assert_eq!(perfect(len).find_height_imbalance(), None);
        }
    }

    #[test]
    fn chains_are_imbalanced_at_the_top() {
        let tree: AvlTree<i64> = AvlTree::new(
            vec![(1, None), (2, None), (3, None)],
            Some(Encoding::PreOrder),
        )
        .expect("ascending keys are a valid pre-order chain");

        assert_eq!(heights(&tree), [(1, 2), (2, 1), (3, 0)]);
        assert_eq!(
            tree.find_height_imbalance(),
            Some(Imbalance {
                key: Key::from(1),
                left_height: -1,
                right_height: 1
            })
        );
    }

    #[test]
    fn mutation_leaves_heights_stale_until_recomputed() {
        let mut tree = perfect(15);
        for key in 16..=18 {
            tree.put(key, Some(key * 100)).expect("int key and value");
        }

        // New leaves start at zero and nothing above them moved.
        assert_eq!(tree.find_height_imbalance(), None);
        assert_eq!(tree.root().map(Node::height), Some(3));

        tree.recompute_heights();
        assert_eq!(tree.root().map(Node::height), Some(6));
        assert_eq!(
            tree.find_height_imbalance(),
            Some(Imbalance {
                key: Key::from(16),
                left_height: -1,
                right_height: 1
            })
        );

        tree.remove(17).expect("present");
        tree.recompute_heights();
        assert_eq!(tree.find_height_imbalance().map(|i| i.key), Some(Key::from(15)));

        tree.remove(18).expect("present");
        tree.recompute_heights();
        assert_eq!(tree.find_height_imbalance(), None);
        assert_eq!(tree.get(16), Ok(Some(&1600)));
    }

    #[test]
    fn copies_get_fresh_heights() {
        let mut tree = perfect(3);
        tree.put(4, None).expect("insert");
        tree.put(5, None).expect("insert");
        assert_eq!(tree.root().map(Node::height), Some(1));

        let copy = tree.copy();
        assert_eq!(copy.root().map(Node::height), Some(3));
        assert_eq!(copy.traverse_in_order(), tree.traverse_in_order());
        assert_eq!(copy.find_height_imbalance().map(|i| i.key), Some(Key::from(3)));

        let clone = copy.clone();
        assert_eq!(heights(&clone), heights(&copy));
    }
}
