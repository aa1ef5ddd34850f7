//! Binary search trees keyed by [`Key`].
//!
//! A [`BinarySearchTree`] keeps every key in its left subtree smaller, and every key in its right
//! subtree greater, than its own. Bulk construction accepts the flat key sequence in any of the
//! four [`Encoding`]s and rebuilds exactly the tree it describes; without an encoding the entries
//! are sorted first and wired into a height-balanced tree.
//!
//! # Examples
//!
//! ```
//! use bintree::{BinarySearchTree, Encoding, Shape};
//!
//! let mut tree: BinarySearchTree<&str> = BinarySearchTree::new(
//!     vec![(2, Some("second")), (1, Some("first")), (3, Some("third"))],
//!     Some(Encoding::PreOrder),
//! )
//! .unwrap();
//!
//! assert_eq!(tree.get(1), Ok(Some(&"first")));
//!
//! tree.put(4, Some("fourth")).unwrap();
//! tree.remove(2).unwrap();
//! assert!(tree.get(2).is_err());
//! assert_eq!(tree.len(), 3);
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::binary_tree::{check_types, expect_type, BinaryTree, Nodes, Shape};
use crate::encoding::{balanced, is_increasing, Encoding};
use crate::error::{Error, Result};
use crate::key::{Key, Typed};
use crate::node::{Link, Node};

/// An unbalanced binary search tree.
///
/// `A` is per-node bookkeeping; it is `()` unless the tree is wrapped by a layer that needs it,
/// such as [`AvlTree`](crate::AvlTree).
pub struct BinarySearchTree<V, A = ()> {
    pub(crate) tree: BinaryTree<Key, V, A>,
}

impl<V, A> Default for BinarySearchTree<V, A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V, A> Clone for BinarySearchTree<V, A>
where
    V: Clone,
    A: Clone,
{
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<V, A> fmt::Debug for BinarySearchTree<V, A>
where
    V: fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinarySearchTree")
            .field("key_type", &self.tree.key_type)
            .field("value_type", &self.tree.value_type)
            .field("nodes", &Nodes(self.root()))
            .finish()
    }
}

impl<V, A> Shape for BinarySearchTree<V, A> {
    type Key = Key;
    type Value = V;
    type Aux = A;

    fn root(&self) -> Option<&Node<Key, V, A>> {
        self.tree.root()
    }
}

impl<V, A> BinarySearchTree<V, A> {
    /// Creates an empty tree. The key and value types are recorded by the first [`put`].
    ///
    /// [`put`]: BinarySearchTree::put
    pub fn empty() -> Self {
        Self {
            tree: BinaryTree::empty(),
        }
    }

    /// Builds a tree from `pairs`.
    ///
    /// With `Some(encoding)` the keys must be exactly that traversal of a binary search tree, and
    /// the tree built is the one they describe; otherwise this fails with
    /// [`Error::InvalidEncoding`]. No traversal of a binary search tree repeats a key, so a
    /// repeated key is reported as [`Error::InvalidEncoding`] too, never as
    /// [`Error::DuplicateKey`]. With `None` the pairs may come in any order: they are sorted by
    /// key and arranged into a height-balanced tree, and a repeated key fails with
    /// [`Error::DuplicateKey`].
    ///
    /// Fails with [`Error::InvalidKey`] for a NaN key and [`Error::TypeMismatch`] unless all keys
    /// share one type and all present values share one type. Nothing is allocated unless the
    /// whole sequence is accepted.
    pub fn new<K, I>(pairs: I, encoding: Option<Encoding>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<Key>,
        V: Typed,
        A: Default,
    {
        let mut entries: Vec<(Key, Option<V>)> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();

        for (key, _) in &entries {
            key.validate()?;
        }
        let (key_type, value_type) = check_types(&entries)?;

        debug!(len = entries.len(), ?encoding, "building binary search tree");

        let wiring = match encoding {
            Some(encoding) => {
                let keys: Vec<&Key> = entries.iter().map(|(key, _)| key).collect();
                encoding.wire(&keys)?
            }
            None => {
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
                    return Err(Error::DuplicateKey(pair[0].0.clone()));
                }
                balanced(entries.len())
            }
        };

        let tree = Self {
            tree: BinaryTree {
                root: wiring.assemble(entries),
                key_type,
                value_type,
            },
        };
        tree.assert_ordered();
        Ok(tree)
    }

    /// The type name shared by all keys, once a key has been stored.
    pub fn key_type(&self) -> Option<&'static str> {
        self.tree.key_type
    }

    /// The type name shared by all values, once a value has been stored.
    pub fn value_type(&self) -> Option<&'static str> {
        self.tree.value_type
    }

    /// Looks up the value stored under `key`. A key stored without a value gives `Ok(None)`.
    ///
    /// Fails with [`Error::KeyTypeUndefined`] if no key was ever stored, with
    /// [`Error::TypeMismatch`] if `key` is of a different type than the stored keys and with
    /// [`Error::NotFound`] if no node holds `key`.
    pub fn get(&self, key: impl Into<Key>) -> Result<Option<&V>> {
        let key = key.into();
        let expected = self.tree.key_type.ok_or(Error::KeyTypeUndefined)?;
        expect_type("key", Some(expected), &key)?;

        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Ok(node.value()),
            };
        }

        Err(Error::NotFound(key))
    }

    /// Stores `value` under `key`, overwriting the value of an existing node or attaching a new
    /// leaf.
    ///
    /// The first key (and first present value) stored in an empty tree fixes the key (and value)
    /// type. Fails with [`Error::InvalidKey`] for a NaN key and [`Error::TypeMismatch`] if `key`
    /// or `value` disagrees with the recorded types; the tree is left untouched in both cases.
    pub fn put(&mut self, key: impl Into<Key>, value: Option<V>) -> Result<()>
    where
        V: Typed,
        A: Default,
    {
        let key = key.into();
        key.validate()?;
        let key_type = expect_type("key", self.tree.key_type, &key)?;
        let value_type = match &value {
            Some(value) => Some(expect_type("value", self.tree.value_type, value)?),
            None => self.tree.value_type,
        };

        self.tree.key_type = Some(key_type);
        self.tree.value_type = value_type;
        self.insert(key, value);
        self.assert_ordered();
        Ok(())
    }

    fn insert(&mut self, key: Key, value: Option<V>)
    where
        A: Default,
    {
        let mut slot = &mut self.tree.root;
        loop {
            match slot {
                None => {
                    trace!(%key, "inserting leaf");
                    *slot = Some(Box::new(Node::new(key, value)));
                    return;
                }
                Some(node) => match key.cmp(&node.key) {
                    Ordering::Less => slot = &mut node.left,
                    Ordering::Greater => slot = &mut node.right,
                    Ordering::Equal => {
                        trace!(%key, "overwriting value");
                        node.value = value;
                        return;
                    }
                },
            }
        }
    }

    /// Removes the node holding `key`.
    ///
    /// A node with at most one child is replaced by that child. A node with two children takes
    /// over the key and value of its in-order successor, which is then unlinked in its place; all
    /// other nodes stay where they are.
    ///
    /// Fails with [`Error::TypeMismatch`] if `key` is of a different type than the stored keys and
    /// with [`Error::NotFound`] if no node holds `key`.
    pub fn remove(&mut self, key: impl Into<Key>) -> Result<()> {
        let key = key.into();
        key.validate()?;
        if let Some(expected) = self.tree.key_type {
            expect_type("key", Some(expected), &key)?;
        }

        let mut slot = &mut self.tree.root;
        loop {
            match slot.as_deref().map(|node| key.cmp(&node.key)) {
                None => return Err(Error::NotFound(key)),
                Some(Ordering::Equal) => break,
                Some(Ordering::Less) => {
                    if let Some(node) = slot {
                        slot = &mut node.left;
                    }
                }
                Some(Ordering::Greater) => {
                    if let Some(node) = slot {
                        slot = &mut node.right;
                    }
                }
            }
        }

        let has_two_children = slot
            .as_deref()
            .map_or(false, |node| node.left.is_some() && node.right.is_some());

        if has_two_children {
            if let Some(target) = slot.as_mut() {
                if let Some(successor) = detach_min(&mut target.right) {
                    trace!(%key, successor = %successor.key, "splicing in successor");
                    let Node { key, value, .. } = *successor;
                    target.key = key;
                    target.value = value;
                }
            }
        } else if let Some(mut target) = slot.take() {
            trace!(%key, "unlinking node");
            *slot = target.left.take().or(target.right.take());
        }

        self.assert_ordered();
        Ok(())
    }

    /// A deep copy of the tree. The copy shares no nodes with `self`.
    pub fn copy(&self) -> Self
    where
        V: Clone,
        A: Clone,
    {
        Self {
            tree: self.tree.copy(),
        }
    }

    fn assert_ordered(&self) {
        if cfg!(debug_assertions) {
            let keys: Vec<&Key> = self.traverse_in_order().into_iter().map(|(k, _)| k).collect();
            assert!(is_increasing(&keys), "keys are out of order");
        }
    }
}

/// Unlinks the leftmost node under `slot`, hanging its right subtree in its place.
fn detach_min<V, A>(mut slot: &mut Link<Key, V, A>) -> Link<Key, V, A> {
    while slot.as_deref().map_or(false, |node| node.left.is_some()) {
        if let Some(node) = slot {
            slot = &mut node.left;
        }
    }

    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}
