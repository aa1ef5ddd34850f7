//! Shape-only binary trees.
//!
//! [`Shape`] holds every operation that only looks at how nodes are linked (size, height and the
//! traversals) and is shared by all trees in the crate. [`BinaryTree`] is the plain tree: it keeps
//! its entries in the order they were given, laid out as a complete binary tree.
//!
//! # Examples
//!
//! ```
//! use bintree::{BinaryTree, Shape};
//!
//! let tree: BinaryTree<&str, i32> =
//!     BinaryTree::new(vec![("first", Some(1)), ("second", Some(2)), ("third", Some(3))]).unwrap();
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.height(), 1);
//!
//! let in_order: Vec<_> = tree.traverse_in_order().into_iter().map(|(k, _)| *k).collect();
//! assert_eq!(in_order, ["second", "first", "third"]);
//! ```

use std::fmt;
use std::ops::ControlFlow;
use std::ptr;

use tracing::debug;

use crate::containers::{Queue, Stack};
use crate::error::{Error, Result};
use crate::key::Typed;
use crate::node::{dismantle, Entry, Link, Node, Wiring};
use crate::walk::{self, same, walk, Visit};

/// Operations that depend only on the shape of a tree.
pub trait Shape {
    /// The key type.
    type Key;
    /// The value type.
    type Value;
    /// Per-node bookkeeping kept by the tree.
    type Aux;

    /// The root node, if the tree is not empty.
    fn root(&self) -> Option<&Node<Self::Key, Self::Value, Self::Aux>>;

    /// The number of nodes.
    fn len(&self) -> usize {
        walk::count(self.root())
    }

    /// Whether the tree has no nodes.
    fn is_empty(&self) -> bool {
        self.root().is_none()
    }

    /// The number of edges on the longest path from the root to a leaf: `-1` for an empty tree
    /// and `0` for a single node.
    fn height(&self) -> i64 {
        let mut height = -1;
        let mut level: Queue<&Node<Self::Key, Self::Value, Self::Aux>> =
            self.root().into_iter().collect();

        while !level.is_empty() {
            height += 1;
            let mut next_level = Queue::new();

            while let Ok(node) = level.dequeue() {
                if let Some(left) = node.left() {
                    next_level.enqueue(left);
                }
                if let Some(right) = node.right() {
                    next_level.enqueue(right);
                }
            }

            level = next_level;
        }

        height
    }

    /// Entries level by level, left to right, starting at the root.
    fn traverse_level_order(&self) -> Vec<Entry<'_, Self::Key, Self::Value>> {
        let mut entries = Vec::new();
        let mut queue: Queue<&Node<Self::Key, Self::Value, Self::Aux>> =
            self.root().into_iter().collect();

        while let Ok(node) = queue.dequeue() {
            entries.push(node.entry());

            if let Some(left) = node.left() {
                queue.enqueue(left);
            }
            if let Some(right) = node.right() {
                queue.enqueue(right);
            }
        }

        entries
    }

    /// Entries with every node before its subtrees.
    fn traverse_pre_order(&self) -> Vec<Entry<'_, Self::Key, Self::Value>> {
        walk::collect(self.root(), Visit::First)
            .into_iter()
            .map(Node::entry)
            .collect()
    }

    /// Entries with every node between its left and right subtrees.
    fn traverse_in_order(&self) -> Vec<Entry<'_, Self::Key, Self::Value>> {
        walk::collect(self.root(), Visit::Middle)
            .into_iter()
            .map(Node::entry)
            .collect()
    }

    /// Entries with every node after its subtrees.
    fn traverse_post_order(&self) -> Vec<Entry<'_, Self::Key, Self::Value>> {
        walk::collect(self.root(), Visit::Last)
            .into_iter()
            .map(Node::entry)
            .collect()
    }

    /// The outline of the tree: the root, the left edge top-down, every leaf left to right and
    /// finally the right edge bottom-up. No node is reported twice.
    ///
    /// The left edge is the path the walk takes from the root's left child to the first leaf, so a
    /// root without a left child has none; the right edge is the chain of right children hanging
    /// off the root.
    fn traverse_boundaries(&self) -> Vec<Entry<'_, Self::Key, Self::Value>> {
        let root = match self.root() {
            Some(root) => root,
            None => return Vec::new(),
        };

        let mut corner = root;
        while let Some(right) = corner.right() {
            corner = right;
        }

        let mut entries = Vec::new();
        // Without a left child the walk's way down is the right edge, reported on the way up.
        let mut on_left_edge = root.left().is_some();
        let mut on_right_edge = false;

        let _ = walk::<_, _, _, (), _>(Some(root), |visit, node| {
            let is_root = ptr::eq(node, root);
            match visit {
                Visit::First if is_root || on_left_edge => entries.push(node.entry()),
                Visit::Last if !is_root => {
                    // Everything left after the corner is the corner's ancestors.
                    if ptr::eq(node, corner) {
                        on_right_edge = true;
                    }

                    if node.is_leaf() {
                        // The first leaf closes the left edge and was reported on the way down.
                        if !on_left_edge {
                            entries.push(node.entry());
                        }
                        on_left_edge = false;
                    } else if on_right_edge {
                        entries.push(node.entry());
                    }
                }
                _ => {}
            }
            ControlFlow::Continue(())
        });

        entries
    }
}

/// Returns a deep copy of the subtree under `root`.
///
/// The walk over the source is mirrored by a stack of copies: a copy is made when the walk first
/// reaches a node and is hung under its parent's copy when the walk leaves it again.
pub(crate) fn copy_subtree<K, V, A>(root: Option<&Node<K, V, A>>) -> Link<K, V, A>
where
    K: Clone,
    V: Clone,
    A: Clone,
{
    let mut copies: Stack<(Box<Node<K, V, A>>, &Node<K, V, A>)> = Stack::new();
    let mut copied_root = None;

    let _ = walk::<_, _, _, (), _>(root, |visit, node| {
        match visit {
            Visit::First => copies.push((
                Box::new(Node {
                    key: node.key.clone(),
                    value: node.value.clone(),
                    left: None,
                    right: None,
                    aux: node.aux.clone(),
                }),
                node,
            )),
            Visit::Middle => {}
            Visit::Last => {
                if let Ok((copy, source)) = copies.pop() {
                    match copies.top_mut() {
                        Ok((parent_copy, parent)) if same(parent.left(), Some(source)) => {
                            parent_copy.left = Some(copy)
                        }
                        Ok((parent_copy, _)) => parent_copy.right = Some(copy),
                        Err(_) => copied_root = Some(copy),
                    }
                }
            }
        }
        ControlFlow::Continue(())
    });

    copied_root
}

/// Checks that all keys share one type and all present values share one type. Returns those
/// types.
pub(crate) fn check_types<K, V>(
    entries: &[(K, Option<V>)],
) -> Result<(Option<&'static str>, Option<&'static str>)>
where
    K: Typed,
    V: Typed,
{
    let mut key_type = None;
    let mut value_type = None;

    for (key, value) in entries {
        key_type = Some(expect_type("key", key_type, key)?);
        if let Some(value) = value {
            value_type = Some(expect_type("value", value_type, value)?);
        }
    }

    Ok((key_type, value_type))
}

/// Checks `item` against the `recorded` type, if there is one, and returns the type to record.
pub(crate) fn expect_type<T: Typed>(
    what: &'static str,
    recorded: Option<&'static str>,
    item: &T,
) -> Result<&'static str> {
    let found = item.type_name();
    match recorded {
        Some(expected) if expected != found => Err(Error::TypeMismatch {
            what,
            expected,
            found,
        }),
        _ => Ok(found),
    }
}

/// Formats every node under `root` in pre-order, one list entry per node.
pub(crate) struct Nodes<'a, K, V, A>(pub(crate) Option<&'a Node<K, V, A>>);

impl<K, V, A> fmt::Debug for Nodes<'_, K, V, A>
where
    K: fmt::Debug,
    V: fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(walk::collect(self.0, Visit::First))
            .finish()
    }
}

/// A binary tree with no ordering between keys.
///
/// The entries handed to [`BinaryTree::new`] are laid out as a complete binary tree: the children
/// of the entry at index `i` are the entries at `2i + 1` and `2i + 2`.
pub struct BinaryTree<K, V, A = ()> {
    pub(crate) root: Link<K, V, A>,
    pub(crate) key_type: Option<&'static str>,
    pub(crate) value_type: Option<&'static str>,
}

impl<K, V, A> Default for BinaryTree<K, V, A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, V, A> Drop for BinaryTree<K, V, A> {
    fn drop(&mut self) {
        dismantle(&mut self.root);
    }
}

impl<K, V, A> Clone for BinaryTree<K, V, A>
where
    K: Clone,
    V: Clone,
    A: Clone,
{
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<K, V, A> fmt::Debug for BinaryTree<K, V, A>
where
    K: fmt::Debug,
    V: fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTree")
            .field("key_type", &self.key_type)
            .field("value_type", &self.value_type)
            .field("nodes", &Nodes(self.root()))
            .finish()
    }
}

impl<K, V, A> Shape for BinaryTree<K, V, A> {
    type Key = K;
    type Value = V;
    type Aux = A;

    fn root(&self) -> Option<&Node<K, V, A>> {
        self.root.as_deref()
    }
}

impl<K, V, A> BinaryTree<K, V, A> {
    /// Creates an empty tree with no recorded key or value type.
    pub fn empty() -> Self {
        Self {
            root: None,
            key_type: None,
            value_type: None,
        }
    }

    /// Builds a tree from `pairs` laid out as a complete binary tree.
    ///
    /// Fails with [`Error::TypeMismatch`] unless all keys share one type and all present values
    /// share one type.
    pub fn new<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Typed,
        V: Typed,
        A: Default,
    {
        let entries: Vec<_> = pairs.into_iter().collect();
        let (key_type, value_type) = check_types(&entries)?;

        let len = entries.len();
        debug!(len, "building binary tree from complete layout");

        let mut wiring = Wiring::new(len);
        if len > 0 {
            wiring.set_root(0);
        }
        for parent in 0..len {
            let left = 2 * parent + 1;
            if left < len {
                wiring.attach_left(parent, left);
            }
            if left + 1 < len {
                wiring.attach_right(parent, left + 1);
            }
        }

        Ok(Self {
            root: wiring.assemble(entries),
            key_type,
            value_type,
        })
    }

    /// Like [`BinaryTree::new`] for input whose keys may be missing. Fails with
    /// [`Error::NullKey`] if any key is `None`.
    pub fn from_nullable<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Option<K>, Option<V>)>,
        K: Typed,
        V: Typed,
        A: Default,
    {
        let entries = pairs
            .into_iter()
            .map(|(key, value)| key.map(|key| (key, value)).ok_or(Error::NullKey))
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries)
    }

    /// The type name shared by all keys, once a key has been stored.
    pub fn key_type(&self) -> Option<&'static str> {
        self.key_type
    }

    /// The type name shared by all values, once a value has been stored.
    pub fn value_type(&self) -> Option<&'static str> {
        self.value_type
    }

    /// A deep copy of the tree. The copy shares no nodes with `self`.
    pub fn copy(&self) -> Self
    where
        K: Clone,
        V: Clone,
        A: Clone,
    {
        Self {
            root: copy_subtree(self.root.as_deref()),
            key_type: self.key_type,
            value_type: self.value_type,
        }
    }
}
