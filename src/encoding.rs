//! Flat encodings of binary search trees.
//!
//! A sequence of distinct keys in level, pre, or post order determines exactly one binary search
//! tree. Each order here gets a single `O(n)` replay that checks the sequence and, at the same
//! time, works out the parent of every key. In-order sequences don't pin down a shape, so they are
//! wired into the height-balanced tree obtained by repeatedly splitting at the median.
//!
//! Replays only produce a [`Wiring`] of positions; no node exists until the whole sequence has
//! been accepted.

use std::fmt;

use crate::containers::{Queue, Stack};
use crate::error::{Error, Result};
use crate::node::Wiring;

/// The traversal order a flat key sequence is claimed to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Breadth first, left to right.
    LevelOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, node, right subtree. Any strictly increasing sequence qualifies.
    InOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::LevelOrder => "level-order",
            Encoding::PreOrder => "pre-order",
            Encoding::InOrder => "in-order",
            Encoding::PostOrder => "post-order",
        })
    }
}

impl Encoding {
    /// Checks that `keys` is this traversal of some binary search tree with distinct keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Encoding;
    ///
    /// assert!(Encoding::PreOrder.validate(&[5, 3, 1, 4, 6]).is_ok());
    /// // 1 comes after 4, but 4 already closed off everything below 3.
    /// assert!(Encoding::PreOrder.validate(&[5, 3, 4, 1, 6, 10]).is_err());
    /// ```
    pub fn validate<K: Ord>(self, keys: &[K]) -> Result<()> {
        self.wire(keys).map(drop)
    }

    /// Replays `keys` in this order, linking every position to its parent.
    pub(crate) fn wire<K: Ord>(self, keys: &[K]) -> Result<Wiring> {
        let wiring = match self {
            Encoding::LevelOrder => level_order(keys),
            Encoding::PreOrder => pre_order(keys),
            Encoding::InOrder => is_increasing(keys).then(|| balanced(keys.len())),
            Encoding::PostOrder => post_order(keys),
        };
        wiring.ok_or(Error::InvalidEncoding(self))
    }
}

/// Whether every key is strictly greater than the one before it.
pub(crate) fn is_increasing<K: Ord>(keys: &[K]) -> bool {
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

/// Pre-order replay.
///
/// `open` holds the keys still waiting for a right child, decreasing towards the top. A new key
/// pops every open key smaller than itself; the last one popped is its parent (as right child) and
/// becomes the lower bound for everything that follows. If nothing is popped, it is the left child
/// of the top.
fn pre_order<K: Ord>(keys: &[K]) -> Option<Wiring> {
    let mut wiring = Wiring::new(keys.len());
    let mut open: Stack<usize> = Stack::new();
    let mut lower: Option<usize> = None;

    for (position, key) in keys.iter().enumerate() {
        if lower.map_or(false, |lower| *key <= keys[lower]) {
            return None;
        }

        let mut parent = None;
        while let Ok(&top) = open.top() {
            if keys[top] < *key {
                parent = open.pop().ok();
            } else {
                break;
            }
        }

        // Everything left open is at least `key`; an equal key is a duplicate.
        if open.top().map_or(false, |&top| keys[top] == *key) {
            return None;
        }

        match (parent, open.top()) {
            (Some(parent), _) => {
                lower = Some(parent);
                wiring.attach_right(parent, position);
            }
            (None, Ok(&top)) => wiring.attach_left(top, position),
            (None, Err(_)) => wiring.set_root(position),
        }

        open.push(position);
    }

    Some(wiring)
}

/// Post-order replay: pre-order of the mirrored tree, read from the back.
fn post_order<K: Ord>(keys: &[K]) -> Option<Wiring> {
    let mut wiring = Wiring::new(keys.len());
    let mut open: Stack<usize> = Stack::new();
    let mut upper: Option<usize> = None;

    for (position, key) in keys.iter().enumerate().rev() {
        if upper.map_or(false, |upper| *key >= keys[upper]) {
            return None;
        }

        let mut parent = None;
        while let Ok(&top) = open.top() {
            if keys[top] > *key {
                parent = open.pop().ok();
            } else {
                break;
            }
        }

        if open.top().map_or(false, |&top| keys[top] == *key) {
            return None;
        }

        match (parent, open.top()) {
            (Some(parent), _) => {
                upper = Some(parent);
                wiring.attach_left(parent, position);
            }
            (None, Ok(&top)) => wiring.attach_right(top, position),
            (None, Err(_)) => wiring.set_root(position),
        }

        open.push(position);
    }

    Some(wiring)
}

/// A node waiting for children during the level-order replay, with the open interval its
/// children's keys must fall in. `None` bounds are unbounded.
struct Span {
    node: usize,
    min: Option<usize>,
    max: Option<usize>,
}

/// Level-order replay.
///
/// Nodes are dequeued in the order their children must appear. The next key becomes the left
/// child of the dequeued node if it lies between the node's lower bound and the node, then the
/// following key becomes the right child if it lies between the node and its upper bound. Keys
/// left over once the queue runs dry fit nowhere.
fn level_order<K: Ord>(keys: &[K]) -> Option<Wiring> {
    let mut wiring = Wiring::new(keys.len());
    if keys.is_empty() {
        return Some(wiring);
    }

    let within = |key: &K, min: Option<usize>, max: Option<usize>| {
        min.map_or(true, |min| keys[min] < *key) && max.map_or(true, |max| *key < keys[max])
    };

    wiring.set_root(0);
    let mut queue = Queue::new();
    queue.enqueue(Span {
        node: 0,
        min: None,
        max: None,
    });

    let mut next = 1;
    while next < keys.len() {
        let span = queue.dequeue().ok()?;

        if within(&keys[next], span.min, Some(span.node)) {
            wiring.attach_left(span.node, next);
            queue.enqueue(Span {
                node: next,
                min: span.min,
                max: Some(span.node),
            });
            next += 1;
        }

        if next < keys.len() && within(&keys[next], Some(span.node), span.max) {
            wiring.attach_right(span.node, next);
            queue.enqueue(Span {
                node: next,
                min: Some(span.node),
                max: span.max,
            });
            next += 1;
        }
    }

    Some(wiring)
}

/// An inclusive range of sorted positions whose median `node` has already been attached.
struct Range {
    node: usize,
    min: usize,
    max: usize,
}

/// Wires `len` sorted positions into a height-balanced tree.
///
/// Each range is split at its median, rounding up on the left half and down on the right half,
/// so the same length always gives the same shape.
pub(crate) fn balanced(len: usize) -> Wiring {
    let mut wiring = Wiring::new(len);
    if len == 0 {
        return wiring;
    }

    let root = len / 2;
    wiring.set_root(root);

    let mut queue = Queue::new();
    queue.enqueue(Range {
        node: root,
        min: 0,
        max: len - 1,
    });

    while let Ok(range) = queue.dequeue() {
        if range.node > range.min {
            let max = range.node - 1;
            let left = (range.min + max + 1) / 2;
            wiring.attach_left(range.node, left);
            queue.enqueue(Range {
                node: left,
                min: range.min,
                max,
            });
        }

        if range.node < range.max {
            let min = range.node + 1;
            let right = (min + range.max) / 2;
            wiring.attach_right(range.node, right);
            queue.enqueue(Range {
                node: right,
                min,
                max: range.max,
            });
        }
    }

    wiring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_tree::{BinaryTree, Shape};

    /// Builds the tree an accepted sequence describes, keyed by the sequence itself.
    fn build(encoding: Encoding, keys: &[i64]) -> BinaryTree<i64, ()> {
        let wiring = encoding.wire(keys).expect("valid sequence");
        BinaryTree {
            root: wiring.assemble(keys.iter().map(|&k| (k, None)).collect()),
            key_type: None,
            value_type: None,
        }
    }

    fn keys(entries: Vec<(&i64, Option<&()>)>) -> Vec<i64> {
        entries.into_iter().map(|(k, _)| *k).collect()
    }

    const LEVEL: [i64; 15] = [8, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7, 9, 11, 13, 15];
    const PRE: [i64; 15] = [8, 4, 2, 1, 3, 6, 5, 7, 12, 10, 9, 11, 14, 13, 15];
    const POST: [i64; 15] = [1, 3, 2, 5, 7, 6, 4, 9, 11, 10, 13, 15, 14, 12, 8];

    #[test]
    fn perfect_tree_in_every_order() {
        for (encoding, sequence) in [
            (Encoding::LevelOrder, LEVEL),
            (Encoding::PreOrder, PRE),
            (Encoding::PostOrder, POST),
        ] {
            let tree = build(encoding, &sequence);
            assert_eq!(keys(tree.traverse_level_order()), LEVEL);
            assert_eq!(keys(tree.traverse_pre_order()), PRE);
            assert_eq!(keys(tree.traverse_post_order()), POST);
            assert_eq!(keys(tree.traverse_in_order()), (1..=15).collect::<Vec<_>>());
        }

        let tree = build(Encoding::InOrder, &(1..=15).collect::<Vec<_>>());
        assert_eq!(keys(tree.traverse_level_order()), LEVEL);
    }

    #[test]
    fn lopsided_shapes_round_trip() {
        // 10 -> (5, 20), 5 -> (_, 7), 7 -> (6, _), 20 -> (_, 30), 30 -> (25, _)
        let level = [10, 5, 20, 7, 30, 6, 25];
        let pre = [10, 5, 7, 6, 20, 30, 25];
        let post = [6, 7, 5, 25, 30, 20, 10];

        let tree = build(Encoding::LevelOrder, &level);
        assert_eq!(keys(tree.traverse_pre_order()), pre);
        assert_eq!(keys(tree.traverse_post_order()), post);

        let tree = build(Encoding::PreOrder, &pre);
        assert_eq!(keys(tree.traverse_level_order()), level);

        let tree = build(Encoding::PostOrder, &post);
        assert_eq!(keys(tree.traverse_level_order()), level);
    }

    #[test]
    fn degenerate_chains() {
        let ascending = [1, 2, 3, 4];
        let descending = [4, 3, 2, 1];
        for encoding in [Encoding::LevelOrder, Encoding::PreOrder] {
            assert_eq!(build(encoding, &ascending).height(), 3);
            assert_eq!(build(encoding, &descending).height(), 3);
        }
        assert_eq!(build(Encoding::PostOrder, &ascending).height(), 3);
        assert_eq!(build(Encoding::InOrder, &ascending).height(), 2);
    }

    #[test]
    fn pre_order_rejects_key_below_closed_ancestor() {
        assert_eq!(
            Encoding::PreOrder.validate(&[5, 3, 4, 1, 6, 10]),
            Err(Error::InvalidEncoding(Encoding::PreOrder))
        );
        assert!(Encoding::PreOrder.validate(&[5, 3, 1, 4, 6, 10]).is_ok());
    }

    #[test]
    fn post_order_rejects_key_above_closed_ancestor() {
        // 6 belongs to 5's right subtree, so it cannot come before 3 and 4.
        assert!(Encoding::PostOrder.validate(&[1, 4, 3, 6, 7, 5]).is_ok());
        assert_eq!(
            Encoding::PostOrder.validate(&[1, 6, 3, 4, 7, 5]),
            Err(Error::InvalidEncoding(Encoding::PostOrder))
        );
    }

    #[test]
    fn level_order_rejects_keys_outside_every_interval() {
        // 3 is the right child of 2 and has to come before any child of 8.
        assert!(Encoding::LevelOrder.validate(&[5, 2, 8, 1, 3, 9]).is_ok());
        assert!(Encoding::LevelOrder.validate(&[5, 2, 8, 1, 6]).is_ok());
        assert_eq!(
            Encoding::LevelOrder.validate(&[5, 2, 8, 1, 9, 3]),
            Err(Error::InvalidEncoding(Encoding::LevelOrder))
        );
        assert!(Encoding::LevelOrder.validate(&[5, 8, 2]).is_err());
    }

    #[test]
    fn in_order_must_strictly_increase() {
        assert!(Encoding::InOrder.validate(&[1, 2, 3]).is_ok());
        assert!(Encoding::InOrder.validate(&[1, 3, 2]).is_err());
    }

    #[test]
    fn duplicates_are_rejected_everywhere() {
        for encoding in [
            Encoding::LevelOrder,
            Encoding::PreOrder,
            Encoding::InOrder,
            Encoding::PostOrder,
        ] {
            assert_eq!(
                encoding.validate(&[2, 2]),
                Err(Error::InvalidEncoding(encoding))
            );
            assert!(encoding.validate(&[4, 2, 6, 4]).is_err());
        }
    }

    #[test]
    fn empty_and_single() {
        let empty: [i64; 0] = [];
        for encoding in [
            Encoding::LevelOrder,
            Encoding::PreOrder,
            Encoding::InOrder,
            Encoding::PostOrder,
        ] {
            assert!(encoding.validate(&empty).is_ok());
            assert_eq!(build(encoding, &[7]).height(), 0);
        }
    }

    #[test]
    fn balanced_rounds_left_up_and_right_down() {
        let tree = build(Encoding::InOrder, &[1, 2, 3, 4]);
        // root 3 (index 2), left 2 (ceil of 0..=1), right 4; 1 under 2
        assert_eq!(keys(tree.traverse_level_order()), [3, 2, 4, 1]);

        let tree = build(Encoding::InOrder, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(keys(tree.traverse_level_order()), [4, 2, 5, 1, 3, 6]);
    }
}
