//! Depth-first walks without parent pointers.
//!
//! Nodes only know their children, so the walk keeps the path from the root to the current node
//! on an explicit ancestor stack. Where it came from is remembered in `previous`, the last node it
//! left. Comparing `previous` with the parent (top of the stack) and the two children tells the
//! walk which of three situations it is in:
//!
//! 1. `previous` is the parent: the node is reached for the first time, go left.
//! 2. `previous` is the left child (or there is no left child): the left subtree is done, go right.
//! 3. `previous` is the right child (or there is none): both subtrees are done, go back up.
//!
//! Every traversal, count, copy and height computation in the crate is the same walk with a
//! different reaction to these three moments.

use std::ops::ControlFlow;
use std::ptr;

use crate::containers::Stack;
use crate::node::Node;

/// The moment at which a node is reported to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visit {
    /// Reached from the parent, before either subtree. Pre-order.
    First,
    /// Left subtree finished, right subtree not yet entered. In-order.
    Middle,
    /// Both subtrees finished, about to return to the parent. Post-order.
    Last,
}

/// Whether `a` and `b` are the same node (or both absent).
pub(crate) fn same<T>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => ptr::eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Walks the tree under `root` depth first, reporting every node three times (see [`Visit`]).
///
/// The visitor can stop the walk early by returning `ControlFlow::Break`, whose payload is handed
/// back to the caller. Runs in `O(n)` time with `O(height)` extra space.
pub(crate) fn walk<'a, K, V, A, B, F>(root: Option<&'a Node<K, V, A>>, mut visit: F) -> ControlFlow<B>
where
    F: FnMut(Visit, &'a Node<K, V, A>) -> ControlFlow<B>,
{
    let mut ancestors: Stack<&'a Node<K, V, A>> = Stack::new();
    let mut previous: Option<&'a Node<K, V, A>> = None;
    let mut current = root;

    while let Some(node) = current {
        let parent = ancestors.top().ok().copied();

        if same(previous, parent) {
            visit(Visit::First, node)?;

            if let Some(left) = node.left() {
                ancestors.push(node);
                previous = Some(node);
                current = Some(left);
                continue;
            }
        }

        let right = node.right();
        if !same(previous, right) || right.is_none() {
            visit(Visit::Middle, node)?;

            if let Some(right) = right {
                ancestors.push(node);
                previous = Some(node);
                current = Some(right);
                continue;
            }
        }

        visit(Visit::Last, node)?;

        previous = Some(node);
        current = ancestors.pop().ok();
    }

    ControlFlow::Continue(())
}

/// Collects the nodes reported at `at`.
pub(crate) fn collect<'a, K, V, A>(root: Option<&'a Node<K, V, A>>, at: Visit) -> Vec<&'a Node<K, V, A>> {
    let mut nodes = Vec::new();
    let _ = walk::<_, _, _, (), _>(root, |visit, node| {
        if visit == at {
            nodes.push(node);
        }
        ControlFlow::Continue(())
    });
    nodes
}

/// Counts the nodes under `root`, one per ascent.
pub(crate) fn count<K, V, A>(root: Option<&Node<K, V, A>>) -> usize {
    let mut count = 0;
    let _ = walk::<_, _, _, (), _>(root, |visit, _| {
        if visit == Visit::Last {
            count += 1;
        }
        ControlFlow::Continue(())
    });
    count
}
