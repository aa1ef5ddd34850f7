use bintree::{AvlTree, Node, Shape};

use std::collections::HashSet;

use crate::init_tracing;

/// Height computed straight from the shape, for comparison with the stored one.
fn measured<K, V, A>(node: Option<&Node<K, V, A>>) -> i64 {
    node.map_or(-1, |node| 1 + measured(node.left()).max(measured(node.right())))
}

quickcheck::quickcheck! {
    fn built_trees_are_balanced(xs: HashSet<i16>) -> bool {
        init_tracing();
        let tree: AvlTree<i16> =
            AvlTree::new(xs.iter().map(|&x| (x, Some(x))), None).expect("distinct keys");

        tree.find_height_imbalance().is_none()
            && tree.node_heights().len() == xs.len()
            && tree.root().map_or(-1, Node::height) == tree.height()
    }
}

quickcheck::quickcheck! {
    fn recomputed_heights_match_the_shape(xs: HashSet<i16>, more: Vec<i16>) -> bool {
        let mut tree: AvlTree<i16> =
            AvlTree::new(xs.iter().map(|&x| (x, None)), None).expect("distinct keys");
        for x in &more {
            tree.put(*x, Some(*x)).expect("i16 keys and values");
        }
        tree.recompute_heights();

        let mut pending: Vec<_> = tree.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            if node.height() != measured(Some(node)) {
                return false;
            }
            pending.extend(node.left().into_iter().chain(node.right()));
        }

        let copy = tree.copy();
        copy.node_heights() == tree.node_heights()
    }
}

quickcheck::quickcheck! {
    fn imbalance_is_reported_where_it_is(xs: Vec<i16>) -> bool {
        let mut tree: AvlTree<i16> = AvlTree::empty();
        for x in &xs {
            tree.put(*x, None).expect("i16 keys");
        }
        tree.recompute_heights();

        match tree.find_height_imbalance() {
            Some(imbalance) => (imbalance.left_height - imbalance.right_height).abs() > 1,
            None => {
                let mut pending: Vec<_> = tree.root().into_iter().collect();
                while let Some(node) = pending.pop() {
                    if (measured(node.left()) - measured(node.right())).abs() > 1 {
                        return false;
                    }
                    pending.extend(node.left().into_iter().chain(node.right()));
                }
                true
            }
        }
    }
}
