use bintree::{BinarySearchTree, Error, Key, Node, Shape};

use std::collections::HashSet;

use crate::init_tracing;

fn grown(xs: &[i8]) -> BinarySearchTree<i8> {
    let mut tree = BinarySearchTree::empty();
    for x in xs {
        tree.put(*x, Some(*x)).expect("i8 keys and values");
    }
    tree
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        init_tracing();
        let tree = grown(&xs);

        xs.iter().all(|x| tree.get(*x) == Ok(Some(x)))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = grown(&xs);
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| match tree.get(*x) {
            Err(Error::NotFound(key)) => key == Key::from(*x),
            Err(Error::KeyTypeUndefined) => tree.is_empty(),
            _ => false,
        })
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = grown(&xs);
        for delete in &deletes {
            // Deleting a missing key is an error and changes nothing.
            let _ = tree.remove(*delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        let distinct: HashSet<_> = still_present.iter().collect();
        deletes.iter().all(|x| tree.get(*x).is_err())
            && still_present.iter().all(|x| tree.get(*x) == Ok(Some(x)))
            && tree.len() == distinct.len()
    }
}

quickcheck::quickcheck! {
    fn in_order_is_strictly_increasing(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = grown(&xs);
        for delete in &deletes {
            let _ = tree.remove(*delete);
        }

        let keys: Vec<&Key> = tree.traverse_in_order().into_iter().map(|(k, _)| k).collect();
        keys.windows(2).all(|pair| pair[0] < pair[1])
    }
}

quickcheck::quickcheck! {
    fn boundaries_hold_every_leaf_once(xs: Vec<i8>) -> bool {
        let tree = grown(&xs);
        let boundaries: Vec<&Key> = tree.traverse_boundaries().into_iter().map(|(k, _)| k).collect();
        let distinct: HashSet<&Key> = boundaries.iter().copied().collect();

        let mut leaves = Vec::new();
        let mut pending: Vec<_> = tree.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            match (node.left(), node.right()) {
                (None, None) => leaves.push(node.key()),
                (left, right) => pending.extend(left.into_iter().chain(right)),
            }
        }

        distinct.len() == boundaries.len()
            && boundaries.first().copied() == tree.root().map(|root| root.key())
            && leaves.iter().all(|leaf| distinct.contains(leaf))
    }
}

fn addresses(tree: &BinarySearchTree<i8>) -> HashSet<*const Node<Key, i8>> {
    let mut found = HashSet::new();
    let mut pending: Vec<&Node<Key, i8>> = tree.root().into_iter().collect();
    while let Some(node) = pending.pop() {
        found.insert(node as *const _);
        pending.extend(node.left());
        pending.extend(node.right());
    }
    found
}

fn owned_level_order(tree: &BinarySearchTree<i8>) -> Vec<(Key, Option<i8>)> {
    tree.traverse_level_order()
        .into_iter()
        .map(|(k, v)| (k.clone(), v.copied()))
        .collect()
}

quickcheck::quickcheck! {
    fn copies_are_independent(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let tree = grown(&xs);
        let before = owned_level_order(&tree);

        let mut copy = tree.copy();
        let same_shape = owned_level_order(&copy) == before;
        let shares_no_node = addresses(&tree).is_disjoint(&addresses(&copy));

        for delete in &deletes {
            let _ = copy.remove(*delete);
        }
        let _ = copy.put(0, Some(-1));

        same_shape
            && shares_no_node
            && addresses(&copy).len() == copy.len()
            && owned_level_order(&tree) == before
    }
}
