use std::fmt;

/// An owned, possibly absent, child.
pub(crate) type Link<K, V, A> = Option<Box<Node<K, V, A>>>;

/// A borrowed `(key, value)` pair as reported by the traversals.
pub type Entry<'a, K, V> = (&'a K, Option<&'a V>);

/// A node of a binary tree. Every node is owned by exactly one parent (or by the tree, for the
/// root) so the node graph is always a tree.
///
/// `A` is per-node bookkeeping that a tree layer may attach; plain binary and search trees use
/// `()` while [`AvlTree`](crate::AvlTree) stores the subtree [`Height`](crate::Height).
pub struct Node<K, V, A = ()> {
    pub(crate) key: K,
    pub(crate) value: Option<V>,
    pub(crate) left: Link<K, V, A>,
    pub(crate) right: Link<K, V, A>,
    pub(crate) aux: A,
}

impl<K, V, A> Node<K, V, A> {
    pub(crate) fn new(key: K, value: Option<V>) -> Self
    where
        A: Default,
    {
        Self {
            key,
            value,
            left: None,
            right: None,
            aux: A::default(),
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value stored in this node, if any.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// The left child.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The right child.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn entry(&self) -> Entry<'_, K, V> {
        (&self.key, self.value.as_ref())
    }
}

impl<K, V, A> fmt::Debug for Node<K, V, A>
where
    K: fmt::Debug,
    V: fmt::Debug,
    A: fmt::Debug,
{
    /// Children are shown by key only, so formatting never recurses into a subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("aux", &self.aux)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

/// Tears a subtree down one node at a time so that dropping a degenerate (list shaped) tree
/// doesn't recurse once per level.
pub(crate) fn dismantle<K, V, A>(link: &mut Link<K, V, A>) {
    let mut pending: Vec<Box<Node<K, V, A>>> = link.take().into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

/// Parent/child links between the positions of a flat entry sequence.
///
/// Builders decide the shape of a tree by index first and only turn the entries into owned nodes
/// once the whole sequence has been accepted, so a rejected sequence never allocates a node.
pub(crate) struct Wiring {
    left: Vec<Option<usize>>,
    right: Vec<Option<usize>>,
    /// Positions in the order they were attached. Parents always precede their children.
    order: Vec<usize>,
}

impl Wiring {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            left: vec![None; len],
            right: vec![None; len],
            order: Vec::with_capacity(len),
        }
    }

    pub(crate) fn set_root(&mut self, root: usize) {
        debug_assert!(self.order.is_empty(), "root must be the first position");
        self.order.push(root);
    }

    pub(crate) fn attach_left(&mut self, parent: usize, child: usize) {
        debug_assert!(self.left[parent].is_none());
        self.left[parent] = Some(child);
        self.order.push(child);
    }

    pub(crate) fn attach_right(&mut self, parent: usize, child: usize) {
        debug_assert!(self.right[parent].is_none());
        self.right[parent] = Some(child);
        self.order.push(child);
    }

    /// Moves `entries` into nodes and links them, children first.
    pub(crate) fn assemble<K, V, A>(self, entries: Vec<(K, Option<V>)>) -> Link<K, V, A>
    where
        A: Default,
    {
        debug_assert_eq!(self.order.len(), entries.len(), "every entry must be attached");

        let mut slots: Vec<Link<K, V, A>> = entries
            .into_iter()
            .map(|(key, value)| Some(Box::new(Node::new(key, value))))
            .collect();

        for &position in self.order.iter().rev() {
            let left = self.left[position].and_then(|child| slots[child].take());
            let right = self.right[position].and_then(|child| slots[child].take());
            if let Some(node) = slots[position].as_mut() {
                node.left = left;
                node.right = right;
            }
        }

        self.order.first().and_then(|&root| slots[root].take())
    }
}
