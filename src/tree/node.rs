//! Tree nodes
//!
//! Each node exclusively owns its record and its children. Dropping a node
//! releases its whole subtree.

use super::Key;

/// Owned, nullable child link
pub type Link<N> = Option<Box<N>>;

/// Read-only view shared by both node kinds.
///
/// Traversal and min/max walks are written once against this trait.
pub trait BinaryNode {
    /// Record payload type
    type Value;

    /// The node key
    fn key(&self) -> Key;

    /// The record stored in this node
    fn value(&self) -> &Self::Value;

    /// Left child, if any
    fn left(&self) -> Option<&Self>;

    /// Right child, if any
    fn right(&self) -> Option<&Self>;

    /// True when the node has no children
    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }
}

/// Smallest-key node of the subtree rooted at `node`
pub fn leftmost<N: BinaryNode>(node: &N) -> &N {
    let mut current = node;
    while let Some(left) = current.left() {
        current = left;
    }
    current
}

/// Largest-key node of the subtree rooted at `node`
pub fn rightmost<N: BinaryNode>(node: &N) -> &N {
    let mut current = node;
    while let Some(right) = current.right() {
        current = right;
    }
    current
}

/// Plain BST node
#[derive(Debug)]
pub struct Node<V> {
    pub(crate) key: Key,
    pub(crate) value: V,
    pub(crate) left: Link<Node<V>>,
    pub(crate) right: Link<Node<V>>,
}

impl<V> Node<V> {
    /// Creates a detached leaf
    pub fn new(key: Key, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

impl<V> BinaryNode for Node<V> {
    type Value = V;

    fn key(&self) -> Key {
        self.key
    }

    fn value(&self) -> &V {
        &self.value
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// AVL node with cached subtree height.
///
/// `height` is 1 for a leaf and always equals
/// `1 + max(height(left), height(right))` once the tree operation that
/// touched the node returns.
#[derive(Debug)]
pub struct AvlNode<V> {
    pub(crate) key: Key,
    pub(crate) value: V,
    pub(crate) height: usize,
    pub(crate) left: Link<AvlNode<V>>,
    pub(crate) right: Link<AvlNode<V>>,
}

impl<V> AvlNode<V> {
    /// Creates a detached leaf of height 1
    pub fn new(key: Key, value: V) -> Self {
        Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Cached height of the subtree rooted here
    pub fn height(&self) -> usize {
        self.height
    }

    /// Recompute `height` from the children
    pub fn update_height(&mut self) {
        self.height = 1 + std::cmp::max(height_of(&self.left), height_of(&self.right));
    }

    /// height(left) - height(right)
    pub fn balance_factor(&self) -> isize {
        height_of(&self.left) as isize - height_of(&self.right) as isize
    }
}

impl<V> BinaryNode for AvlNode<V> {
    type Value = V;

    fn key(&self) -> Key {
        self.key
    }

    fn value(&self) -> &V {
        &self.value
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// Cached height of an AVL link (0 when empty)
pub fn height_of<V>(link: &Link<AvlNode<V>>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Balance factor of an AVL link (0 when empty)
pub fn balance_of<V>(link: &Link<AvlNode<V>>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_leaf() {
        let node = Node::new(7, "seven");
        assert!(node.is_leaf());
        assert_eq!(node.key(), 7);
        assert_eq!(*node.value(), "seven");
    }

    #[test]
    fn test_avl_height_bookkeeping() {
        let mut root = AvlNode::new(10, ());
        assert_eq!(root.height(), 1);
        assert_eq!(root.balance_factor(), 0);

        let mut left = AvlNode::new(5, ());
        left.left = Some(Box::new(AvlNode::new(1, ())));
        left.update_height();
        root.left = Some(Box::new(left));
        root.update_height();

        assert_eq!(root.height(), 3);
        assert_eq!(root.balance_factor(), 2);
        assert_eq!(balance_of(&root.left), 1);
        assert_eq!(height_of::<()>(&None), 0);
    }

    #[test]
    fn test_leftmost_and_rightmost() {
        let mut root = Node::new(10, ());
        let mut left = Node::new(5, ());
        left.left = Some(Box::new(Node::new(2, ())));
        root.left = Some(Box::new(left));
        root.right = Some(Box::new(Node::new(20, ())));

        assert_eq!(leftmost(&root).key(), 2);
        assert_eq!(rightmost(&root).key(), 20);
    }
}
