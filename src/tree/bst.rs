//! Unbalanced binary search tree
//!
//! No rebalancing ever happens: the shape depends only on insertion and
//! deletion order, and strictly increasing keys produce a linked chain.
//! All walks are iterative for that reason, including drop.

use std::cmp::Ordering;
use std::fmt;

use super::errors::{TreeError, TreeResult};
use super::node::{leftmost, rightmost, BinaryNode, Link, Node};
use super::traversal::{self, TraversalOrder};
use super::{Key, SearchTree, TreeInfo, TreeKind};

/// Plain BST keyed by document id
pub struct OrderedTree<V> {
    root: Link<Node<V>>,
    len: usize,
}

impl<V> fmt::Debug for OrderedTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("len", &self.len)
            .field("root", &self.root.as_ref().map(|node| node.key()))
            .finish()
    }
}

impl<V> Default for OrderedTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedTree<V> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Root node, for shape inspection
    pub fn root(&self) -> Option<&Node<V>> {
        self.root.as_deref()
    }

    fn find_node(&self, key: Key) -> Option<&Node<V>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    fn find_node_mut(&mut self, key: Key) -> Option<&mut Node<V>> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// Unlink the leftmost node strictly below `root`.
    ///
    /// Returns `None` when `root` has no left child, in which case `root`
    /// itself is the minimum of its subtree.
    fn take_leftmost_below(root: &mut Box<Node<V>>) -> Option<Box<Node<V>>> {
        let mut parent: &mut Node<V> = root;
        loop {
            let descend = match parent.left.as_deref() {
                Some(child) => child.left.is_some(),
                None => return None,
            };
            if !descend {
                break;
            }
            match parent.left.as_deref_mut() {
                Some(child) => parent = child,
                None => return None,
            }
        }
        let mut min = parent.left.take()?;
        parent.left = min.right.take();
        Some(min)
    }

    /// Rebuild the position of a removed two-child node from its subtrees.
    ///
    /// The in-order successor (leftmost node of `right`) has no left child,
    /// so unlinking it is a leaf or one-child removal. It then takes the
    /// removed node's place with both subtrees attached.
    fn promote_successor(left: Box<Node<V>>, mut right: Box<Node<V>>) -> Box<Node<V>> {
        let (mut successor, rest) = match Self::take_leftmost_below(&mut right) {
            Some(min) => (min, Some(right)),
            None => {
                let rest = right.right.take();
                (right, rest)
            }
        };
        successor.left = Some(left);
        successor.right = rest;
        successor
    }
}

impl<V> SearchTree<V> for OrderedTree<V> {
    fn kind(&self) -> TreeKind {
        TreeKind::Bst
    }

    fn insert(&mut self, key: Key, value: V) -> TreeResult<()> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return Err(TreeError::duplicate_key(key)),
            };
        }
        *link = Some(Box::new(Node::new(key, value)));
        self.len += 1;
        Ok(())
    }

    fn find(&self, key: Key) -> TreeResult<&V> {
        self.find_node(key)
            .map(|node| &node.value)
            .ok_or_else(|| TreeError::not_found(key))
    }

    fn update<F>(&mut self, key: Key, apply: F) -> TreeResult<&V>
    where
        F: FnOnce(&mut V),
    {
        let node = self
            .find_node_mut(key)
            .ok_or_else(|| TreeError::not_found(key))?;
        apply(&mut node.value);
        Ok(&node.value)
    }

    fn delete(&mut self, key: Key) -> TreeResult<V> {
        let mut link = &mut self.root;
        loop {
            let ordering = match link.as_deref() {
                Some(node) => key.cmp(&node.key),
                None => return Err(TreeError::not_found(key)),
            };
            match ordering {
                Ordering::Equal => break,
                Ordering::Less => {
                    if let Some(node) = link {
                        link = &mut node.left;
                    }
                }
                Ordering::Greater => {
                    if let Some(node) = link {
                        link = &mut node.right;
                    }
                }
            }
        }

        let target = link.take().ok_or_else(|| TreeError::not_found(key))?;
        let Node {
            value, left, right, ..
        } = *target;

        *link = match (left, right) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => Some(Self::promote_successor(left, right)),
        };
        self.len -= 1;
        Ok(value)
    }

    fn traverse(&self, order: TraversalOrder) -> Vec<&V> {
        traversal::collect(self.root.as_deref(), order)
    }

    fn count(&self) -> usize {
        self.len
    }

    fn height(&self) -> usize {
        traversal::measure_height(self.root.as_deref())
    }

    fn root_key(&self) -> Option<Key> {
        self.root.as_ref().map(|node| node.key)
    }

    fn min_key(&self) -> Option<Key> {
        self.root.as_deref().map(|root| leftmost(root).key())
    }

    fn max_key(&self) -> Option<Key> {
        self.root.as_deref().map(|root| rightmost(root).key())
    }

    fn clear(&mut self) {
        let mut stack: Vec<Box<Node<V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    fn info(&self) -> TreeInfo {
        let root_balance_factor = self.root.as_deref().map_or(0, |root| {
            traversal::measure_height(root.left()) as isize
                - traversal::measure_height(root.right()) as isize
        });

        TreeInfo {
            kind: TreeKind::Bst,
            size: self.len,
            is_empty: self.root.is_none(),
            height: self.height(),
            root_balance_factor,
            root_document: self.root_key(),
            min_document: self.min_key(),
            max_document: self.max_key(),
            rotations: None,
        }
    }
}

impl<V> Drop for OrderedTree<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[Key]) -> OrderedTree<Key> {
        let mut tree = OrderedTree::new();
        for &key in keys {
            tree.insert(key, key).unwrap();
        }
        tree
    }

    fn in_order(tree: &OrderedTree<Key>) -> Vec<Key> {
        tree.traverse(TraversalOrder::In).into_iter().copied().collect()
    }

    fn pre_order(tree: &OrderedTree<Key>) -> Vec<Key> {
        tree.traverse(TraversalOrder::Pre).into_iter().copied().collect()
    }

    #[test]
    fn test_insert_and_find() {
        let tree = tree_of(&[50, 30, 70, 20, 40]);
        assert_eq!(tree.count(), 5);
        assert_eq!(tree.find(40), Ok(&40));
        assert_eq!(tree.find(45), Err(TreeError::not_found(45)));
        assert_eq!(tree.root_key(), Some(50));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut tree = tree_of(&[50, 30, 70]);
        let err = tree.insert(30, 99).unwrap_err();
        assert_eq!(err, TreeError::duplicate_key(30));
        assert_eq!(tree.count(), 3);
        assert_eq!(tree.find(30), Ok(&30));
    }

    #[test]
    fn test_pre_order_reveals_insertion_shape() {
        let tree = tree_of(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(pre_order(&tree), vec![50, 30, 20, 40, 70, 60, 80]);
    }

    #[test]
    fn test_delete_leaf() {
        let mut tree = tree_of(&[50, 30, 70, 20]);
        assert_eq!(tree.delete(20), Ok(20));
        assert_eq!(in_order(&tree), vec![30, 50, 70]);
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn test_delete_one_child_splices() {
        let mut tree = tree_of(&[50, 30, 70, 20]);
        assert_eq!(tree.delete(30), Ok(30));
        assert_eq!(pre_order(&tree), vec![50, 20, 70]);
    }

    #[test]
    fn test_delete_two_children_promotes_successor() {
        let mut tree = tree_of(&[50, 30, 70, 20, 40, 60, 80, 65]);
        assert_eq!(tree.delete(50), Ok(50));

        // 60 is the leftmost node of the right subtree; its right child 65
        // moves up into its old position
        assert_eq!(tree.root_key(), Some(60));
        assert_eq!(pre_order(&tree), vec![60, 30, 20, 40, 70, 65, 80]);
        assert_eq!(in_order(&tree), vec![20, 30, 40, 60, 65, 70, 80]);
        assert_eq!(tree.count(), 7);
    }

    #[test]
    fn test_delete_two_children_successor_is_right_child() {
        let mut tree = tree_of(&[50, 30, 70, 80]);
        assert_eq!(tree.delete(50), Ok(50));
        assert_eq!(pre_order(&tree), vec![70, 30, 80]);
    }

    #[test]
    fn test_delete_missing_key() {
        let mut tree = tree_of(&[50, 30]);
        assert_eq!(tree.delete(99), Err(TreeError::not_found(99)));
        assert_eq!(tree.count(), 2);
    }

    #[test]
    fn test_delete_single_root_empties_tree() {
        let mut tree = tree_of(&[7]);
        assert_eq!(tree.delete(7), Ok(7));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert!(tree.find(7).is_err());
    }

    #[test]
    fn test_update_in_place() {
        let mut tree = tree_of(&[50, 30, 70]);
        let updated = tree.update(30, |value| *value += 1).unwrap();
        assert_eq!(*updated, 31);
        assert_eq!(pre_order(&tree), vec![50, 31, 70]);
        assert!(tree.update(31, |_| {}).is_err());
    }

    #[test]
    fn test_ascending_insert_degenerates() {
        let tree = tree_of(&[1, 2, 3, 4, 5]);
        assert_eq!(tree.height(), 5);
        let info = tree.info();
        assert_eq!(info.root_balance_factor, -4);
        assert_eq!(info.min_document, Some(1));
        assert_eq!(info.max_document, Some(5));
        assert_eq!(info.rotations, None);
    }

    #[test]
    fn test_long_chain_is_stack_safe() {
        let keys: Vec<Key> = (1..=10_000).collect();
        let mut tree = tree_of(&keys);
        assert_eq!(tree.height(), 10_000);
        assert_eq!(in_order(&tree).len(), 10_000);
        assert_eq!(tree.delete(10_000), Ok(10_000));
        assert_eq!(tree.delete(1), Ok(1));
        assert_eq!(tree.height(), 9_998);
        assert_eq!(format!("{tree:?}"), "OrderedTree { len: 9998, root: Some(2) }");
        drop(tree);
    }

    #[test]
    fn test_clear() {
        let mut tree = tree_of(&[3, 1, 2]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.root_key(), None);
        tree.insert(5, 5).unwrap();
        assert_eq!(tree.count(), 1);
    }
}
