//! AVL tree
//!
//! Same contract as [`OrderedTree`](super::OrderedTree), but every insert
//! and delete rebalances the path from the touched node back to the root.
//! Height stays below 1.45 * log2(n + 2), so the recursive helpers here
//! never go deep.

use std::cmp::Ordering;

use super::errors::{TreeError, TreeResult};
use super::node::{balance_of, leftmost, rightmost, AvlNode, BinaryNode, Link};
use super::traversal::{self, TraversalOrder};
use super::{Key, SearchTree, TreeInfo, TreeKind};

/// Height-balanced BST keyed by document id
#[derive(Debug)]
pub struct BalancedTree<V> {
    root: Link<AvlNode<V>>,
    len: usize,
    rotations: u64,
}

impl<V> Default for BalancedTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> BalancedTree<V> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            rotations: 0,
        }
    }

    /// Root node, for shape inspection
    pub fn root(&self) -> Option<&AvlNode<V>> {
        self.root.as_deref()
    }

    /// Balance factor of the root (0 when empty)
    pub fn root_balance_factor(&self) -> isize {
        balance_of(&self.root)
    }

    /// Single rotations performed since creation
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    fn find_node(&self, key: Key) -> Option<&AvlNode<V>> {
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

    fn find_node_mut(&mut self, key: Key) -> Option<&mut AvlNode<V>> {
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

    //      z              y
    //     / \            / \
    //    a   y    =>    z   c
    //       / \        / \
    //      b   c      a   b
    fn rotate_left(&mut self, mut z: Box<AvlNode<V>>) -> Box<AvlNode<V>> {
        let mut y = match z.right.take() {
            Some(y) => y,
            None => return z,
        };
        z.right = y.left.take();
        z.update_height();
        y.left = Some(z);
        y.update_height();
        self.rotations += 1;
        y
    }

    //        z          y
    //       / \        / \
    //      y   c  =>  a   z
    //     / \            / \
    //    a   b          b   c
    fn rotate_right(&mut self, mut z: Box<AvlNode<V>>) -> Box<AvlNode<V>> {
        let mut y = match z.left.take() {
            Some(y) => y,
            None => return z,
        };
        z.left = y.right.take();
        z.update_height();
        y.right = Some(z);
        y.update_height();
        self.rotations += 1;
        y
    }

    /// Refresh the height of `node` and restore its balance.
    ///
    /// Children must already be balanced with correct heights.
    fn rebalance(&mut self, mut node: Box<AvlNode<V>>) -> Box<AvlNode<V>> {
        node.update_height();
        let balance = node.balance_factor();

        if balance > 1 {
            if balance_of(&node.left) < 0 {
                if let Some(left) = node.left.take() {
                    node.left = Some(self.rotate_left(left));
                }
            }
            return self.rotate_right(node);
        }

        if balance < -1 {
            if balance_of(&node.right) > 0 {
                if let Some(right) = node.right.take() {
                    node.right = Some(self.rotate_right(right));
                }
            }
            return self.rotate_left(node);
        }

        node
    }

    /// Rebalance the node held by `link`, if any
    fn rebalance_link(&mut self, link: &mut Link<AvlNode<V>>) {
        if let Some(node) = link.take() {
            *link = Some(self.rebalance(node));
        }
    }

    fn insert_into(&mut self, link: &mut Link<AvlNode<V>>, key: Key, value: V) -> TreeResult<()> {
        let node = match link {
            Some(node) => node,
            None => {
                *link = Some(Box::new(AvlNode::new(key, value)));
                return Ok(());
            }
        };

        match key.cmp(&node.key) {
            Ordering::Less => self.insert_into(&mut node.left, key, value)?,
            Ordering::Greater => self.insert_into(&mut node.right, key, value)?,
            Ordering::Equal => return Err(TreeError::duplicate_key(key)),
        }
        self.rebalance_link(link);
        Ok(())
    }

    fn delete_from(&mut self, link: &mut Link<AvlNode<V>>, key: Key) -> TreeResult<V> {
        let node = match link {
            Some(node) => node,
            None => return Err(TreeError::not_found(key)),
        };

        let removed = match key.cmp(&node.key) {
            Ordering::Less => self.delete_from(&mut node.left, key)?,
            Ordering::Greater => self.delete_from(&mut node.right, key)?,
            Ordering::Equal => {
                let target = link.take().ok_or_else(|| TreeError::not_found(key))?;
                let AvlNode {
                    value, left, right, ..
                } = *target;

                *link = match (left, right) {
                    (None, None) => None,
                    (Some(child), None) | (None, Some(child)) => Some(child),
                    (Some(left), Some(right)) => {
                        let mut rest = Some(right);
                        let successor = self.take_min(&mut rest);
                        successor.map(|mut successor| {
                            successor.left = Some(left);
                            successor.right = rest;
                            successor
                        })
                    }
                };
                value
            }
        };

        // every ancestor is rechecked: fixing one level can unbalance the next
        self.rebalance_link(link);
        Ok(removed)
    }

    /// Unlink the minimum node of the subtree held by `link`, rebalancing
    /// the path it was removed from.
    fn take_min(&mut self, link: &mut Link<AvlNode<V>>) -> Link<AvlNode<V>> {
        let has_left = link.as_ref().map(|node| node.left.is_some())?;

        if !has_left {
            let mut min = link.take()?;
            *link = min.right.take();
            min.update_height();
            return Some(min);
        }

        let min = match link {
            Some(node) => self.take_min(&mut node.left),
            None => None,
        };
        self.rebalance_link(link);
        min
    }
}

impl<V> SearchTree<V> for BalancedTree<V> {
    fn kind(&self) -> TreeKind {
        TreeKind::Avl
    }

    fn insert(&mut self, key: Key, value: V) -> TreeResult<()> {
        let mut root = self.root.take();
        let result = self.insert_into(&mut root, key, value);
        self.root = root;
        result?;
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
        let mut root = self.root.take();
        let result = self.delete_from(&mut root, key);
        self.root = root;
        let removed = result?;
        self.len -= 1;
        Ok(removed)
    }

    fn traverse(&self, order: TraversalOrder) -> Vec<&V> {
        traversal::collect(self.root.as_deref(), order)
    }

    fn count(&self) -> usize {
        self.len
    }

    fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.height())
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
        self.root = None;
        self.len = 0;
    }

    fn info(&self) -> TreeInfo {
        TreeInfo {
            kind: TreeKind::Avl,
            size: self.len,
            is_empty: self.root.is_none(),
            height: self.height(),
            root_balance_factor: self.root_balance_factor(),
            root_document: self.root_key(),
            min_document: self.min_key(),
            max_document: self.max_key(),
            rotations: Some(self.rotations),
        }
    }
}
