//! Ordered tree storage for childtree
//!
//! Two binary search trees keyed by document id:
//!
//! - [`OrderedTree`]: plain BST, no rebalancing. Ascending inserts build a
//!   chain whose height equals the record count.
//! - [`BalancedTree`]: AVL tree, height stays O(log n).
//!
//! # Invariants
//!
//! - Left subtree keys < node key < right subtree keys, at every node
//! - Keys are unique and never change after insert
//! - `count()` equals the number of reachable nodes
//! - AVL only: |height(left) - height(right)| <= 1 at every node
//! - A failed operation leaves the tree exactly as it was

mod avl;
mod bst;
mod errors;
mod node;
mod traversal;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use avl::BalancedTree;
pub use bst::OrderedTree;
pub use errors::{Severity, TreeError, TreeErrorCode, TreeResult};
pub use node::{AvlNode, BinaryNode, Link, Node};
pub use traversal::{ParseOrderError, TraversalOrder};

/// Document identifier used as the tree key
pub type Key = u64;

/// Which tree variant backs a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    /// Unbalanced binary search tree
    #[serde(alias = "abb")]
    Bst,
    /// Height-balanced AVL tree
    Avl,
}

impl TreeKind {
    /// Returns the short name used in routes and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeKind::Bst => "bst",
            TreeKind::Avl => "avl",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TreeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bst" | "abb" => Ok(TreeKind::Bst),
            "avl" => Ok(TreeKind::Avl),
            other => Err(format!("unknown tree variant '{}', expected 'bst' or 'avl'", other)),
        }
    }
}

/// Shape snapshot of a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeInfo {
    pub kind: TreeKind,
    pub size: usize,
    pub is_empty: bool,
    pub height: usize,
    /// height(left) - height(right) at the root
    pub root_balance_factor: isize,
    pub root_document: Option<Key>,
    pub min_document: Option<Key>,
    pub max_document: Option<Key>,
    /// Single rotations performed since creation (AVL only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotations: Option<u64>,
}

/// Public contract shared by both tree variants.
///
/// The record store and the HTTP layer are generic over this trait.
pub trait SearchTree<V> {
    /// Which variant this is
    fn kind(&self) -> TreeKind;

    /// Insert a record under a new key.
    ///
    /// # Errors
    ///
    /// `TREE_DUPLICATE_KEY` if the key is already stored; the tree is
    /// left untouched.
    fn insert(&mut self, key: Key, value: V) -> TreeResult<()>;

    /// Look up the record stored under `key`.
    fn find(&self, key: Key) -> TreeResult<&V>;

    /// Mutate the record stored under `key` in place.
    ///
    /// The key itself is never altered, so the tree shape does not change.
    fn update<F>(&mut self, key: Key, apply: F) -> TreeResult<&V>
    where
        F: FnOnce(&mut V);

    /// Remove `key` and return its record.
    fn delete(&mut self, key: Key) -> TreeResult<V>;

    /// Fully materialized records in the given order.
    fn traverse(&self, order: TraversalOrder) -> Vec<&V>;

    /// Number of stored records, O(1)
    fn count(&self) -> usize;

    /// Number of nodes on the longest root-to-leaf path
    fn height(&self) -> usize;

    /// Key of the root node
    fn root_key(&self) -> Option<Key>;

    /// Smallest key
    fn min_key(&self) -> Option<Key>;

    /// Largest key
    fn max_key(&self) -> Option<Key>;

    /// Remove every record
    fn clear(&mut self);

    /// Shape snapshot for observability
    fn info(&self) -> TreeInfo;

    fn contains(&self, key: Key) -> bool {
        self.find(key).is_ok()
    }

    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_kind_parse() {
        assert_eq!("bst".parse::<TreeKind>(), Ok(TreeKind::Bst));
        assert_eq!("ABB".parse::<TreeKind>(), Ok(TreeKind::Bst));
        assert_eq!("avl".parse::<TreeKind>(), Ok(TreeKind::Avl));
        assert!("redblack".parse::<TreeKind>().is_err());
    }

    #[test]
    fn test_tree_kind_serde() {
        assert_eq!(serde_json::to_string(&TreeKind::Avl).unwrap(), "\"avl\"");
        let kind: TreeKind = serde_json::from_str("\"abb\"").unwrap();
        assert_eq!(kind, TreeKind::Bst);
    }
}
