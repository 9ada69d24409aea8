//! Traversal orders and node walks
//!
//! Every walk here uses an explicit stack. A plain BST fed ascending keys
//! degenerates into a chain as long as the tree, so recursion depth is not
//! bounded by anything useful.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::node::BinaryNode;

/// Traversal order accepted by `traverse`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// left, root, right (ascending keys)
    #[default]
    In,
    /// root, left, right
    Pre,
    /// left, right, root
    Post,
}

impl TraversalOrder {
    /// Returns the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalOrder::In => "in",
            TraversalOrder::Pre => "pre",
            TraversalOrder::Post => "post",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unsupported order value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOrderError(pub String);

impl fmt::Display for ParseOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid order '{}', must be 'in', 'pre' or 'post'",
            self.0
        )
    }
}

impl std::error::Error for ParseOrderError {}

impl FromStr for TraversalOrder {
    type Err = ParseOrderError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(TraversalOrder::In),
            "pre" => Ok(TraversalOrder::Pre),
            "post" => Ok(TraversalOrder::Post),
            _ => Err(ParseOrderError(s.to_string())),
        }
    }
}

/// Collect every record under `root` in the requested order.
pub fn collect<N: BinaryNode>(root: Option<&N>, order: TraversalOrder) -> Vec<&N::Value> {
    match order {
        TraversalOrder::In => in_order(root),
        TraversalOrder::Pre => pre_order(root),
        TraversalOrder::Post => post_order(root),
    }
}

fn in_order<N: BinaryNode>(root: Option<&N>) -> Vec<&N::Value> {
    let mut out = Vec::new();
    let mut stack: Vec<&N> = Vec::new();
    let mut current = root;

    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.left();
        }
        match stack.pop() {
            Some(node) => {
                out.push(node.value());
                current = node.right();
            }
            None => break,
        }
    }
    out
}

fn pre_order<N: BinaryNode>(root: Option<&N>) -> Vec<&N::Value> {
    let mut out = Vec::new();
    let mut stack: Vec<&N> = root.into_iter().collect();

    while let Some(node) = stack.pop() {
        out.push(node.value());
        // right pushed first so left is visited first
        stack.extend(node.right());
        stack.extend(node.left());
    }
    out
}

fn post_order<N: BinaryNode>(root: Option<&N>) -> Vec<&N::Value> {
    // root, right, left reversed is left, right, root
    let mut out = Vec::new();
    let mut stack: Vec<&N> = root.into_iter().collect();

    while let Some(node) = stack.pop() {
        out.push(node.value());
        stack.extend(node.left());
        stack.extend(node.right());
    }
    out.reverse();
    out
}

/// Number of nodes on the longest root-to-leaf path (0 for an empty tree).
///
/// Walks level by level, so it is O(n) and stack-safe.
pub fn measure_height<N: BinaryNode>(root: Option<&N>) -> usize {
    let mut level: Vec<&N> = root.into_iter().collect();
    let mut height = 0;

    while !level.is_empty() {
        height += 1;
        level = level
            .into_iter()
            .flat_map(|node| node.left().into_iter().chain(node.right()))
            .collect();
    }
    height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::Node;

    //        4
    //      /   \
    //     2     6
    //    / \     \
    //   1   3     7
    fn sample() -> Node<u64> {
        let mut two = Node::new(2, 2);
        two.left = Some(Box::new(Node::new(1, 1)));
        two.right = Some(Box::new(Node::new(3, 3)));

        let mut six = Node::new(6, 6);
        six.right = Some(Box::new(Node::new(7, 7)));

        let mut root = Node::new(4, 4);
        root.left = Some(Box::new(two));
        root.right = Some(Box::new(six));
        root
    }

    fn keys(values: Vec<&u64>) -> Vec<u64> {
        values.into_iter().copied().collect()
    }

    #[test]
    fn test_orders() {
        let root = sample();
        assert_eq!(
            keys(collect(Some(&root), TraversalOrder::In)),
            vec![1, 2, 3, 4, 6, 7]
        );
        assert_eq!(
            keys(collect(Some(&root), TraversalOrder::Pre)),
            vec![4, 2, 1, 3, 6, 7]
        );
        assert_eq!(
            keys(collect(Some(&root), TraversalOrder::Post)),
            vec![1, 3, 2, 7, 6, 4]
        );
    }

    #[test]
    fn test_empty_tree() {
        assert!(collect::<Node<u64>>(None, TraversalOrder::Pre).is_empty());
        assert_eq!(measure_height::<Node<u64>>(None), 0);
    }

    #[test]
    fn test_measure_height() {
        assert_eq!(measure_height(Some(&sample())), 3);
    }

    #[test]
    fn test_parse_order() {
        assert_eq!("in".parse::<TraversalOrder>(), Ok(TraversalOrder::In));
        assert_eq!("PRE".parse::<TraversalOrder>(), Ok(TraversalOrder::Pre));
        assert_eq!(" Post ".parse::<TraversalOrder>(), Ok(TraversalOrder::Post));
        assert!("level".parse::<TraversalOrder>().is_err());
        assert_eq!(TraversalOrder::default(), TraversalOrder::In);
    }
}
