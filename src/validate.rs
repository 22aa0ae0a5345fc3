//! Structural diagnostics. The tree's own algorithms keep these invariants by construction; this
//! module exists so tests (and curious callers) can check them independently.

use thiserror::Error;

use crate::node::{self, Node};

/// The first AVL invariant found broken while walking a tree.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A key is not strictly between the keys of its ancestors.
    #[error("key out of order at depth {depth}")]
    Unordered {
        /// Distance from the root.
        depth: usize,
    },
    /// The subtrees of a node differ in height by more than one.
    #[error("balance factor {balance_factor} at depth {depth}")]
    Unbalanced {
        /// Left subtree height minus right subtree height.
        balance_factor: isize,
        /// Distance from the root.
        depth: usize,
    },
    /// A node's cached height disagrees with its children.
    #[error("cached height {cached} should be {expected} at depth {depth}")]
    StaleHeight {
        /// The height stored on the node.
        cached: usize,
        /// One more than the taller child's height.
        expected: usize,
        /// Distance from the root.
        depth: usize,
    },
}

/// Checks ordering, balance, and cached heights for every node below `root`.
pub(crate) fn validate<K>(root: Option<&Node<K>>) -> Result<(), Violation>
where
    K: Ord,
{
    match root {
        Some(root) => check(root, None, None, 0),
        None => Ok(()),
    }
}

/// Each node must lie strictly inside `(low, high)`, the open interval inherited from its
/// ancestors (`None` is unbounded). Children are checked before the node itself.
fn check<K>(
    node: &Node<K>,
    low: Option<&K>,
    high: Option<&K>,
    depth: usize,
) -> Result<(), Violation>
where
    K: Ord,
{
    let above_low = low.map_or(true, |low| *low < node.key);
    let below_high = high.map_or(true, |high| node.key < *high);
    if !(above_low && below_high) {
        return Err(Violation::Unordered { depth });
    }

    if let Some(left) = node.left() {
        check(left, low, Some(&node.key), depth + 1)?;
    }
    if let Some(right) = node.right() {
        check(right, Some(&node.key), high, depth + 1)?;
    }

    let balance_factor = node.balance_factor();
    if balance_factor.abs() > 1 {
        return Err(Violation::Unbalanced {
            balance_factor,
            depth,
        });
    }

    let expected = (node::height(&node.left).max(node::height(&node.right)) + 1) as usize;
    if node.height != expected {
        return Err(Violation::StaleHeight {
            cached: node.height,
            expected,
            depth,
        });
    }
    Ok(())
}
