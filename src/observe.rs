//! Instrumentation hooks for the structural algorithms.
//!
//! The plain [`Tree`][crate::Tree] methods run with the no-op observer `()`. The `*_with` variants
//! take any [`Observer`] so callers can count comparisons and rotations or log every rebalance
//! without the tree carrying any global state.
//!
//! # Examples
//!
//! ```
//! use avl::observe::Stats;
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//! let mut stats = Stats::default();
//!
//! for key in [30, 20, 10] {
//!     tree.insert_with(key, &mut stats);
//! }
//!
//! // Inserting 10 made 30 left-heavy which takes a single right rotation to fix.
//! assert_eq!(stats.rebalances, 1);
//! assert_eq!(stats.rotations, 1);
//! ```

use std::fmt;

/// The direction of a single rotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rotation {
    /// The right child is promoted.
    Left,
    /// The left child is promoted.
    Right,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Which of the four AVL imbalance shapes was found at a node. The first letter is the heavy
/// side of the node, the second is the heavy side of that child.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Imbalance {
    /// Fixed with one right rotation.
    LeftLeft,
    /// Fixed with a left rotation of the left child, then a right rotation.
    LeftRight,
    /// Fixed with one left rotation.
    RightRight,
    /// Fixed with a right rotation of the right child, then a left rotation.
    RightLeft,
}

impl Imbalance {
    /// Whether fixing this shape takes two rotations.
    pub fn is_double(self) -> bool {
        matches!(self, Self::LeftRight | Self::RightLeft)
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LeftLeft => "LL",
            Self::LeftRight => "LR",
            Self::RightRight => "RR",
            Self::RightLeft => "RL",
        })
    }
}

/// Receives events from the tree's structural algorithms. Every hook defaults to doing nothing.
pub trait Observer<K> {
    /// A search step compared the target against `key`.
    fn compared(&mut self, _key: &K) {}

    /// A node holding `key` was allocated.
    fn created(&mut self, _key: &K) {}

    /// The node holding `key` was unlinked from the tree.
    fn released(&mut self, _key: &K) {}

    /// The node holding `key` was out of balance in the shape `case`. One or two calls to
    /// [`Observer::rotated`] follow.
    fn rebalanced(&mut self, _case: Imbalance, _key: &K) {}

    /// A single rotation was performed around the node holding `pivot`.
    fn rotated(&mut self, _rotation: Rotation, _pivot: &K) {}
}

impl<K> Observer<K> for () {}

impl<K, O> Observer<K> for &mut O
where
    O: Observer<K> + ?Sized,
{
    fn compared(&mut self, key: &K) {
        (**self).compared(key);
    }

    fn created(&mut self, key: &K) {
        (**self).created(key);
    }

    fn released(&mut self, key: &K) {
        (**self).released(key);
    }

    fn rebalanced(&mut self, case: Imbalance, key: &K) {
        (**self).rebalanced(case, key);
    }

    fn rotated(&mut self, rotation: Rotation, pivot: &K) {
        (**self).rotated(rotation, pivot);
    }
}

/// Sends every event to both observers, first to `A` then to `B`.
impl<K, A, B> Observer<K> for (A, B)
where
    A: Observer<K>,
    B: Observer<K>,
{
    fn compared(&mut self, key: &K) {
        self.0.compared(key);
        self.1.compared(key);
    }

    fn created(&mut self, key: &K) {
        self.0.created(key);
        self.1.created(key);
    }

    fn released(&mut self, key: &K) {
        self.0.released(key);
        self.1.released(key);
    }

    fn rebalanced(&mut self, case: Imbalance, key: &K) {
        self.0.rebalanced(case, key);
        self.1.rebalanced(case, key);
    }

    fn rotated(&mut self, rotation: Rotation, pivot: &K) {
        self.0.rotated(rotation, pivot);
        self.1.rotated(rotation, pivot);
    }
}

/// Counts structural events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Key comparisons made while descending.
    pub comparisons: usize,
    /// Imbalanced nodes found (each fixed by a single or double rotation).
    pub rebalances: usize,
    /// Single rotations. A double rotation counts twice.
    pub rotations: usize,
    /// Nodes allocated.
    pub created: usize,
    /// Nodes unlinked by deletion.
    pub released: usize,
}

impl<K> Observer<K> for Stats {
    fn compared(&mut self, _key: &K) {
        self.comparisons += 1;
    }

    fn created(&mut self, _key: &K) {
        self.created += 1;
    }

    fn released(&mut self, _key: &K) {
        self.released += 1;
    }

    fn rebalanced(&mut self, _case: Imbalance, _key: &K) {
        self.rebalances += 1;
    }

    fn rotated(&mut self, _rotation: Rotation, _pivot: &K) {
        self.rotations += 1;
    }
}

/// Logs structural events through the [`log`] facade. Rebalances and rotations are logged at
/// `debug`, allocations and comparisons at `trace`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Tracer;

impl<K> Observer<K> for Tracer
where
    K: fmt::Debug,
{
    fn compared(&mut self, key: &K) {
        log::trace!("compare against {key:?}");
    }

    fn created(&mut self, key: &K) {
        log::trace!("created node {key:?}");
    }

    fn released(&mut self, key: &K) {
        log::trace!("released node {key:?}");
    }

    fn rebalanced(&mut self, case: Imbalance, key: &K) {
        log::debug!("{case} case at node {key:?}");
    }

    fn rotated(&mut self, rotation: Rotation, pivot: &K) {
        log::debug!("{rotation} rotation on {pivot:?}");
    }
}
