//! The owned node graph underneath [`Tree`][crate::Tree].
//!
//! Every structural operation here takes ownership of a subtree root and hands back ownership of
//! its (possibly restructured) replacement. The caller is responsible for storing the result in
//! the parent slot it came from, so there are no parent pointers and no aliasing.

use std::cmp::Ordering;

use crate::observe::{Imbalance, Observer, Rotation};

/// An owning edge to a subtree. `None` is the empty subtree.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,

    /// How many edges are on the longest path from this node down to a leaf. A node with no
    /// children has a height of 0.
    pub(crate) height: usize,
}

/// The height of a possibly empty subtree. The empty subtree has a height of -1.
pub(crate) fn height<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(-1, |n| n.height as isize)
}

/// The balance factor of a possibly empty subtree. The empty subtree is balanced.
pub(crate) fn balance_factor<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(0, |n| n.balance_factor())
}

impl<K> Node<K> {
    pub(crate) fn new_boxed(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 0,
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The height of the left subtree minus the height of the right subtree. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) - height(&self.right)
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1. The children's
    /// heights must already be correct.
    pub(crate) fn update_height(&mut self) {
        let tallest_child = height(&self.left).max(height(&self.right));
        self.height = (tallest_child + 1) as usize;
    }

    /// The leftmost node of this subtree.
    pub(crate) fn min(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// The rightmost node of this subtree.
    pub(crate) fn max(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }
}

/// Rotate `y` to the right. This moves the left child up vertically and `y` down vertically.
/// Used to rebalance the tree when the left child is too tall.
///
/// ## Panics
///
/// When called on a node without a left child.
///
/// # Diagram
///
/// ```text
///       y                 x
///      / \               / \
///     x   C   rotate -> A   y
///    / \                   / \
///   A   B                 B   C
/// ```
pub(crate) fn rotate_right<K, O>(mut y: Box<Node<K>>, observer: &mut O) -> Box<Node<K>>
where
    O: Observer<K> + ?Sized,
{
    observer.rotated(Rotation::Right, &y.key);

    let mut x = y.left.take().expect("Rotate right => left child");
    y.left = x.right.take();
    y.update_height();

    x.right = Some(y);
    x.update_height();
    x
}

/// Mirror image of [`rotate_right`], promoting the right child of `x`.
///
/// ## Panics
///
/// When called on a node without a right child.
pub(crate) fn rotate_left<K, O>(mut x: Box<Node<K>>, observer: &mut O) -> Box<Node<K>>
where
    O: Observer<K> + ?Sized,
{
    observer.rotated(Rotation::Left, &x.key);

    let mut y = x.right.take().expect("Rotate left => right child");
    x.right = y.left.take();
    x.update_height();

    y.left = Some(x);
    y.update_height();
    y
}

/// Restores the AVL invariant at `node` assuming both of its subtrees already satisfy it and
/// differ in height by at most two. See [the Wikipedia page][wiki] for the naming of the cases.
///
/// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing
pub(crate) fn rebalance<K, O>(mut node: Box<Node<K>>, observer: &mut O) -> Box<Node<K>>
where
    O: Observer<K> + ?Sized,
{
    node.update_height();

    let balanced = match node.balance_factor() {
        bf if bf > 1 => {
            if balance_factor(&node.left) < 0 {
                observer.rebalanced(Imbalance::LeftRight, &node.key);
                let left = node.left.take().expect("Left heavy => left child");
                node.left = Some(rotate_left(left, observer));
            } else {
                observer.rebalanced(Imbalance::LeftLeft, &node.key);
            }
            rotate_right(node, observer)
        }
        bf if bf < -1 => {
            if balance_factor(&node.right) > 0 {
                observer.rebalanced(Imbalance::RightLeft, &node.key);
                let right = node.right.take().expect("Right heavy => right child");
                node.right = Some(rotate_right(right, observer));
            } else {
                observer.rebalanced(Imbalance::RightRight, &node.key);
            }
            rotate_left(node, observer)
        }
        _ => node,
    };

    // After balancing, check that we've restored/maintained the AVL invariant at this level.
    if cfg!(debug_assertions) {
        let left_height = height(&balanced.left);
        let right_height = height(&balanced.right);
        assert_eq!(
            balanced.height as isize,
            left_height.max(right_height) + 1
        );
        assert!(left_height.abs_diff(right_height) <= 1);
    }
    balanced
}

/// Inserts `key` below `link` and returns the new subtree root along with whether a node was
/// created. A duplicate key leaves the subtree untouched.
pub(crate) fn insert<K, O>(link: Link<K>, key: K, observer: &mut O) -> (Box<Node<K>>, bool)
where
    K: Ord,
    O: Observer<K> + ?Sized,
{
    let Some(mut node) = link else {
        observer.created(&key);
        return (Node::new_boxed(key), true);
    };

    observer.compared(&node.key);
    let inserted = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, inserted) = insert(node.left.take(), key, observer);
            node.left = Some(left);
            inserted
        }
        Ordering::Equal => false,
        Ordering::Greater => {
            let (right, inserted) = insert(node.right.take(), key, observer);
            node.right = Some(right);
            inserted
        }
    };

    if inserted {
        (rebalance(node, observer), true)
    } else {
        (node, false)
    }
}

/// Removes `key` from below `link` and returns the new subtree root along with the removed key.
/// Every ancestor of the removed node is rebalanced on the way back up.
pub(crate) fn remove<K, O>(link: Link<K>, key: &K, observer: &mut O) -> (Link<K>, Option<K>)
where
    K: Ord,
    O: Observer<K> + ?Sized,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    observer.compared(&node.key);
    let removed = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key, observer);
            node.left = left;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => {
                observer.released(&node.key);
                return (None, Some(node.key));
            }
            (Some(child), None) | (None, Some(child)) => {
                observer.released(&node.key);
                return (Some(child), Some(node.key));
            }
            // With two children we promote this node's successor, the smallest node in its right
            // subtree. This node keeps its allocation and takes over the successor's key.
            (Some(left), Some(right)) => {
                let (right, successor) = remove_smallest(right, observer);
                node.left = Some(left);
                node.right = right;
                Some(std::mem::replace(&mut node.key, successor))
            }
        },
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key, observer);
            node.right = right;
            removed
        }
    };

    match removed {
        Some(removed) => (Some(rebalance(node, observer)), Some(removed)),
        None => (Some(node), None),
    }
}

/// Detaches the smallest node of this subtree by recursing to the left until there is no left
/// child. Returns the rebalanced remainder and the detached key.
fn remove_smallest<K, O>(mut node: Box<Node<K>>, observer: &mut O) -> (Link<K>, K)
where
    O: Observer<K> + ?Sized,
{
    match node.left.take() {
        None => {
            observer.released(&node.key);
            let right = node.right.take();
            (right, node.key)
        }
        Some(left) => {
            let (left, smallest) = remove_smallest(left, observer);
            node.left = left;
            (Some(rebalance(node, observer)), smallest)
        }
    }
}

/// Releases a subtree in post-order: left subtree, right subtree, then the node itself. Returns
/// how many nodes were released.
pub(crate) fn destroy<K>(link: Link<K>) -> usize {
    let Some(mut node) = link else {
        return 0;
    };
    let released = destroy(node.left.take()) + destroy(node.right.take());
    drop(node);
    released + 1
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::observe::Stats;

    /// Builds a node with the given children and a freshly computed height. This does no
    /// balancing so it can build invalid trees.
    pub(crate) fn branch<K>(key: K, left: Link<K>, right: Link<K>) -> Link<K> {
        let mut node = Node::new_boxed(key);
        node.left = left;
        node.right = right;
        node.update_height();
        Some(node)
    }

    pub(crate) fn leaf<K>(key: K) -> Link<K> {
        Some(Node::new_boxed(key))
    }

    fn keys<K: Copy>(link: &Link<K>, out: &mut Vec<K>) {
        if let Some(n) = link {
            keys(&n.left, out);
            out.push(n.key);
            keys(&n.right, out);
        }
    }

    fn in_order<K: Copy>(link: &Link<K>) -> Vec<K> {
        let mut out = Vec::new();
        keys(link, &mut out);
        out
    }

    #[test]
    fn empty_subtree_heights() {
        let empty: Link<i32> = None;
        assert_eq!(height(&empty), -1);
        assert_eq!(balance_factor(&empty), 0);

        let single = leaf(1);
        assert_eq!(height(&single), 0);
        assert_eq!(balance_factor(&single), 0);
    }

    #[test]
    fn rotate_right_promotes_left_child() {
        // 30 -> 20 -> 10 down the left spine.
        let root = branch(30, branch(20, leaf(10), None), None).unwrap();
        let mut stats = Stats::default();
        let root = rotate_right(root, &mut stats);

        assert_eq!(root.key, 20);
        assert_eq!(root.height, 1);
        assert_eq!(root.left().map(|n| (n.key, n.height)), Some((10, 0)));
        assert_eq!(root.right().map(|n| (n.key, n.height)), Some((30, 0)));
        assert_eq!(stats.rotations, 1);
    }

    #[test]
    fn rotate_left_moves_inner_grandchild() {
        //   1
        //  / \
        // 0   3
        //    / \
        //   2   4
        let root = branch(1, leaf(0), branch(3, leaf(2), leaf(4))).unwrap();
        let root = rotate_left(root, &mut ());

        assert_eq!(root.key, 3);
        let left = root.left().unwrap();
        assert_eq!(left.key, 1);
        assert_eq!(left.right().map(|n| n.key), Some(2));
        assert_eq!(left.height, 1);
        assert_eq!(root.height, 2);
        assert_eq!(in_order(&Some(root)), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn rebalance_left_right() {
        let root = branch(30, branch(10, None, leaf(20)), None).unwrap();
        let mut stats = Stats::default();
        let root = rebalance(root, &mut stats);

        assert_eq!(root.key, 20);
        assert_eq!(root.height, 1);
        assert_eq!(stats.rebalances, 1);
        assert_eq!(stats.rotations, 2);
    }

    #[test]
    fn rebalance_leaves_balanced_node_alone() {
        let root = branch(2, leaf(1), leaf(3)).unwrap();
        let mut stats = Stats::default();
        let root = rebalance(root, &mut stats);

        assert_eq!(root.key, 2);
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn insert_duplicate_returns_untouched_subtree() {
        let (root, inserted) = insert(leaf(5), 5, &mut ());
        assert!(!inserted);
        assert_eq!(root.height, 0);
        assert!(root.left.is_none() && root.right.is_none());
    }

    #[test]
    fn remove_two_children_reuses_node() {
        let root = branch(2, leaf(1), branch(4, leaf(3), None));
        let root_ptr: *const Node<i32> = root.as_deref().unwrap();

        let (root, removed) = remove(root, &2, &mut ());
        let root = root.unwrap();

        assert_eq!(removed, Some(2));
        assert_eq!(root.key, 3);
        assert!(std::ptr::eq(&*root, root_ptr));
        assert_eq!(in_order(&Some(root)), vec![1, 3, 4]);
    }

    #[test]
    fn remove_missing_key_is_noop() {
        let root = branch(2, leaf(1), leaf(3));
        let mut stats = Stats::default();
        let (root, removed) = remove(root, &7, &mut stats);

        assert_eq!(removed, None);
        assert_eq!(in_order(&root), vec![1, 2, 3]);
        assert_eq!(stats.released, 0);
        assert_eq!(stats.rebalances, 0);
    }

    #[test]
    fn destroy_counts_every_node() {
        let root = branch(4, branch(2, leaf(1), leaf(3)), branch(6, leaf(5), None));
        assert_eq!(destroy(root), 6);
        assert_eq!(destroy::<i32>(None), 0);
    }
}
