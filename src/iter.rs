//! Lazy traversals over a [`Tree`][crate::Tree].
//!
//! Every iterator here keeps an explicit stack of the ancestors still to be visited instead of
//! recursing, so they can be paused between keys. None of them mutate the tree; calling
//! [`Tree::iter`][crate::Tree::iter] or [`Tree::range`][crate::Tree::range] again restarts the
//! traversal.

use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use crate::node::Node;

/// An iterator over every key of a tree in ascending order.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

/// Manual implementation of `Clone` so we don't require `K: Clone` when only references are
/// cloned.
impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<K>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

/// An iterator over every key of a tree in pre-order: each node before its left subtree, then
/// its right subtree. Inserting the keys into an empty unbalanced BST in this order would rebuild
/// the same shape.
pub struct Preorder<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<K> Clone for Preorder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Preorder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, K> Iterator for Preorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is visited first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Preorder<'_, K> {}

impl<K> FusedIterator for Preorder<'_, K> {}

/// An iterator over every key of a tree in post-order: both subtrees of a node before the node
/// itself. This is the order nodes are released in when a tree is cleared.
pub struct Postorder<'a, K> {
    /// The path from the root to the next node to yield.
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<K> Clone for Postorder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Postorder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.push_first_leaf(root);
        }
        iter
    }

    /// Pushes the path down to the first node of `node`'s subtree in post-order, preferring left
    /// children and falling back to right ones.
    fn push_first_leaf(&mut self, mut node: &'a Node<K>) {
        loop {
            self.stack.push(node);
            match node.left().or(node.right()) {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, K> Iterator for Postorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(&parent) = self.stack.last() {
            let from_left = parent.left().is_some_and(|left| std::ptr::eq(left, node));
            if from_left {
                if let Some(right) = parent.right() {
                    self.push_first_leaf(right);
                }
            }
        }
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Postorder<'_, K> {}

impl<K> FusedIterator for Postorder<'_, K> {}

/// An iterator over the keys of a tree that fall inside some bounds, in ascending order. Subtrees
/// entirely below the lower bound are never entered and the traversal stops at the first key
/// above the upper bound.
pub struct Range<'a, K, R> {
    stack: Vec<&'a Node<K>>,
    bounds: R,
}

impl<'a, K, R> Range<'a, K, R>
where
    K: Ord,
    R: RangeBounds<K>,
{
    pub(crate) fn new(root: Option<&'a Node<K>>, bounds: R) -> Self {
        let mut range = Self {
            stack: Vec::new(),
            bounds,
        };
        range.push_left_spine(root);
        range
    }

    /// Like [`Iter`]'s version but skips nodes below the lower bound (along with their left
    /// subtrees) and stops descending once nothing further left can be in range.
    fn push_left_spine(&mut self, mut link: Option<&'a Node<K>>) {
        while let Some(node) = link {
            if self.below_start(&node.key) {
                link = node.right();
            } else {
                self.stack.push(node);
                link = if self.may_go_left(&node.key) {
                    node.left()
                } else {
                    None
                };
            }
        }
    }

    fn below_start(&self, key: &K) -> bool {
        match self.bounds.start_bound() {
            Bound::Included(start) => key < start,
            Bound::Excluded(start) => key <= start,
            Bound::Unbounded => false,
        }
    }

    fn above_end(&self, key: &K) -> bool {
        match self.bounds.end_bound() {
            Bound::Included(end) => key > end,
            Bound::Excluded(end) => key >= end,
            Bound::Unbounded => false,
        }
    }

    /// Whether keys smaller than `key` can still be in range.
    fn may_go_left(&self, key: &K) -> bool {
        match self.bounds.start_bound() {
            Bound::Included(start) | Bound::Excluded(start) => start < key,
            Bound::Unbounded => true,
        }
    }

    /// Whether keys larger than `key` can still be in range.
    fn may_go_right(&self, key: &K) -> bool {
        match self.bounds.end_bound() {
            Bound::Included(end) | Bound::Excluded(end) => key < end,
            Bound::Unbounded => true,
        }
    }
}

impl<'a, K, R> Iterator for Range<'a, K, R>
where
    K: Ord,
    R: RangeBounds<K>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if self.above_end(&node.key) {
            // Everything left on the stack is larger still.
            self.stack.clear();
            return None;
        }
        if self.may_go_right(&node.key) {
            self.push_left_spine(node.right());
        }
        Some(&node.key)
    }
}

impl<K, R> FusedIterator for Range<'_, K, R>
where
    K: Ord,
    R: RangeBounds<K>,
{
}
