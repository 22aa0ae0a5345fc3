//! A self-balancing Binary Search Tree (specifically, an AVL tree) of keys.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//! assert_eq!(tree.min(), None);
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Inserting the same key again changes nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Removing a key hands it back.
//! assert_eq!(tree.remove(&1), Some(1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeBounds;

use crate::iter::{Iter, Postorder, Preorder, Range};
use crate::node::{self, Link, Node};
use crate::observe::Observer;
use crate::pretty::Pretty;
use crate::validate::{self, Violation};

/// An AVL tree of unique keys. Every public method leaves the tree ordered, balanced, and with
/// correct cached heights.
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        node::destroy(self.root.take());
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// How many keys are in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of edges on the longest path from the root to a leaf. A single key has a height
    /// of 0 and the empty tree has a height of -1.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.extend([1, 2, 3]);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        node::height(&self.root)
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        self.root().map(|root| &root.min().key)
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        self.root().map(|root| &root.max().key)
    }

    /// Visits every key in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root(), self.len)
    }

    /// Visits every key parent first, then its left subtree, then its right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// assert!(tree.preorder().eq(&[2, 1, 3]));
    /// ```
    pub fn preorder(&self) -> Preorder<'_, K> {
        Preorder::new(self.root(), self.len)
    }

    /// Visits every key after both of its subtrees.
    pub fn postorder(&self) -> Postorder<'_, K> {
        Postorder::new(self.root(), self.len)
    }

    /// Releases every node, leaving the tree empty.
    pub fn clear(&mut self) {
        let released = node::destroy(self.root.take());
        self.len = 0;
        log::trace!("released {released} nodes");
    }

    /// Checks the AVL invariants on every node and reports the first one broken.
    pub fn validate(&self) -> Result<(), Violation>
    where
        K: Ord,
    {
        validate::validate(self.root())
    }

    /// Whether every node satisfies the AVL invariants. See [`Tree::validate`] for the reason when
    /// it doesn't.
    pub fn is_valid(&self) -> bool
    where
        K: Ord,
    {
        self.validate().is_ok()
    }

    /// Renders the shape of the tree, one node per line with the right subtree on top.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(
    ///     tree.pretty().to_string(),
    ///     "    /--[3](h=0,bf=0)\n---[2](h=1,bf=0)\n    \\--[1](h=0,bf=0)\n",
    /// );
    /// ```
    pub fn pretty(&self) -> Pretty<'_, K> {
        Pretty::new(self.root())
    }

    /// Inserts the given key. Returns whether the key was new; inserting a key that is already
    /// present leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        self.insert_with(key, &mut ())
    }

    /// [`Tree::insert`] reporting every comparison, allocation, and rotation to `observer`.
    pub fn insert_with<O>(&mut self, key: K, observer: &mut O) -> bool
    where
        K: Ord,
        O: Observer<K> + ?Sized,
    {
        let (root, inserted) = node::insert(self.root.take(), key, observer);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes the given key from the tree and returns it. If the tree does not contain the key,
    /// nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        self.remove_with(key, &mut ())
    }

    /// [`Tree::remove`] reporting every comparison, release, and rotation to `observer`.
    pub fn remove_with<O>(&mut self, key: &K, observer: &mut O) -> Option<K>
    where
        K: Ord,
        O: Observer<K> + ?Sized,
    {
        let (root, removed) = node::remove(self.root.take(), key, observer);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Whether the tree contains the given key.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// Potentially finds the stored key equal to the given one. If no node has the key, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        self.find_with(key, &mut ())
    }

    /// [`Tree::find`] reporting every comparison to `observer`.
    pub fn find_with<O>(&self, key: &K, observer: &mut O) -> Option<&K>
    where
        K: Ord,
        O: Observer<K> + ?Sized,
    {
        let mut current = self.root();
        while let Some(node) = current {
            observer.compared(&node.key);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// The smallest key strictly greater than the given one. The given key doesn't have to be in
    /// the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&20), Some(&30));
    /// assert_eq!(tree.successor(&25), Some(&30));
    /// assert_eq!(tree.successor(&30), None);
    /// ```
    pub fn successor(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut candidate = None;
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => {
                    candidate = Some(node);
                    current = node.left();
                }
                Ordering::Greater => current = node.right(),
                Ordering::Equal => {
                    if let Some(right) = node.right() {
                        return Some(&right.min().key);
                    }
                    break;
                }
            }
        }
        candidate.map(|node| &node.key)
    }

    /// The largest key strictly less than the given one. The given key doesn't have to be in the
    /// tree.
    pub fn predecessor(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut candidate = None;
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Greater => {
                    candidate = Some(node);
                    current = node.right();
                }
                Ordering::Less => current = node.left(),
                Ordering::Equal => {
                    if let Some(left) = node.left() {
                        return Some(&left.max().key);
                    }
                    break;
                }
            }
        }
        candidate.map(|node| &node.key)
    }

    /// Visits the keys inside `bounds` in ascending order, skipping subtrees that lie entirely
    /// outside of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = (0..10).collect();
    ///
    /// assert!(tree.range(3..=5).eq(&[3, 4, 5]));
    /// assert!(tree.range(..2).eq(&[0, 1]));
    /// assert_eq!(tree.range(20..).next(), None);
    /// ```
    pub fn range<R>(&self, bounds: R) -> Range<'_, K, R>
    where
        K: Ord,
        R: RangeBounds<K>,
    {
        Range::new(self.root(), bounds)
    }

    pub(crate) fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
