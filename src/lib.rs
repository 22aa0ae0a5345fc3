//! A self-balancing Binary Search Tree (an AVL tree) over ordered keys,
//! plus a small command interpreter for driving one from text.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. It is defined recursively using
//! the notion of a `Node`: every `Node` holds a key and up to two child
//! `Node`s. The ordering invariant is:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a key less
//!    than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a key
//!    greater than its own key.
//!
//! Searching takes `O(height)`, where `height` is the number of edges on the
//! longest path from the root `Node` to a leaf `Node`. Sorted iteration falls
//! out of visiting the left subtree, then the subtree root, then the right
//! subtree.
//!
//! ## AVL
//!
//! A plain BST fed sorted keys degenerates into a linked list. An AVL tree
//! additionally requires that, for every `Node`, the heights of its two
//! subtrees differ by at most one. Each `Node` caches its own height and
//! after every insert or delete the nodes along the modified path are
//! repaired with one or two rotations. That keeps the height below
//! [`max_height`], which is `O(lg N)`.
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree: Tree<_> = (1..=7).collect();
//! assert_eq!(tree.height(), 2);
//!
//! tree.remove(&4);
//! assert!(tree.iter().eq(&[1, 2, 3, 5, 6, 7]));
//! assert!(tree.is_valid());
//! ```
//!
//! Heights count edges: a single node has height 0 and an empty tree has
//! height -1.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod command;
pub mod iter;
mod node;
pub mod observe;
pub mod pretty;
mod tree;
mod util;
pub mod validate;

pub use tree::Tree;
pub use util::max_height;
