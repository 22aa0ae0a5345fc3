//! Sideways rendering of a tree's shape.

use std::fmt;

use crate::node::Node;

/// Renders a tree one node per line, right subtree above its parent and left subtree below, each
/// level indented four spaces further. Every line shows the key, cached height, and balance
/// factor: `/--[key](h=height,bf=balance)`. The root is marked with `-`, right children with `/`
/// and left children with `\`.
pub struct Pretty<'a, K> {
    root: Option<&'a Node<K>>,
}

impl<'a, K> Pretty<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self { root }
    }
}

impl<K> fmt::Display for Pretty<'_, K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => write_node(f, root, 0, '-'),
            None => writeln!(f, "(empty)"),
        }
    }
}

fn write_node<K>(
    f: &mut fmt::Formatter<'_>,
    node: &Node<K>,
    depth: usize,
    marker: char,
) -> fmt::Result
where
    K: fmt::Display,
{
    if let Some(right) = node.right() {
        write_node(f, right, depth + 1, '/')?;
    }
    writeln!(
        f,
        "{:indent$}{marker}--[{}](h={},bf={})",
        "",
        node.key,
        node.height,
        node.balance_factor(),
        indent = depth * 4
    )?;
    if let Some(left) = node.left() {
        write_node(f, left, depth + 1, '\\')?;
    }
    Ok(())
}
