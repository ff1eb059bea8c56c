//! Breadth-first node iteration.

use std::collections::VecDeque;

use crate::index::BTreeIndex;
use crate::node::{BTreeNode, NodeId};

/// Iterator over all nodes of a tree in breadth-first order.
///
/// Yields the root first, then each level left to right. Used by the
/// benchmark harness for size estimation and by the demos for rendering.
pub struct BreadthFirst<'a> {
    tree: &'a BTreeIndex,
    queue: VecDeque<NodeId>,
}

impl<'a> BreadthFirst<'a> {
    pub(crate) fn new(tree: &'a BTreeIndex) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(tree.root());
        Self { tree, queue }
    }
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (NodeId, &'a BTreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let node = self.tree.node(id);
        self.queue.extend(node.children().iter().copied());
        Some((id, node))
    }
}
