use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::{Node, RawNode};

/// Breadth-first (level order) traversal, left to right within each level
pub struct IterBfs<'a, T> {
    nodes: &'a Slab<RawNode<T>>,
    queue: VecDeque<Ptr>,
}

impl<'a, T> IterBfs<'a, T> {
    pub(crate) fn new(nodes: &'a Slab<RawNode<T>>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for IterBfs<'a, T> {
    type Item = Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let front_ptr = self.queue.pop_front()?;
        let node = &self.nodes[front_ptr];
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(Node::new(self.nodes, front_ptr))
    }
}

impl<'a, T> FusedIterator for IterBfs<'a, T> {}
