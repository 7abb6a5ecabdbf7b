use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::{Node, RawNode};

pub struct IterPreorder<'a, T> {
    nodes: &'a Slab<RawNode<T>>,
    stack: Vec<Ptr>,
}

impl<'a, T> IterPreorder<'a, T> {
    pub(crate) fn new(nodes: &'a Slab<RawNode<T>>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            stack: root.into_iter().collect(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a, T> Iterator for IterPreorder<'a, T> {
    type Item = Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let top_ptr = self.stack.pop()?;
        let node = &self.nodes[top_ptr];
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(Node::new(self.nodes, top_ptr))
    }
}

impl<'a, T> FusedIterator for IterPreorder<'a, T> {}
