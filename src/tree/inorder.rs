use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::{Node, RawNode};

pub struct IterInorder<'a, T> {
    nodes: &'a Slab<RawNode<T>>,
    stack: Vec<Ptr>,
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a, T> IterInorder<'a, T> {
    pub(crate) fn new(nodes: &'a Slab<RawNode<T>>, root: Option<Ptr>) -> Self {
        let mut iter = Self {nodes, stack: Vec::new()};
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<Ptr>) {
        while let Some(ptr) = current {
            self.stack.push(ptr);
            current = self.nodes[ptr].left;
        }
    }
}

impl<'a, T> Iterator for IterInorder<'a, T> {
    type Item = Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let top_ptr = self.stack.pop()?;
        let right = self.nodes[top_ptr].right;
        self.push_left_spine(right);

        Some(Node::new(self.nodes, top_ptr))
    }
}

impl<'a, T> FusedIterator for IterInorder<'a, T> {}
