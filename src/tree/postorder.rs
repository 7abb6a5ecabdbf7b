use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::{Node, RawNode};

pub struct IterPostorder<'a, T> {
    nodes: &'a Slab<RawNode<T>>,
    stack: Vec<Ptr>,
}

// See: https://www.geeksforgeeks.org/iterative-postorder-traversal-using-stack/
impl<'a, T> IterPostorder<'a, T> {
    pub(crate) fn new(nodes: &'a Slab<RawNode<T>>, root: Option<Ptr>) -> Self {
        let mut iter = Self {nodes, stack: Vec::new()};
        if let Some(root) = root {
            iter.descend(root);
        }
        iter
    }

    /// Walks down the left spine starting at `ptr`, pushing each node's right child underneath the
    /// node itself so the right subtree is visited before its parent is yielded
    fn descend(&mut self, mut ptr: Ptr) {
        loop {
            let node = &self.nodes[ptr];
            self.stack.extend(node.right);
            self.stack.push(ptr);

            match node.left {
                Some(left) => ptr = left,
                None => break,
            }
        }
    }
}

impl<'a, T> Iterator for IterPostorder<'a, T> {
    type Item = Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_ptr) = self.stack.pop() {
            let node = &self.nodes[current_ptr];

            // If the top of the stack is the current node's right child, the right subtree still
            // needs to be visited before this node
            match node.right {
                Some(right) if self.stack.last().copied() == Some(right) => {
                    // Swap the right child with the current node on the stack
                    self.stack.pop();
                    self.stack.push(current_ptr);

                    self.descend(right);
                },

                _ => return Some(Node::new(self.nodes, current_ptr)),
            }
        }

        None
    }
}

impl<'a, T> FusedIterator for IterPostorder<'a, T> {}
