use std::fmt;
use std::ptr;

use crate::slab::{Ptr, Slab};

/// The storage for a single node, owned by the tree's slab
///
/// All links are slab pointers. The `left` and `right` links are the owning edges of the tree; the
/// `parent` link only ever points back along one of those edges.
#[derive(Debug)]
pub(crate) struct RawNode<T> {
    pub(crate) value: T,
    pub(crate) is_red: bool,
    pub(crate) parent: Option<Ptr>,
    pub(crate) left: Option<Ptr>,
    pub(crate) right: Option<Ptr>,
}

impl<T> RawNode<T> {
    pub(crate) fn new(value: T, is_red: bool) -> Self {
        Self {
            value,
            is_red,
            parent: None,
            left: None,
            right: None,
        }
    }
}

/// A single node of the red-black tree
///
/// This is a read-only view: nothing reachable from a `Node` can be used to modify the tree.
pub struct Node<'a, T> {
    nodes: &'a Slab<RawNode<T>>,
    ptr: Ptr,
    node: &'a RawNode<T>,
}

impl<'a, T> fmt::Debug for Node<'a, T>
    where T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("color", &if self.is_red() { "red" } else { "black" })
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, T> Clone for Node<'a, T> {
    fn clone(&self) -> Self {
        Self {..*self}
    }
}

impl<'a, T> Copy for Node<'a, T> {}

impl<'a, T: PartialEq> PartialEq for Node<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        // No need to check the children: values are unique within a tree, so two distinct nodes of
        // the same tree never compare equal.
        self.ptr_eq(other) || (self.value().eq(other.value()) && self.is_red() == other.is_red())
    }
}

impl<'a, T: Eq> Eq for Node<'a, T> {}

impl<'a, T> Node<'a, T> {
    /// Creates a new `Node`
    ///
    /// Panics if `ptr` does not refer to a live node in `nodes`.
    pub(crate) fn new(nodes: &'a Slab<RawNode<T>>, ptr: Ptr) -> Self {
        let node = &nodes[ptr];
        Self {nodes, ptr, node}
    }

    pub(crate) fn ptr(&self) -> Ptr {
        self.ptr
    }

    /// Returns true if both handles refer to the very same node of the very same tree
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.ptr == other.ptr
    }

    /// Returns the value of this node
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    pub fn is_red(&self) -> bool {
        self.node.is_red
    }

    pub fn is_black(&self) -> bool {
        !self.node.is_red
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        self.node.left.is_some()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        self.node.right.is_some()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        self.node.left.map(|ptr| Self::new(self.nodes, ptr))
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        self.node.right.map(|ptr| Self::new(self.nodes, ptr))
    }

    /// Returns the parent of this node, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        self.node.parent.map(|ptr| Self::new(self.nodes, ptr))
    }

    /// Returns the node with the smallest value in the subtree rooted at this node
    ///
    /// Time complexity: `O(log n)`
    pub fn min(&self) -> Self {
        let mut current = *self;
        while let Some(left) = current.left() {
            current = left;
        }
        current
    }

    /// Returns the node with the largest value in the subtree rooted at this node
    ///
    /// Time complexity: `O(log n)`
    pub fn max(&self) -> Self {
        let mut current = *self;
        while let Some(right) = current.right() {
            current = right;
        }
        current
    }

    /// Returns the number of nodes on the longest path from this node down to a leaf, counting
    /// this node
    ///
    /// Time complexity: `O(n)`
    pub fn height(&self) -> usize {
        let left = self.left().map_or(0, |left| left.height());
        let right = self.right().map_or(0, |right| right.height());
        1 + left.max(right)
    }

    /// Returns the number of nodes in the subtree rooted at this node
    ///
    /// Time complexity: `O(n)`
    pub fn subtree_len(&self) -> usize {
        super::IterPreorder::new(self.nodes, Some(self.ptr)).count()
    }
}
