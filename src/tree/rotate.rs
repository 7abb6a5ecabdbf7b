//! Structural primitives: link maintenance, relative lookups and rotations
//!
//! Everything here works on slab pointers and compares nodes by identity. None of it looks at
//! values, so it stays correct while two nodes briefly hold swapped values during removal.

use crate::slab::Ptr;

use super::{RBTree, RawNode};

impl<T> RBTree<T> {
    pub(super) fn raw(&self, ptr: Ptr) -> &RawNode<T> {
        &self.nodes[ptr]
    }

    pub(super) fn raw_mut(&mut self, ptr: Ptr) -> &mut RawNode<T> {
        &mut self.nodes[ptr]
    }

    pub(super) fn parent_of(&self, ptr: Ptr) -> Option<Ptr> {
        self.raw(ptr).parent
    }

    pub(super) fn left_of(&self, ptr: Ptr) -> Option<Ptr> {
        self.raw(ptr).left
    }

    pub(super) fn right_of(&self, ptr: Ptr) -> Option<Ptr> {
        self.raw(ptr).right
    }

    /// Absent nodes are black
    pub(super) fn is_red(&self, ptr: Option<Ptr>) -> bool {
        ptr.map_or(false, |ptr| self.raw(ptr).is_red)
    }

    pub(super) fn set_red(&mut self, ptr: Ptr, is_red: bool) {
        self.raw_mut(ptr).is_red = is_red;
    }

    /// Makes `child` the left or right child of `parent`, updating the child's parent link
    pub(super) fn set_child(&mut self, parent: Ptr, child: Option<Ptr>, is_left: bool) {
        let parent_node = self.raw_mut(parent);
        if is_left {
            parent_node.left = child;
        } else {
            parent_node.right = child;
        }

        if let Some(child) = child {
            self.raw_mut(child).parent = Some(parent);
        }
    }

    /// Puts `new_child` in whichever slot of `parent` currently holds `old_child`
    ///
    /// # Panics
    ///
    /// Panics if `old_child` is not a child of `parent`.
    pub(super) fn replace_child(&mut self, parent: Ptr, old_child: Ptr, new_child: Option<Ptr>) {
        let parent_node = self.raw(parent);
        if parent_node.left == Some(old_child) {
            self.set_child(parent, new_child, true);
        } else if parent_node.right == Some(old_child) {
            self.set_child(parent, new_child, false);
        } else {
            panic!("bug: node {} is not a child of node {}", old_child.index(), parent.index());
        }
    }

    /// Returns the other child of this node's parent
    pub(super) fn sibling_of(&self, ptr: Ptr) -> Option<Ptr> {
        let parent = self.raw(self.parent_of(ptr)?);
        if parent.left == Some(ptr) {
            parent.right
        } else {
            parent.left
        }
    }

    pub(super) fn grandparent_of(&self, ptr: Ptr) -> Option<Ptr> {
        self.parent_of(self.parent_of(ptr)?)
    }

    /// Returns the sibling of this node's parent
    pub(super) fn uncle_of(&self, ptr: Ptr) -> Option<Ptr> {
        self.sibling_of(self.parent_of(ptr)?)
    }

    /// Puts `new_top` where `old_top` used to hang: in the same slot of the same parent, or at the
    /// root of the tree
    fn reparent_subtree(&mut self, old_top: Ptr, new_top: Ptr) {
        match self.parent_of(old_top) {
            Some(parent) => self.replace_child(parent, old_top, Some(new_top)),
            None => {
                self.root = Some(new_top);
                self.raw_mut(new_top).parent = None;
            },
        }
    }

    /// Rotates the subtree rooted at `ptr` to the left
    ///
    /// ```text
    ///     x                y
    ///    / \              / \
    ///   a   y     =>     x   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `ptr` has no right child.
    pub(super) fn left_rotate(&mut self, ptr: Ptr) {
        let pivot = match self.right_of(ptr) {
            Some(pivot) => pivot,
            None => panic!("bug: left rotation of node {} without a right child", ptr.index()),
        };
        let inner = self.left_of(pivot);

        self.reparent_subtree(ptr, pivot);
        self.set_child(pivot, Some(ptr), true);
        self.set_child(ptr, inner, false);
    }

    /// Rotates the subtree rooted at `ptr` to the right, the mirror image of `left_rotate`
    ///
    /// # Panics
    ///
    /// Panics if `ptr` has no left child.
    pub(super) fn right_rotate(&mut self, ptr: Ptr) {
        let pivot = match self.left_of(ptr) {
            Some(pivot) => pivot,
            None => panic!("bug: right rotation of node {} without a left child", ptr.index()),
        };
        let inner = self.right_of(pivot);

        self.reparent_subtree(ptr, pivot);
        self.set_child(pivot, Some(ptr), false);
        self.set_child(ptr, inner, true);
    }
}
