//! The rebalancing state machines run after a structural edit
//!
//! Both repairs are written as upward loops. Each iteration either stops or moves exactly one
//! level closer to the root, so they run at most `O(log n)` times.

use log::trace;

use crate::slab::Ptr;

use super::RBTree;

impl<T> RBTree<T> {
    /// Restores the red-black properties after `ptr` was linked into the tree as a red leaf
    pub(super) fn insertion_repair(&mut self, ptr: Ptr) {
        let mut node = ptr;
        loop {
            let parent = match self.parent_of(node) {
                Some(parent) => parent,
                None => {
                    trace!("insertion repair: node {} is the root", node.index());
                    self.set_red(node, false);
                    return;
                },
            };

            if !self.is_red(Some(parent)) {
                return;
            }

            // The root is always black, so a red parent always has a parent of its own
            let grandparent = match self.grandparent_of(node) {
                Some(grandparent) => grandparent,
                None => panic!("bug: red node {} has no parent", parent.index()),
            };

            let uncle = self.uncle_of(node);
            if self.is_red(uncle) {
                trace!("insertion repair: red uncle, recoloring and moving up to node {}", grandparent.index());
                self.set_red(parent, false);
                if let Some(uncle) = uncle {
                    self.set_red(uncle, false);
                }
                self.set_red(grandparent, true);
                node = grandparent;
                continue;
            }

            let parent_is_left = self.left_of(grandparent) == Some(parent);
            let node_is_left = self.left_of(parent) == Some(node);
            // A left rotation at the parent makes the node the new parent and vice versa
            let (node, parent) = if parent_is_left && !node_is_left {
                trace!("insertion repair: left-right zig-zag at node {}", node.index());
                self.left_rotate(parent);
                (parent, node)
            } else if !parent_is_left && node_is_left {
                trace!("insertion repair: right-left zig-zag at node {}", node.index());
                self.right_rotate(parent);
                (parent, node)
            } else {
                (node, parent)
            };

            trace!("insertion repair: rotating at grandparent {}", grandparent.index());
            self.set_red(parent, false);
            self.set_red(grandparent, true);
            if self.left_of(parent) == Some(node) {
                self.right_rotate(grandparent);
            } else {
                self.left_rotate(grandparent);
            }
            return;
        }
    }

    /// Rebalances around the black node `ptr` so that unlinking it afterwards keeps every black
    /// height equal
    ///
    /// Must run while `ptr` is still in the tree: the case analysis depends on its sibling and
    /// parent.
    pub(super) fn prepare_removal(&mut self, ptr: Ptr) {
        let mut node = ptr;
        loop {
            if self.is_red(Some(node)) {
                return;
            }
            let parent = match self.parent_of(node) {
                Some(parent) => parent,
                None => return,
            };

            let is_left = self.left_of(parent) == Some(node);
            let mut sibling = self.expect_sibling(node);

            if self.is_red(Some(sibling)) {
                trace!("prepare removal: red sibling {}, rotating at parent", sibling.index());
                self.set_red(parent, true);
                self.set_red(sibling, false);
                if is_left {
                    self.left_rotate(parent);
                } else {
                    self.right_rotate(parent);
                }
                sibling = self.expect_sibling(node);
            }

            let (near, far) = self.nephews(sibling, is_left);
            if !self.is_red(near) && !self.is_red(far) {
                if !self.is_red(Some(parent)) {
                    trace!("prepare removal: black parent and nephews, moving up to node {}", parent.index());
                    self.set_red(sibling, true);
                    node = parent;
                    continue;
                }

                trace!("prepare removal: red parent absorbs the missing black");
                self.set_red(parent, false);
                self.set_red(sibling, true);
                return;
            }

            // Not both black, so a black far child means the near child is red
            if let (Some(near), false) = (near, self.is_red(far)) {
                trace!("prepare removal: red near nephew {}, rotating at sibling", near.index());
                self.set_red(sibling, true);
                self.set_red(near, false);
                if is_left {
                    self.right_rotate(sibling);
                } else {
                    self.left_rotate(sibling);
                }
                sibling = self.expect_sibling(node);
            }

            let far = match self.nephews(sibling, is_left).1 {
                Some(far) => far,
                None => panic!("bug: sibling {} has no far child to rotate up", sibling.index()),
            };
            trace!("prepare removal: red far nephew {}, rotating at parent", far.index());
            let parent_is_red = self.is_red(Some(parent));
            self.set_red(sibling, parent_is_red);
            self.set_red(parent, false);
            self.set_red(far, false);
            if is_left {
                self.left_rotate(parent);
            } else {
                self.right_rotate(parent);
            }
            return;
        }
    }

    /// A black non-root node always has a sibling, otherwise the black heights on either side of
    /// its parent would differ
    fn expect_sibling(&self, ptr: Ptr) -> Ptr {
        match self.sibling_of(ptr) {
            Some(sibling) => sibling,
            None => panic!("bug: black node {} has no sibling", ptr.index()),
        }
    }

    /// Returns the (near, far) children of `sibling` relative to a node on the `is_left` side
    fn nephews(&self, sibling: Ptr, is_left: bool) -> (Option<Ptr>, Option<Ptr>) {
        let sibling = self.raw(sibling);
        if is_left {
            (sibling.left, sibling.right)
        } else {
            (sibling.right, sibling.left)
        }
    }
}
