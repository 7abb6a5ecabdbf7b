use crate::error::InvariantError;
use crate::slab::Ptr;

use super::RBTree;

impl<T: Ord> RBTree<T> {
    /// Checks every red-black tree invariant, returning the first violation found
    ///
    /// Checks, in order: the root is black and has no parent, every parent link matches the edge
    /// it belongs to, no red node has a red child, all paths to an empty position cross the same
    /// number of black nodes, the values are strictly increasing in order, and `len()` matches the
    /// number of reachable nodes.
    ///
    /// Time complexity: `O(n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RBTree;
    ///
    /// let tree: RBTree<_> = (1..=100).collect();
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantError> {
        if let Some(root) = self.root {
            let root_node = self.raw(root);
            if root_node.is_red {
                return Err(InvariantError::RedRoot);
            }
            if root_node.parent.is_some() {
                return Err(InvariantError::RootHasParent);
            }

            self.validate_subtree(root, false, 0)?;
        }

        let mut reachable = 0;
        let mut previous: Option<&T> = None;
        for (position, node) in self.iter_inorder().enumerate() {
            if let Some(previous) = previous {
                if previous >= node.value() {
                    return Err(InvariantError::OutOfOrder {position});
                }
            }
            previous = Some(node.value());
            reachable += 1;
        }

        if reachable != self.len() {
            return Err(InvariantError::SizeMismatch {reported: self.len(), reachable});
        }

        Ok(())
    }

    /// Returns the black height of the subtree rooted at `ptr`, not counting `ptr` itself
    fn validate_subtree(&self, ptr: Ptr, parent_is_red: bool, depth: usize) -> Result<usize, InvariantError> {
        let node = self.raw(ptr);
        if parent_is_red && node.is_red {
            return Err(InvariantError::ConsecutiveReds {depth});
        }

        let mut heights = [0; 2];
        for (height, child) in heights.iter_mut().zip([node.left, node.right].iter()) {
            if let Some(child) = *child {
                if self.raw(child).parent != Some(ptr) {
                    return Err(InvariantError::BrokenParentLink);
                }

                let below = self.validate_subtree(child, node.is_red, depth + 1)?;
                *height = below + if self.raw(child).is_red { 0 } else { 1 };
            }
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantError::UnbalancedBlacks {left, right, depth});
        }

        Ok(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_valid() {
        let tree: RBTree<i32> = RBTree::new();
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn detects_red_root() {
        let mut tree: RBTree<_> = [2, 1, 3].iter().copied().collect();
        let root = tree.root.unwrap();
        tree.set_red(root, true);
        assert_eq!(tree.validate(), Err(InvariantError::RedRoot));
    }

    #[test]
    fn detects_consecutive_reds() {
        let mut tree: RBTree<_> = [20, 10, 30, 5].iter().copied().collect();
        let ten = tree.find_ptr(&10).unwrap();
        tree.set_red(ten, true);
        assert_eq!(tree.validate(), Err(InvariantError::ConsecutiveReds {depth: 2}));
    }

    #[test]
    fn detects_unbalanced_blacks() {
        let mut tree: RBTree<_> = [2, 1, 3].iter().copied().collect();
        let one = tree.find_ptr(&1).unwrap();
        tree.set_red(one, false);
        assert_eq!(tree.validate(), Err(InvariantError::UnbalancedBlacks {left: 1, right: 0, depth: 0}));
    }

    #[test]
    fn detects_broken_parent_link() {
        let mut tree: RBTree<_> = [2, 1, 3].iter().copied().collect();
        let one = tree.find_ptr(&1).unwrap();
        let three = tree.find_ptr(&3).unwrap();
        tree.raw_mut(one).parent = Some(three);
        assert_eq!(tree.validate(), Err(InvariantError::BrokenParentLink));
    }

    #[test]
    fn detects_out_of_order_values() {
        let mut tree: RBTree<_> = [2, 1, 3].iter().copied().collect();
        let one = tree.find_ptr(&1).unwrap();
        tree.raw_mut(one).value = 5;
        assert_eq!(tree.validate(), Err(InvariantError::OutOfOrder {position: 1}));
    }
}
