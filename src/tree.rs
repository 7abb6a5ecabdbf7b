mod node;
mod preorder;
mod inorder;
mod postorder;
mod bfs;
mod rotate;
mod repair;
mod validate;

pub use node::*;
pub use preorder::*;
pub use inorder::*;
pub use postorder::*;
pub use bfs::*;

use std::fmt;
use std::mem;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::iter::FromIterator;

use log::debug;

use crate::slab::{Ptr, Slab};

pub(crate) use node::RawNode;

/// A red-black tree storing a set of ordered values
///
/// BST properties: For each node with value `v`:
/// - The value of each node in the left subtree is less than `v`
/// - The value of each node in the right subtree is greater than `v`
///
/// Red-black properties:
/// - The root is black and every red node has only black children
/// - Every path from a node down to an empty position passes through the same number of black
///   nodes
///
/// Together these keep the height of the tree at most `2 * log2(n + 1)`.
///
/// Duplicate values are not allowed. Inserting a value that already exists in the tree does not
/// modify the tree.
pub struct RBTree<T> {
    nodes: Slab<RawNode<T>>,
    root: Option<Ptr>,
}

impl<T> Default for RBTree<T> {
    fn default() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }
}

impl<T> fmt::Debug for RBTree<T>
    where T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RBTree")
            .field("len", &self.len())
            .field("root", &self.root())
            .finish()
    }
}

/// Two trees are equal if they have exactly the same shape, values and colors
impl<T: PartialEq> PartialEq for RBTree<T> {
    fn eq(&self, other: &Self) -> bool {
        // A pre-order walk that records which children are present identifies the shape uniquely
        self.len() == other.len() && self.iter_preorder().zip(other.iter_preorder()).all(|(a, b)| {
            a.value() == b.value()
                && a.is_red() == b.is_red()
                && a.has_left() == b.has_left()
                && a.has_right() == b.has_right()
        })
    }
}

impl<T: Eq> Eq for RBTree<T> {}

impl<T> RBTree<T> {
    /// Creates an empty `RBTree`
    ///
    /// The tree is initially created with a capacity of 0, so it will not allocate until it is
    /// first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RBTree;
    /// let tree: RBTree<&str> = RBTree::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with the specified capacity.
    ///
    /// The tree will be able to hold at least `capacity` elements without reallocating. If
    /// `capacity` is 0, the tree will not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RBTree;
    /// let tree: RBTree<&str> = RBTree::with_capacity(10);
    /// assert!(tree.capacity() >= 10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of values in the tree
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.nodes.is_empty() == self.root.is_none());
        self.nodes.is_empty()
    }

    /// Returns the number of elements the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of nodes on the longest path from the root down to a leaf, or 0 if the
    /// tree is empty
    ///
    /// Time complexity: `O(n)`
    pub fn height(&self) -> usize {
        self.root().map_or(0, |root| root.height())
    }

    /// Clears the tree, removing all values
    ///
    /// Note that this method has no effect on the allocated capacity of the tree.
    pub fn clear(&mut self) {
        debug!("clearing tree with {} values", self.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the tree.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional)
    }

    /// Shrinks the capacity of the tree as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// The root changes as the tree rebalances itself. For a guaranteed ordering, use the various
    /// iteration methods.
    ///
    /// This is a low-level API meant to be used for implementing custom traversals and debug
    /// renderers.
    pub fn root(&self) -> Option<Node<T>> {
        self.root.map(|root| Node::new(&self.nodes, root))
    }

    /// Returns the smallest value in the tree, or `None` if the tree is empty
    ///
    /// Time complexity: `O(log n)`
    pub fn min(&self) -> Option<&T> {
        self.root().map(|root| root.min().value())
    }

    /// Returns the largest value in the tree, or `None` if the tree is empty
    ///
    /// Time complexity: `O(log n)`
    pub fn max(&self) -> Option<&T> {
        self.root().map(|root| root.max().value())
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<T> {
        IterPreorder::new(&self.nodes, self.root)
    }

    /// Performs an in-order traversal of the tree, visiting values in increasing order
    pub fn iter_inorder(&self) -> IterInorder<T> {
        IterInorder::new(&self.nodes, self.root)
    }

    /// Performs a post-order traversal of the tree
    pub fn iter_postorder(&self) -> IterPostorder<T> {
        IterPostorder::new(&self.nodes, self.root)
    }

    /// Performs a breadth-first (level order) traversal of the tree
    pub fn iter_bfs(&self) -> IterBfs<T> {
        IterBfs::new(&self.nodes, self.root)
    }
}

impl<T: Ord> RBTree<T> {
    /// Searches for `value`, returning its node if present, or otherwise the node that would
    /// become its parent if it were inserted
    ///
    /// Returns `None` only if the tree is empty.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RBTree;
    ///
    /// let tree: RBTree<_> = [20, 10, 30].iter().copied().collect();
    /// assert_eq!(tree.search(&10).map(|node| *node.value()), Some(10));
    /// // 25 would be inserted as the left child of 30
    /// assert_eq!(tree.search(&25).map(|node| *node.value()), Some(30));
    /// ```
    pub fn search<Q>(&self, value: &Q) -> Option<Node<T>>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.search_ptr(value).map(|ptr| Node::new(&self.nodes, ptr))
    }

    /// Returns `true` if the tree contains the specified value.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering on the
    /// borrowed form must match the ordering on the value type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(1);
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&2));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.find_ptr(value).is_some()
    }

    /// Returns a reference to the value in the tree equal to the given one, if any
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(String::from("abc"));
    /// assert_eq!(tree.get("abc"), Some(&String::from("abc")));
    /// assert_eq!(tree.get("def"), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.find_ptr(value).map(|ptr| &self.raw(ptr).value)
    }

    /// Inserts a new value into the tree
    ///
    /// If the tree did not have this value present, `true` is returned.
    ///
    /// If the tree did have this value present, `false` is returned, and the tree is not modified.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert!(tree.insert(37));
    /// assert!(!tree.insert(37));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let parent = match self.search_ptr(&value) {
            Some(parent) => parent,
            None => {
                self.root = Some(self.nodes.push(RawNode::new(value, false)));
                return true;
            },
        };

        let is_left = match value.cmp(&self.raw(parent).value) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => return false,
        };

        let ptr = self.nodes.push(RawNode::new(value, true));
        self.set_child(parent, Some(ptr), is_left);
        self.insertion_repair(ptr);

        true
    }

    /// Removes a value from the tree. Returns whether the value was present in the tree.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering on the
    /// borrowed form must match the ordering on the value type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(String::from("abc"));
    /// assert!(tree.remove("abc"));
    /// assert!(!tree.remove("def"));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the value in the tree, if any, that is equal to the given one.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(String::from("abc"));
    /// assert_eq!(tree.take("abc"), Some(String::from("abc")));
    /// assert_eq!(tree.take("def"), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut target = self.find_ptr(value)?;

        // A node with two children is never unlinked directly. Its in-order predecessor (which
        // has at most one child) trades values with it and is removed instead.
        if let (Some(left), Some(_)) = (self.left_of(target), self.right_of(target)) {
            let predecessor = Node::new(&self.nodes, left).max().ptr();
            let (target_node, predecessor_node) = self.nodes.get2_mut(target, predecessor);
            mem::swap(&mut target_node.value, &mut predecessor_node.value);
            target = predecessor;
        }

        if !self.is_red(Some(target)) {
            self.prepare_removal(target);
        }

        // Repair may have rotated the tree, so the parent is only read now
        let child = self.left_of(target).or_else(|| self.right_of(target));
        match self.parent_of(target) {
            Some(parent) => self.replace_child(parent, target, child),
            None => {
                self.root = child;
                if let Some(child) = child {
                    let child_node = self.raw_mut(child);
                    child_node.parent = None;
                    child_node.is_red = false;
                }
            },
        }

        Some(self.nodes.remove(target).value)
    }

    /// Returns the node holding `value` or the last node visited before running off the tree
    pub(crate) fn search_ptr<Q>(&self, value: &Q) -> Option<Ptr>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut current = self.root?;
        loop {
            let node = self.raw(current);
            let next = match value.cmp(node.value.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(current),
            };

            match next {
                Some(next) => current = next,
                None => return Some(current),
            }
        }
    }

    /// Returns the node holding exactly `value`, if any
    pub(crate) fn find_ptr<Q>(&self, value: &Q) -> Option<Ptr>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.search_ptr(value)
            .filter(|&ptr| value.cmp(self.raw(ptr).value.borrow()) == Ordering::Equal)
    }
}

impl<T: Ord> Extend<T> for RBTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for RBTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
