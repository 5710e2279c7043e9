//! Nodes of a [`Tree`] and borrowed handles to them.
//!
//! Nodes are owned by the tree's arena. Outside the tree they are reached through a
//! [`NodeRef`], which borrows the tree and answers the structural questions (is this a leaf,
//! which side of its parent is it on, how tall is it, how deep is it).
//!
//! # Examples
//!
//! ```
//! use parent_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for value in [5, 3, 7, 8] {
//!     tree.insert(value);
//! }
//!
//! let seven = tree.search(&7).unwrap();
//! assert!(seven.is_right_child());
//! assert!(!seven.is_leaf());
//! assert_eq!(seven.height(), 2);
//! assert_eq!(seven.depth(), 2);
//! assert_eq!(seven.parent(), tree.root());
//! ```

use std::fmt;
use std::ptr;

use generational_arena::Index;

use crate::tree::Tree;

/// An opaque handle to a node of a [`Tree`]. It keeps pointing at the same value until that
/// node is deleted or dropped by a link primitive, after which [`Tree::node`] resolves it to
/// `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// A vertex of the tree as stored in the arena.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<Index>,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, parent: Option<Index>) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A shared borrow of one node inside a [`Tree`].
///
/// Two `NodeRef`s are equal when they point at the same node of the same tree. Values are
/// never compared.
pub struct NodeRef<'a, T> {
    tree: &'a Tree<T>,
    id: Index,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> PartialEq for NodeRef<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}
impl<'a, T> Eq for NodeRef<'a, T> {}

impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, T> fmt::Display for NodeRef<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value().fmt(f)
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// Callers must only pass indices that are live in `tree`'s arena.
    pub(crate) fn new(tree: &'a Tree<T>, id: Index) -> Self {
        Self { tree, id }
    }

    fn node(&self) -> &'a Node<T> {
        &self.tree.nodes[self.id]
    }

    fn relative(&self, id: Option<Index>) -> Option<Self> {
        id.map(|id| Self::new(self.tree, id))
    }

    /// The handle for this node, usable with the tree's link primitives.
    pub fn id(&self) -> NodeId {
        NodeId(self.id)
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// The node this one hangs from, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.relative(self.node().parent)
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<Self> {
        self.relative(self.node().left)
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<Self> {
        self.relative(self.node().right)
    }

    /// Returns `true` iff this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Returns `true` iff this node has a parent and is that parent's left child.
    pub fn is_left_child(&self) -> bool {
        self.node()
            .parent
            .map_or(false, |parent| self.tree.nodes[parent].left == Some(self.id))
    }

    /// Returns `true` iff this node has a parent and is that parent's right child.
    pub fn is_right_child(&self) -> bool {
        self.node()
            .parent
            .map_or(false, |parent| self.tree.nodes[parent].right == Some(self.id))
    }

    /// The number of nodes on the longest downward path from this node to a leaf. A leaf has
    /// a height of 1.
    pub fn height(&self) -> usize {
        self.tree.height_of(Some(self.id))
    }

    /// The number of nodes on the path from the root down to this node. The root has a depth
    /// of 1.
    ///
    /// This walks the parent links so it costs `O(depth)`.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.node();
        while let Some(parent) = current.parent {
            depth += 1;
            current = &self.tree.nodes[parent];
        }
        depth
    }

    /// The node holding the next smaller value in the tree, or `None` if this node holds the
    /// smallest value.
    pub fn in_order_predecessor(&self) -> Option<Self> {
        self.relative(self.tree.predecessor_of(self.id))
    }

    /// The node holding the next larger value in the tree, or `None` if this node holds the
    /// largest value.
    pub fn in_order_successor(&self) -> Option<Self> {
        self.relative(self.tree.successor_of(self.id))
    }
}
