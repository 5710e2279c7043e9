//! The unbalanced BST. Nodes live in a generational arena and point at each other by index,
//! children from their parent's slots and parents through a non-owning back-reference.
//!
//! # Examples
//!
//! ```
//! use parent_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(&1).is_none());
//!
//! assert!(tree.insert(1));
//! assert_eq!(tree.search(&1).map(|n| *n.value()), Some(1));
//!
//! // Inserting a value that is already present does nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert!(tree.search(&1).is_none());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use generational_arena::{Arena, Index};

use crate::node::{Node, NodeId, NodeRef};
use crate::printer::Pretty;

/// A Binary Search Tree over unique, totally ordered values. It never rebalances.
#[derive(Clone)]
pub struct Tree<T> {
    pub(crate) nodes: Arena<Node<T>>,
    root: Option<Index>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Generates a `Tree` holding only `value`, at its root.
    pub fn with_root(value: T) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.insert(Node::new(value, None));
        Self {
            nodes,
            root: Some(root),
        }
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|root| NodeRef::new(self, root))
    }

    /// Resolves a handle to its node. Returns `None` if that node has since been removed from
    /// the tree.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.nodes.get(id.0).map(|_| NodeRef::new(self, id.0))
    }

    /// The height of the tree: 0 when empty, otherwise the height of the root.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// Makes `child` the left child of `parent` and points `child` back at `parent`.
    ///
    /// This is a raw link mutation, not an insert: nothing checks that the result is still a
    /// valid BST. `child` is first unlinked from wherever it hangs. The previous left subtree
    /// of `parent` is then dropped from the tree and its handles go stale. Linking a node into
    /// the slot it already occupies changes nothing.
    ///
    /// ## Panics
    ///
    /// When either handle refers to a deleted node, or when `child` is `parent` itself or one
    /// of its ancestors.
    pub fn set_left(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[parent.0].left == Some(child.0) {
            return;
        }
        self.unlink(parent.0, child.0);
        let previous = self.nodes[parent.0].left;
        self.drop_subtree(previous);
        self.link_left(parent.0, Some(child.0));
    }

    /// Makes `child` the right child of `parent` and points `child` back at `parent`.
    ///
    /// The mirror image of [`Tree::set_left`].
    ///
    /// ## Panics
    ///
    /// When either handle refers to a deleted node, or when `child` is `parent` itself or one
    /// of its ancestors.
    pub fn set_right(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[parent.0].right == Some(child.0) {
            return;
        }
        self.unlink(parent.0, child.0);
        let previous = self.nodes[parent.0].right;
        self.drop_subtree(previous);
        self.link_right(parent.0, Some(child.0));
    }

    /// The node holding the next smaller value than the node `id`, if any.
    ///
    /// ## Panics
    ///
    /// When `id` refers to a deleted node.
    pub fn in_order_predecessor(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.predecessor_of(id.0).map(|n| NodeRef::new(self, n))
    }

    /// The node holding the next larger value than the node `id`, if any.
    ///
    /// ## Panics
    ///
    /// When `id` refers to a deleted node.
    pub fn in_order_successor(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.successor_of(id.0).map(|n| NodeRef::new(self, n))
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            next: self.root.map(|root| self.leftmost(root)),
        }
    }

    /// A [`fmt::Display`] adapter drawing the tree sideways: the right subtree first, then the
    /// node, then the left subtree, each node on its own line indented four spaces per level.
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 7, 3].into_iter().collect();
    /// assert_eq!(tree.pretty().to_string(), "    7\n5\n    3\n");
    /// ```
    pub fn pretty(&self) -> Pretty<'_, T> {
        Pretty::new(self)
    }

    /// Height of the subtree rooted at `id`. An absent subtree has height 0.
    pub(crate) fn height_of(&self, id: Option<Index>) -> usize {
        // TODO this, `delete_below` and the range walks recurse once per level, so a long
        // sorted insert run can exhaust the stack. Insert and search already loop.
        let Some(id) = id else {
            return 0;
        };
        let node = &self.nodes[id];
        if node.is_leaf() {
            return 1;
        }
        1 + self.height_of(node.left).max(self.height_of(node.right))
    }

    pub(crate) fn predecessor_of(&self, id: Index) -> Option<Index> {
        if let Some(left) = self.nodes[id].left {
            return Some(self.rightmost(left));
        }
        // Climb until we leave a right subtree. Its parent is the first smaller ancestor.
        let mut current = id;
        while !self.is_right_child(current) {
            current = self.nodes[current].parent?;
        }
        self.nodes[current].parent
    }

    pub(crate) fn successor_of(&self, id: Index) -> Option<Index> {
        if let Some(right) = self.nodes[id].right {
            return Some(self.leftmost(right));
        }
        let mut current = id;
        while !self.is_left_child(current) {
            current = self.nodes[current].parent?;
        }
        self.nodes[current].parent
    }

    fn leftmost(&self, mut id: Index) -> Index {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: Index) -> Index {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    fn is_left_child(&self, id: Index) -> bool {
        self.nodes[id]
            .parent
            .map_or(false, |parent| self.nodes[parent].left == Some(id))
    }

    fn is_right_child(&self, id: Index) -> bool {
        self.nodes[id]
            .parent
            .map_or(false, |parent| self.nodes[parent].right == Some(id))
    }

    /// Points `parent`'s left slot at `child` and `child`'s parent at `parent` in one step.
    fn link_left(&mut self, parent: Index, child: Option<Index>) {
        self.nodes[parent].left = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(parent);
        }
    }

    fn link_right(&mut self, parent: Index, child: Option<Index>) {
        self.nodes[parent].right = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(parent);
        }
    }

    /// Clears the slot that currently holds `child` so it can be linked under `parent`.
    fn unlink(&mut self, parent: Index, child: Index) {
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            assert!(
                current != child,
                "Cannot link a node below itself or one of its descendants"
            );
            ancestor = self.nodes[current].parent;
        }

        // Every node except the root has a parent, and the root is an ancestor of `parent`.
        if let Some(old_parent) = self.nodes[child].parent {
            if self.nodes[old_parent].left == Some(child) {
                self.nodes[old_parent].left = None;
            } else {
                self.nodes[old_parent].right = None;
            }
            self.nodes[child].parent = None;
        }
    }

    /// Frees every node of the subtree rooted at `id`.
    fn drop_subtree(&mut self, id: Option<Index>) {
        let mut stack: Vec<Index> = id.into_iter().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id) {
                stack.extend(node.left);
                stack.extend(node.right);
            }
        }
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Inserts `value` as a new leaf. Returns `false`, leaving the tree untouched, if the value
    /// is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.insert(5));
    /// assert!(tree.insert(3));
    /// assert!(!tree.insert(5));
    ///
    /// assert_eq!(tree.root().and_then(|n| n.left()).map(|n| *n.value()), Some(3));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let Some(mut id) = self.root else {
            self.root = Some(self.nodes.insert(Node::new(value, None)));
            return true;
        };
        let ordering = loop {
            let node = &self.nodes[id];
            let ordering = value.cmp(&node.value);
            let next = match ordering {
                Ordering::Equal => return false,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            match next {
                Some(next) => id = next,
                None => break ordering,
            }
        };

        let leaf = Some(self.nodes.insert(Node::new(value, Some(id))));
        if ordering == Ordering::Less {
            self.link_left(id, leaf);
        } else {
            self.link_right(id, leaf);
        }

        if cfg!(debug_assertions) {
            let node = &self.nodes[id];
            if let Some(left) = node.left {
                assert!(node.value > self.nodes[left].value);
                assert_eq!(self.nodes[left].parent, Some(id));
            }
            if let Some(right) = node.right {
                assert!(node.value < self.nodes[right].value);
                assert_eq!(self.nodes[right].parent, Some(id));
            }
        }

        true
    }

    /// Finds the node holding `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 7].into_iter().collect();
    ///
    /// assert_eq!(tree.search(&5), tree.root());
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, value: &T) -> Option<NodeRef<'_, T>> {
        self.search_below(self.root, value)
            .map(|id| NodeRef::new(self, id))
    }

    /// Returns `true` if `value` is in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.search_below(self.root, value).is_some()
    }

    /// All values `v` with `start <= v <= end`, ascending. The bounds don't need to be in the
    /// tree. An inverted range (`start > end`) is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 7, 3, 2, 9, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.range(&2, &8), vec![&2, &3, &5, &7, &8]);
    /// assert_eq!(tree.range(&10, &20), Vec::<&i32>::new());
    /// ```
    pub fn range(&self, start: &T, end: &T) -> Vec<&T> {
        let mut values = Vec::new();
        self.collect_range(self.root, start, end, &mut values);
        values
    }

    /// Like [`Tree::range`] but the walk stops at the first out-of-range node on every path
    /// from the root. The result holds the in-range values all of whose ancestors are in range
    /// too, ascending.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 7, 3, 2, 9, 8].into_iter().collect();
    ///
    /// // 8 hangs below 9, which is out of range.
    /// assert_eq!(tree.range_from_root(&2, &8), vec![&2, &3, &5, &7]);
    /// ```
    pub fn range_from_root(&self, start: &T, end: &T) -> Vec<&T> {
        let mut values = Vec::new();
        self.collect_connected_range(self.root, start, end, &mut values);
        values
    }

    /// Deletes the node holding `value` and returns the value. If the tree does not contain it,
    /// nothing happens.
    ///
    /// A node with two children is replaced by its in-order predecessor when its left subtree
    /// is strictly taller than its right one, and by its in-order successor otherwise.
    /// That neighbour's node moves into the deleted node's place, keeping its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree: Tree<_> = vec![5, 3, 7].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&5), Some(5));
    /// assert_eq!(tree.root().map(|n| *n.value()), Some(7));
    /// assert_eq!(tree.delete(&5), None);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let (root, deleted) = self.delete_below(self.root, value);
        self.root = root;
        if let Some(root) = root {
            self.nodes[root].parent = None;
        }
        deleted
    }

    fn search_below(&self, mut id: Option<Index>, value: &T) -> Option<Index> {
        while let Some(current) = id {
            let node = &self.nodes[current];
            id = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(current),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    fn collect_range<'a>(&'a self, id: Option<Index>, start: &T, end: &T, out: &mut Vec<&'a T>) {
        let Some(id) = id else {
            return;
        };
        let node = &self.nodes[id];
        if node.value > *start {
            self.collect_range(node.left, start, end, out);
        }
        if *start <= node.value && node.value <= *end {
            out.push(&node.value);
        }
        if node.value < *end {
            self.collect_range(node.right, start, end, out);
        }
    }

    fn collect_connected_range<'a>(
        &'a self,
        id: Option<Index>,
        start: &T,
        end: &T,
        out: &mut Vec<&'a T>,
    ) {
        let Some(id) = id else {
            return;
        };
        let node = &self.nodes[id];
        if node.value < *start || node.value > *end {
            return;
        }
        if node.value > *start {
            self.collect_connected_range(node.left, start, end, out);
        }
        out.push(&node.value);
        if node.value < *end {
            self.collect_connected_range(node.right, start, end, out);
        }
    }

    /// Deletes `value` from the subtree rooted at `id`. Returns the new root of that subtree,
    /// which the caller links back into its slot, together with the removed value.
    fn delete_below(&mut self, id: Option<Index>, value: &T) -> (Option<Index>, Option<T>) {
        let Some(id) = id else {
            return (None, None);
        };
        match value.cmp(&self.nodes[id].value) {
            Ordering::Less => {
                let (left, deleted) = self.delete_below(self.nodes[id].left, value);
                self.link_left(id, left);
                (Some(id), deleted)
            }
            Ordering::Greater => {
                let (right, deleted) = self.delete_below(self.nodes[id].right, value);
                self.link_right(id, right);
                (Some(id), deleted)
            }
            Ordering::Equal => {
                let (replacement, deleted) = self.excise(id);
                (replacement, Some(deleted))
            }
        }
    }

    /// Removes the node `id` from its subtree, returning the subtree's new root and the
    /// node's value. A node with two children is replaced by the neighbour node itself, so
    /// every other handle keeps pointing at the same value.
    fn excise(&mut self, id: Index) -> (Option<Index>, T) {
        let node = &self.nodes[id];
        match (node.left, node.right) {
            (None, None) => (None, self.take(id)),
            (Some(child), None) | (None, Some(child)) => (Some(child), self.take(id)),
            (Some(left), Some(right)) => {
                let donor = if self.height_of(Some(left)) > self.height_of(Some(right)) {
                    let predecessor = self.rightmost(left);
                    if predecessor != left {
                        let orphan = self.nodes[predecessor].left;
                        self.splice(predecessor, orphan);
                        self.link_left(predecessor, Some(left));
                    }
                    self.link_right(predecessor, Some(right));
                    predecessor
                } else {
                    let successor = self.leftmost(right);
                    if successor != right {
                        let orphan = self.nodes[successor].right;
                        self.splice(successor, orphan);
                        self.link_right(successor, Some(right));
                    }
                    self.link_left(successor, Some(left));
                    successor
                };
                // The caller links `donor` into the slot `id` occupied.
                (Some(donor), self.take(id))
            }
        }
    }

    /// Puts `child` in whichever slot of its parent `id` occupies. `id` must have a parent.
    fn splice(&mut self, id: Index, child: Option<Index>) {
        let parent = self.nodes[id].parent;
        match parent {
            Some(parent) if self.nodes[parent].left == Some(id) => self.link_left(parent, child),
            Some(parent) => self.link_right(parent, child),
            None => unreachable!("A neighbour inside a subtree always has a parent"),
        }
    }

    /// Frees the slot of a node that is no longer linked from anywhere.
    fn take(&mut self, id: Index) -> T {
        match self.nodes.remove(id) {
            Some(node) => node.value,
            None => unreachable!("Removing a node that is not in the arena"),
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An ascending iterator over the values of a [`Tree`]. Each step follows the parent links
/// to the in-order successor.
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    next: Option<Index>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.successor_of(current);
        Some(&self.tree.nodes[current].value)
    }
}
