//! An unbalanced Binary Search Tree (BST) whose nodes know their parents.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! may have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! This tree never rebalances, so its operations take `O(height)` where `height` can be as
//! large as the number of stored values when they are inserted in sorted order.
//!
//! ## Parent links
//!
//! Every node also keeps a reference back to its parent, which is what makes walking to the
//! in-order predecessor or successor of an arbitrary node possible without a stack. Nodes are
//! stored in an arena and refer to each other by index, so the back-references never own
//! anything and can't form reference cycles.
//!
//! # Examples
//!
//! ```
//! use parent_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for value in [5, 7, 3, 2, 9, 8] {
//!     tree.insert(value);
//! }
//!
//! let root = tree.root().unwrap();
//! assert_eq!(*root.value(), 5);
//! assert_eq!(tree.height(), 4);
//!
//! assert_eq!(tree.range(&2, &8), vec![&2, &3, &5, &7, &8]);
//! assert_eq!(root.in_order_successor().map(|n| *n.value()), Some(7));
//!
//! assert_eq!(tree.delete(&5), Some(5));
//! assert!(tree.search(&5).is_none());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod node;
mod printer;
pub mod tree;


pub use node::{NodeId, NodeRef};
pub use printer::Pretty;
pub use tree::{Iter, Tree};
