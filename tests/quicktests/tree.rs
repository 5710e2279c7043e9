use parent_bst::{NodeRef, Tree};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of values in both.
fn do_ops<V>(ops: &[Op<V>], bst: &mut Tree<V>, set: &mut BTreeSet<V>)
where
    V: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(v) => {
                assert_eq!(bst.insert(v.clone()), set.insert(v.clone()));
            }
            Op::Delete(v) => {
                assert_eq!(bst.delete(v), set.take(v));
            }
        }
    }
}

/// Walks the whole tree checking ordering bounds, back-references and heights. Returns the
/// height of the subtree rooted at `node`.
fn check_subtree(node: NodeRef<'_, i8>, low: Option<i8>, high: Option<i8>) -> usize {
    let value = *node.value();
    assert!(low.map_or(true, |low| value > low));
    assert!(high.map_or(true, |high| value < high));

    let left_height = node.left().map_or(0, |left| {
        assert_eq!(left.parent(), Some(node));
        assert!(left.is_left_child());
        assert_eq!(left.depth(), node.depth() + 1);
        check_subtree(left, low, Some(value))
    });
    let right_height = node.right().map_or(0, |right| {
        assert_eq!(right.parent(), Some(node));
        assert!(right.is_right_child());
        assert_eq!(right.depth(), node.depth() + 1);
        check_subtree(right, Some(value), high)
    });

    assert_eq!(node.is_leaf(), left_height == 0 && right_height == 0);
    assert_eq!(node.height(), 1 + left_height.max(right_height));
    node.height()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    if let Some(root) = tree.root() {
        assert_eq!(root.depth(), 1);
        assert_eq!(check_subtree(root, None, None), tree.height());
    }

    tree.len() == set.len() && tree.iter().eq(set.iter())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x).map(|n| n.value()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn duplicate_inserts_change_nothing(xs: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let before = tree.pretty().to_string();

    let reinserted = xs.iter().any(|x| tree.insert(*x));

    !reinserted && tree.pretty().to_string() == before
}

#[quickcheck]
fn range_matches_filter(xs: Vec<i8>, a: i8, b: i8) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let (start, end) = (a.min(b), a.max(b));

    let expected: BTreeSet<i8> = xs
        .into_iter()
        .filter(|x| (start..=end).contains(x))
        .collect();

    tree.range(&start, &end).into_iter().copied().eq(expected)
}

#[quickcheck]
fn range_from_root_is_a_subsequence_of_range(xs: Vec<i8>, a: i8, b: i8) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let (start, end) = (a.min(b), a.max(b));

    let full = tree.range(&start, &end);
    let connected = tree.range_from_root(&start, &end);
    let mut remaining = full.iter();

    connected.iter().all(|v| remaining.any(|w| w == v))
}

#[quickcheck]
fn neighbours_follow_sorted_order(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let sorted: Vec<i8> = tree.iter().copied().collect();

    sorted.iter().enumerate().all(|(i, v)| {
        let node = tree.search(v).unwrap();
        let predecessor = node.in_order_predecessor().map(|n| *n.value());
        let successor = node.in_order_successor().map(|n| *n.value());

        predecessor == i.checked_sub(1).map(|j| sorted[j])
            && successor == sorted.get(i + 1).copied()
    })
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.search(x).is_none())
        && still_present.iter().all(|x| tree.contains(x))
}
