use std::fmt;

use generational_arena::Index;

use crate::tree::Tree;

const INDENT: &str = "    ";

/// Renders a [`Tree`] sideways for manual inspection. Built by [`Tree::pretty`].
///
/// Reading top to bottom gives the values in descending order. The root sits at the left
/// margin and every level below it is indented four more spaces. The layout is meant for
/// humans and may change.
pub struct Pretty<'a, T> {
    tree: &'a Tree<T>,
}

impl<'a, T> Pretty<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Self { tree }
    }

    fn write_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: Option<Index>,
        depth: usize,
    ) -> fmt::Result
    where
        T: fmt::Display,
    {
        let Some(id) = id else {
            return Ok(());
        };
        let node = &self.tree.nodes[id];
        self.write_subtree(f, node.right, depth + 1)?;
        writeln!(f, "{}{}", INDENT.repeat(depth), node.value)?;
        self.write_subtree(f, node.left, depth + 1)
    }
}

impl<'a, T> fmt::Display for Pretty<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_subtree(f, self.tree.root().map(|root| root.id().0), 0)
    }
}
