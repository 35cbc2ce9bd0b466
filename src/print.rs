use core::fmt::{self, Display, Write};

use alloc::string::String;

use crate::RedBlackTree;

/// Layout of the diagnostic tree rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces added per level of depth.
    pub indent_step: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { indent_step: 5 }
    }
}

impl<K: Ord + Display> RedBlackTree<K> {
    /// Writes the tree sideways: right subtree first, deeper nodes further
    /// to the right, each key followed by its color tag.
    ///
    /// Every node is emitted as an empty line, then the indented
    /// `key(R)` or `key(B)` line.
    pub fn write_tree<W: Write>(&self, out: &mut W, options: &RenderOptions) -> fmt::Result {
        for (idx, depth) in self.reverse_in_order() {
            let node = self.node(idx);
            let indent = depth * options.indent_step;

            writeln!(out)?;
            writeln!(out, "{:indent$}{}({})", "", node.key, node.color.tag())?;
        }

        Ok(())
    }

    /// Borrows the tree as a [`Display`] value laid out with `options`.
    pub fn display_with<'a>(&'a self, options: &'a RenderOptions) -> TreeDisplay<'a, K> {
        TreeDisplay {
            tree: self,
            options,
        }
    }

    #[must_use]
    pub fn render_with(&self, options: &RenderOptions) -> String {
        self.display_with(options).to_string()
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    /// Prints [`RedBlackTree::render`] to standard output.
    pub fn print(&self) {
        print!("{}", self.render());
    }
}

/// [`Display`] adapter returned by [`RedBlackTree::display_with`].
pub struct TreeDisplay<'a, K: Ord> {
    tree: &'a RedBlackTree<K>,
    options: &'a RenderOptions,
}

impl<K: Ord + Display> Display for TreeDisplay<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.write_tree(f, self.options)
    }
}

impl<K: Ord + Display> Display for RedBlackTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, &RenderOptions::default())
    }
}
