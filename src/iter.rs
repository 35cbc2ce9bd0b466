use alloc::vec::Vec;

use crate::{NodeIndex, RedBlackTree};

/// Ascending walk over node positions, driven by an explicit stack.
pub(crate) struct InOrder<'a, K: Ord> {
    pub(crate) tree: &'a RedBlackTree<K>,
    pub(crate) curr: Option<NodeIndex>,
    pub(crate) stack: Vec<NodeIndex>,
}

impl<K: Ord> Iterator for InOrder<'_, K> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(curr) = self.curr {
            self.stack.push(curr);
            self.curr = self.tree.node(curr).left;
        }

        let node = self.stack.pop()?;
        self.curr = self.tree.node(node).right;

        Some(node)
    }
}

/// Right-to-left walk yielding each node with its depth below the root.
pub(crate) struct ReverseInOrder<'a, K: Ord> {
    pub(crate) tree: &'a RedBlackTree<K>,
    pub(crate) curr: Option<(NodeIndex, usize)>,
    pub(crate) stack: Vec<(NodeIndex, usize)>,
}

impl<K: Ord> Iterator for ReverseInOrder<'_, K> {
    type Item = (NodeIndex, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((curr, depth)) = self.curr {
            self.stack.push((curr, depth));
            self.curr = self.tree.node(curr).right.map(|right| (right, depth + 1));
        }

        let (node, depth) = self.stack.pop()?;
        self.curr = self.tree.node(node).left.map(|left| (left, depth + 1));

        Some((node, depth))
    }
}

impl<K: Ord> RedBlackTree<K> {
    pub(crate) fn in_order(&self) -> InOrder<'_, K> {
        InOrder {
            tree: self,
            curr: self.root(),
            stack: Vec::new(),
        }
    }

    pub(crate) fn reverse_in_order(&self) -> ReverseInOrder<'_, K> {
        ReverseInOrder {
            tree: self,
            curr: self.root().map(|root| (root, 0)),
            stack: Vec::new(),
        }
    }
}
