//! An ordered container backed by a red-black tree.
//!
//! Nodes are stored in an arena owned by the tree and linked through
//! arena indices. Absent links are `None` and count as black leaves,
//! so there is no sentinel node to keep in sync.

extern crate alloc;

use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;

mod delete;
mod error;
mod iter;
mod print;
mod validate;

pub use error::{InvariantViolation, TreeError};
pub use print::{RenderOptions, TreeDisplay};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum NodeColor {
    #[default]
    Red,
    Black,
}

impl NodeColor {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            NodeColor::Red => "R",
            NodeColor::Black => "B",
        }
    }
}

/// Which child slot of a node a link occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Position of a node inside the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeIndex(pub(crate) usize);

#[derive(Debug)]
pub(crate) struct RbNode<K> {
    pub(crate) key: K,
    pub(crate) color: NodeColor,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) left: Option<NodeIndex>,
    pub(crate) right: Option<NodeIndex>,
}

impl<K> RbNode<K> {
    fn new_isolated(key: K) -> Self {
        Self {
            key,
            color: NodeColor::default(),
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeIndex> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeIndex> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Arena cell. Vacant cells form a singly linked free list.
#[derive(Debug)]
enum Slot<K> {
    Occupied(RbNode<K>),
    Vacant { next_free: Option<NodeIndex> },
}

/// A red-black tree over totally ordered keys.
///
/// Equal keys are permitted; a duplicate is placed after the keys already
/// equal to it in the in-order sequence.
#[derive(Debug)]
pub struct RedBlackTree<K: Ord> {
    storage: Vec<Slot<K>>,
    free_head: Option<NodeIndex>,
    root: Option<NodeIndex>,
    len: usize,
}

impl<K: Ord> RedBlackTree<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tree whose arena can hold `capacity` nodes before
    /// reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            free_head: None,
            root: None,
            len: 0,
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.storage.clear();
        self.free_head = None;
        self.root = None;
        self.len = 0;
    }

    #[must_use]
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|root| &self.node(root).key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Snapshot of every key in ascending order, duplicates included.
    #[must_use]
    pub fn keys_in_order(&self) -> Vec<&K> {
        self.in_order().map(|idx| &self.node(idx).key).collect()
    }

    pub fn insert(&mut self, key: K) {
        let mut current_node = self.root;
        let mut parent_node = None;
        let mut side = Side::Left;

        while let Some(current) = current_node {
            parent_node = Some(current);
            let curr_node_storage = self.node(current);

            side = if key < curr_node_storage.key {
                Side::Left
            } else {
                Side::Right
            };
            current_node = curr_node_storage.child(side);
        }

        let mut new_node = RbNode::new_isolated(key);
        new_node.parent = parent_node;
        let new_node_pos = self.allocate(new_node);

        match parent_node {
            None => self.root = Some(new_node_pos),
            Some(parent) => *self.node_mut(parent).child_mut(side) = Some(new_node_pos),
        }
        self.len += 1;

        self.fix_red_violation(new_node_pos);
    }

    /// Rotates the whole tree left around its root.
    ///
    /// Does nothing if the tree is empty or the root has no right child. The
    /// balancing invariants are not restored afterwards.
    pub fn rotate_left_at_root(&mut self) {
        if let Some(root) = self.root {
            if self.node(root).right.is_some() {
                self.rotate_left(root);
            }
        }
    }

    /// Mirror of [`RedBlackTree::rotate_left_at_root`].
    pub fn rotate_right_at_root(&mut self) {
        if let Some(root) = self.root {
            if self.node(root).left.is_some() {
                self.rotate_right(root);
            }
        }
    }

    pub(crate) fn find(&self, key: &K) -> Option<NodeIndex> {
        let mut current_node = self.root;

        while let Some(current) = current_node {
            let curr_node_storage = self.node(current);

            match key.cmp(&curr_node_storage.key) {
                Ordering::Less => current_node = curr_node_storage.left,
                Ordering::Equal => return Some(current),
                Ordering::Greater => current_node = curr_node_storage.right,
            }
        }

        None
    }

    /// Restores the red invariants after `start_node_idx` was inserted red.
    fn fix_red_violation(&mut self, start_node_idx: NodeIndex) {
        let mut curr_node = start_node_idx;

        while let Some(mut parent_idx) = self.node(curr_node).parent {
            if !self.is_red(Some(parent_idx)) {
                break;
            }
            // A red parent is never the root, so it has a parent of its own.
            let Some(grandparent_idx) = self.node(parent_idx).parent else {
                break;
            };

            let parent_side = self.side_of(grandparent_idx, parent_idx);
            let uncle = self.node(grandparent_idx).child(parent_side.opposite());

            if self.is_red(uncle) {
                log::trace!("insert fixup: red uncle, recoloring at {grandparent_idx:?}");
                self.set_color(parent_idx, NodeColor::Black);
                self.set_color_opt(uncle, NodeColor::Black);
                self.set_color(grandparent_idx, NodeColor::Red);

                curr_node = grandparent_idx;
                continue;
            }

            if self.node(parent_idx).child(parent_side.opposite()) == Some(curr_node) {
                log::trace!("insert fixup: inner grandchild {curr_node:?}");
                self.rotate(parent_idx, parent_side);
                curr_node = parent_idx;
                parent_idx = match self.node(curr_node).parent {
                    Some(parent) => parent,
                    None => break,
                };
            }

            log::trace!("insert fixup: outer grandchild, rotating at {grandparent_idx:?}");
            self.set_color(parent_idx, NodeColor::Black);
            self.set_color(grandparent_idx, NodeColor::Red);
            self.rotate(grandparent_idx, parent_side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, NodeColor::Black);
        }
    }

    /// Rotates `center` down towards `side`, promoting its child on the
    /// opposite side.
    pub(crate) fn rotate(&mut self, center: NodeIndex, side: Side) {
        match side {
            Side::Left => self.rotate_left(center),
            Side::Right => self.rotate_right(center),
        }
    }

    /// No-op if `center` has no right child.
    fn rotate_left(&mut self, center: NodeIndex) {
        let Some(sibling_idx) = self.node(center).right else {
            return;
        };
        log::trace!("rotate left at {center:?}");

        let c_idx = self.node(sibling_idx).left;
        self.node_mut(center).right = c_idx;
        if let Some(c_idx) = c_idx {
            self.node_mut(c_idx).parent = Some(center);
        }

        let grandparent_idx = self.node(center).parent;
        self.node_mut(sibling_idx).parent = grandparent_idx;
        self.replace_child(grandparent_idx, center, Some(sibling_idx));

        self.node_mut(sibling_idx).left = Some(center);
        self.node_mut(center).parent = Some(sibling_idx);
    }

    /// No-op if `center` has no left child.
    fn rotate_right(&mut self, center: NodeIndex) {
        let Some(sibling_idx) = self.node(center).left else {
            return;
        };
        log::trace!("rotate right at {center:?}");

        let c_idx = self.node(sibling_idx).right;
        self.node_mut(center).left = c_idx;
        if let Some(c_idx) = c_idx {
            self.node_mut(c_idx).parent = Some(center);
        }

        let grandparent_idx = self.node(center).parent;
        self.node_mut(sibling_idx).parent = grandparent_idx;
        self.replace_child(grandparent_idx, center, Some(sibling_idx));

        self.node_mut(sibling_idx).right = Some(center);
        self.node_mut(center).parent = Some(sibling_idx);
    }

    /// Points the slot that held `old` (a child of `parent`, or the root when
    /// `parent` is `None`) at `new`. The parent link of `new` is left alone.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeIndex>,
        old: NodeIndex,
        new: Option<NodeIndex>,
    ) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(parent, old);
                *self.node_mut(parent).child_mut(side) = new;
            }
        }
    }

    /// Side of `parent` on which `child` hangs. `child` may be `None` only if
    /// exactly one slot of `parent` is empty.
    pub(crate) fn side_of_link(&self, parent: NodeIndex, child: Option<NodeIndex>) -> Side {
        if self.node(parent).left == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub(crate) fn side_of(&self, parent: NodeIndex, child: NodeIndex) -> Side {
        self.side_of_link(parent, Some(child))
    }

    pub(crate) fn color_of(&self, node: Option<NodeIndex>) -> NodeColor {
        node.map_or(NodeColor::Black, |idx| self.node(idx).color)
    }

    pub(crate) fn is_red(&self, node: Option<NodeIndex>) -> bool {
        self.color_of(node) == NodeColor::Red
    }

    pub(crate) fn set_color(&mut self, node: NodeIndex, color: NodeColor) {
        self.node_mut(node).color = color;
    }

    pub(crate) fn set_color_opt(&mut self, node: Option<NodeIndex>, color: NodeColor) {
        if let Some(node) = node {
            self.set_color(node, color);
        }
    }

    pub(crate) fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &RbNode<K> {
        match &self.storage[idx.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot {} is linked into the tree", idx.0),
        }
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIndex) -> &mut RbNode<K> {
        match &mut self.storage[idx.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot {} is linked into the tree", idx.0),
        }
    }

    fn allocate(&mut self, node: RbNode<K>) -> NodeIndex {
        let Some(free) = self.free_head else {
            self.storage.push(Slot::Occupied(node));
            return NodeIndex(self.storage.len() - 1);
        };

        self.free_head = match self.storage[free.0] {
            Slot::Vacant { next_free } => next_free,
            Slot::Occupied(_) => unreachable!("free list points at occupied slot {}", free.0),
        };
        self.storage[free.0] = Slot::Occupied(node);

        free
    }

    /// Returns the slot of an unlinked node to the free list.
    pub(crate) fn release(&mut self, idx: NodeIndex) -> K {
        let slot = mem::replace(
            &mut self.storage[idx.0],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(idx);

        match slot {
            Slot::Occupied(node) => node.key,
            Slot::Vacant { .. } => unreachable!("slot {} released twice", idx.0),
        }
    }
}

impl<K: Ord> Default for RedBlackTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for RedBlackTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for RedBlackTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
