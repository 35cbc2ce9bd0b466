use crate::{InvariantViolation, NodeColor, NodeIndex, RedBlackTree};

impl<K: Ord> RedBlackTree<K> {
    /// Checks every red-black and search-tree invariant.
    ///
    /// On success returns the number of black nodes on each path from the
    /// root down to an absent child (`0` for an empty tree).
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root() else {
            return match self.len() {
                0 => Ok(0),
                recorded => Err(InvariantViolation::LengthMismatch {
                    recorded,
                    reachable: 0,
                }),
            };
        };

        if self.node(root).parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink { slot: root.0 });
        }
        if self.node(root).color == NodeColor::Red {
            return Err(InvariantViolation::RedRoot { slot: root.0 });
        }

        let (black_height, reachable) = self.check_subtree(root)?;
        if reachable != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.len(),
                reachable,
            });
        }

        let mut predecessor: Option<&K> = None;
        for idx in self.in_order() {
            let key = &self.node(idx).key;
            if predecessor.is_some_and(|prev| key < prev) {
                return Err(InvariantViolation::OutOfOrder { slot: idx.0 });
            }
            predecessor = Some(key);
        }

        Ok(black_height)
    }

    /// Returns the black-height (counting `idx`) and node count of a subtree.
    fn check_subtree(&self, idx: NodeIndex) -> Result<(usize, usize), InvariantViolation> {
        let node = self.node(idx);
        let mut heights = [0; 2];
        let mut count = 1;

        for (slot, child) in [node.left, node.right].into_iter().enumerate() {
            let Some(child) = child else {
                continue;
            };

            if self.node(child).parent != Some(idx) {
                return Err(InvariantViolation::BrokenParentLink { slot: child.0 });
            }
            if node.color == NodeColor::Red && self.node(child).color == NodeColor::Red {
                return Err(InvariantViolation::RedChildOfRed { slot: idx.0 });
            }

            let (height, size) = self.check_subtree(child)?;
            heights[slot] = height;
            count += size;
        }

        if heights[0] != heights[1] {
            return Err(InvariantViolation::BlackHeightMismatch {
                slot: idx.0,
                left: heights[0],
                right: heights[1],
            });
        }

        Ok((heights[0] + usize::from(node.color == NodeColor::Black), count))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{InvariantViolation, NodeColor, RedBlackTree};

    #[test]
    pub fn root_rotation_breaks_root_color() {
        let mut tree: RedBlackTree<i32> = [10, 20].into_iter().collect();
        tree.validate().unwrap();

        tree.rotate_left_at_root();

        let root = tree.root().unwrap();
        assert_eq!(tree.validate(), Err(InvariantViolation::RedRoot { slot: root.0 }));
    }

    #[test]
    pub fn detects_red_child_of_red() {
        let mut tree: RedBlackTree<i32> = [10, 5, 15, 1].into_iter().collect();
        let five = tree.find(&5).unwrap();
        tree.set_color(five, NodeColor::Red);

        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::RedChildOfRed { slot: five.0 })
        );
    }

    #[test]
    pub fn detects_black_height_mismatch() {
        let mut tree: RedBlackTree<i32> = [10, 5, 15].into_iter().collect();
        let five = tree.find(&5).unwrap();
        tree.set_color(five, NodeColor::Black);

        let root = tree.root().unwrap();
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BlackHeightMismatch {
                slot: root.0,
                left: 1,
                right: 0,
            })
        );
    }

    #[test]
    pub fn detects_broken_parent_link() {
        let mut tree: RedBlackTree<i32> = [10, 5, 15].into_iter().collect();
        let five = tree.find(&5).unwrap();
        let fifteen = tree.find(&15).unwrap();
        tree.node_mut(five).parent = Some(fifteen);

        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BrokenParentLink { slot: five.0 })
        );
    }

    #[test]
    pub fn detects_out_of_order_keys() {
        let mut tree: RedBlackTree<i32> = [10, 5, 15].into_iter().collect();
        let five = tree.find(&5).unwrap();
        tree.node_mut(five).key = 12;

        let root = tree.root().unwrap();
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::OutOfOrder { slot: root.0 })
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(i16),
        Delete(i16),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (-64i16..64).prop_map(Op::Insert),
            2 => (-64i16..64).prop_map(Op::Delete),
        ]
    }

    proptest! {
        /// Every operation leaves a valid tree whose in-order sequence is the
        /// sorted multiset of keys inserted and not yet deleted.
        #[test]
        fn prop_mixed_operations(ops in prop::collection::vec(op(), 0..200)) {
            let mut tree = RedBlackTree::new();
            let mut control: Vec<i16> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        tree.insert(key);
                        control.push(key);
                    }
                    Op::Delete(key) => {
                        let result = tree.delete(key);
                        match control.iter().position(|&k| k == key) {
                            Some(pos) => {
                                control.swap_remove(pos);
                                prop_assert_eq!(result, Ok(key));
                            }
                            None => prop_assert!(result.is_err()),
                        }
                    }
                }

                prop_assert!(tree.validate().is_ok());
            }

            control.sort_unstable();
            let in_order: Vec<i16> = tree.keys_in_order().into_iter().copied().collect();
            prop_assert_eq!(in_order, control);
        }

        #[test]
        fn prop_insertions_sort_input(keys in prop::collection::vec(any::<i32>(), 0..300)) {
            let tree: RedBlackTree<i32> = keys.iter().copied().collect();

            let mut sorted = keys;
            sorted.sort_unstable();
            let in_order: Vec<i32> = tree.keys_in_order().into_iter().copied().collect();
            prop_assert_eq!(in_order, sorted);
            prop_assert!(tree.validate().is_ok());
        }
    }
}
