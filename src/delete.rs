use crate::{NodeColor, NodeIndex, RedBlackTree, TreeError};

impl<K: Ord> RedBlackTree<K> {
    /// Removes one node holding `key` and returns its key.
    ///
    /// With duplicates present, the first match met by the search is
    /// removed. A missing key leaves the tree untouched and is handed back
    /// inside the error.
    pub fn delete(&mut self, key: K) -> Result<K, TreeError<K>> {
        let Some(target) = self.find(&key) else {
            log::debug!("delete: key not found, {} nodes unchanged", self.len());
            return Err(TreeError::KeyNotFound(key));
        };

        Ok(self.delete_node(target))
    }

    fn delete_node(&mut self, z: NodeIndex) -> K {
        let z_left = self.node(z).left;
        let z_right = self.node(z).right;

        // `occupant` takes over the vacated slot and may be `None`, so its
        // parent is tracked on the side.
        let (removed_color, occupant, occupant_parent) = match (z_left, z_right) {
            (None, _) => {
                let parent = self.node(z).parent;
                self.transplant(z, z_right);
                (self.node(z).color, z_right, parent)
            }
            (Some(_), None) => {
                let parent = self.node(z).parent;
                self.transplant(z, z_left);
                (self.node(z).color, z_left, parent)
            }
            (Some(z_left), Some(z_right)) => {
                let y = self.minimum(z_right);
                let y_color = self.node(y).color;
                let x = self.node(y).right;

                let x_parent = if self.node(y).parent == Some(z) {
                    Some(y)
                } else {
                    let y_parent = self.node(y).parent;
                    self.transplant(y, x);
                    self.node_mut(y).right = Some(z_right);
                    self.node_mut(z_right).parent = Some(y);
                    y_parent
                };

                self.transplant(z, Some(y));
                self.node_mut(y).left = Some(z_left);
                self.node_mut(z_left).parent = Some(y);
                self.node_mut(y).color = self.node(z).color;

                (y_color, x, x_parent)
            }
        };

        if removed_color == NodeColor::Black {
            self.fix_black_deficit(occupant, occupant_parent);
        }

        self.len -= 1;
        self.release(z)
    }

    /// Puts the subtree rooted at `v` where the subtree rooted at `u` hangs.
    /// Children of `u` and `v` are not touched.
    fn transplant(&mut self, u: NodeIndex, v: Option<NodeIndex>) {
        let u_parent = self.node(u).parent;
        self.replace_child(u_parent, u, v);

        if let Some(v) = v {
            self.node_mut(v).parent = u_parent;
        }
    }

    fn minimum(&self, mut node: NodeIndex) -> NodeIndex {
        while let Some(left) = self.node(node).left {
            node = left;
        }

        node
    }

    /// Restores equal black-heights after a black node was spliced out above
    /// `current`, which carries one extra unit of black.
    fn fix_black_deficit(
        &mut self,
        mut current: Option<NodeIndex>,
        mut parent: Option<NodeIndex>,
    ) {
        while current != self.root() && !self.is_red(current) {
            let Some(parent_idx) = parent else {
                break;
            };

            let side = self.side_of_link(parent_idx, current);
            let far = side.opposite();
            // The deficient side has black-height at least one less than its
            // sibling's, so the sibling exists.
            let Some(mut sibling) = self.node(parent_idx).child(far) else {
                break;
            };

            if self.is_red(Some(sibling)) {
                log::trace!("delete fixup: red sibling {sibling:?}");
                self.set_color(sibling, NodeColor::Black);
                self.set_color(parent_idx, NodeColor::Red);
                self.rotate(parent_idx, side);

                sibling = match self.node(parent_idx).child(far) {
                    Some(sibling) => sibling,
                    None => break,
                };
            }

            let near_child = self.node(sibling).child(side);
            let far_child = self.node(sibling).child(far);

            if !self.is_red(near_child) && !self.is_red(far_child) {
                log::trace!("delete fixup: black sibling {sibling:?} with black children");
                self.set_color(sibling, NodeColor::Red);

                current = Some(parent_idx);
                parent = self.node(parent_idx).parent;
                continue;
            }

            if !self.is_red(far_child) {
                log::trace!("delete fixup: red near nephew under {sibling:?}");
                self.set_color_opt(near_child, NodeColor::Black);
                self.set_color(sibling, NodeColor::Red);
                self.rotate(sibling, far);

                sibling = match self.node(parent_idx).child(far) {
                    Some(sibling) => sibling,
                    None => break,
                };
            }

            log::trace!("delete fixup: red far nephew under {sibling:?}");
            let parent_color = self.node(parent_idx).color;
            self.set_color(sibling, parent_color);
            self.set_color(parent_idx, NodeColor::Black);
            self.set_color_opt(self.node(sibling).child(far), NodeColor::Black);
            self.rotate(parent_idx, side);

            current = self.root();
            parent = None;
        }

        self.set_color_opt(current, NodeColor::Black);
    }
}
