//! Invariant checks for validating tree state.

use super::algo;
use super::node::Color;
use super::tree::RbTree;
use crate::constants::{HEADER, NIL};
use crate::error::InvariantViolation;
use crate::key::{Compare, KeyOfValue};

impl<V, P, C> RbTree<V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    /// Check every red-black and bookkeeping invariant.
    ///
    /// Verifies:
    /// - the root is Black
    /// - no Red node has a Red child
    /// - all paths have the same black-height
    /// - parent links mirror child links
    /// - in-order keys are non-decreasing
    /// - the header caches the true leftmost and rightmost nodes
    /// - the stored count matches the reachable nodes
    ///
    /// # Returns
    /// Number of Black nodes on every root-to-leaf path (0 when empty)
    ///
    /// # Performance
    /// O(n)
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let nodes = &self.nodes;
        let root = algo::root(nodes);

        if root == NIL {
            if nodes.left(HEADER) != HEADER || nodes.right(HEADER) != HEADER {
                return Err(InvariantViolation::Extremity);
            }
            if self.len != 0 {
                return Err(InvariantViolation::Count {
                    stored: self.len,
                    reachable: 0,
                });
            }
            self.check_allocated(0)?;
            return Ok(0);
        }

        if nodes.color(root) == Color::Red {
            return Err(InvariantViolation::RedRoot);
        }
        if nodes.parent(root) != HEADER {
            return Err(InvariantViolation::ParentLink { node: root });
        }
        if nodes.left(HEADER) != algo::minimum(nodes, root)
            || nodes.right(HEADER) != algo::maximum(nodes, root)
        {
            return Err(InvariantViolation::Extremity);
        }

        let mut reachable = 0;
        let black_height = self.check_subtree(root, &mut reachable)?;
        if reachable != self.len {
            return Err(InvariantViolation::Count {
                stored: self.len,
                reachable,
            });
        }
        self.check_allocated(reachable)?;

        self.check_order()?;
        Ok(black_height)
    }

    /// Colors, parent links and black-height below `x`.
    ///
    /// Returns the number of Black nodes on each path from `x` down,
    /// counting `x` itself.
    fn check_subtree(&self, x: u32, reachable: &mut usize) -> Result<usize, InvariantViolation> {
        if x == NIL {
            return Ok(0);
        }
        *reachable += 1;

        let nodes = &self.nodes;
        let (left, right) = (nodes.left(x), nodes.right(x));
        for child in [left, right] {
            if child != NIL && nodes.parent(child) != x {
                return Err(InvariantViolation::ParentLink { node: child });
            }
        }
        if nodes.is_red(x) && (nodes.is_red(left) || nodes.is_red(right)) {
            return Err(InvariantViolation::RedRed { node: x });
        }

        let lh = self.check_subtree(left, reachable)?;
        let rh = self.check_subtree(right, reachable)?;
        if lh != rh {
            return Err(InvariantViolation::BlackHeight {
                node: x,
                left: lh,
                right: rh,
            });
        }
        Ok(lh + usize::from(nodes.color(x) == Color::Black))
    }

    /// The arena holds the header plus exactly the reachable nodes.
    fn check_allocated(&self, reachable: usize) -> Result<(), InvariantViolation> {
        let allocated = self.nodes.len().saturating_sub(1);
        if allocated != reachable {
            return Err(InvariantViolation::Leak {
                allocated,
                reachable,
            });
        }
        Ok(())
    }

    /// In-order keys never decrease.
    fn check_order(&self) -> Result<(), InvariantViolation> {
        let nodes = &self.nodes;
        let mut prev = nodes.left(HEADER);
        let mut x = algo::successor(nodes, prev);
        while x != HEADER {
            if self.compare.less(self.key_at(x), self.key_at(prev)) {
                return Err(InvariantViolation::Order { node: x });
            }
            prev = x;
            x = algo::successor(nodes, x);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::constants::{HEADER, NIL};
    use crate::tree::node::{Color, Node};
    use crate::{InvariantViolation, RbTree};

    fn tree_of(values: &[u32]) -> RbTree<u32> {
        let mut tree = RbTree::new();
        for &v in values {
            tree.insert_multi(v).unwrap();
        }
        tree
    }

    #[test]
    fn test_empty_tree_is_valid() {
        assert_eq!(RbTree::<u32>::new().validate(), Ok(0));
    }

    #[test]
    fn test_black_height_grows_logarithmically() {
        let tree = tree_of(&(0..1023).collect::<alloc::vec::Vec<_>>());
        let bh = tree.validate().unwrap();
        assert!((5..=10).contains(&bh), "black-height {bh}");
    }

    #[test]
    fn test_detects_red_root() {
        let mut tree = tree_of(&[1, 2, 3]);
        let root = tree.nodes.parent(HEADER);
        tree.nodes.set_color(root, Color::Red);
        assert_eq!(tree.validate(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn test_detects_red_red() {
        let mut tree = tree_of(&[2, 1, 3, 4]);
        // 4 is a Red child of Black 3; making 3 Red breaks R3 first
        let three = tree.find(&3).index;
        tree.nodes.set_color(three, Color::Red);
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::RedRed { node: three })
        );
    }

    #[test]
    fn test_detects_black_height_mismatch() {
        let mut tree = tree_of(&[2, 1, 3]);
        let one = tree.find(&1).index;
        tree.nodes.set_color(one, Color::Black);
        assert!(matches!(
            tree.validate(),
            Err(InvariantViolation::BlackHeight { .. })
        ));
    }

    #[test]
    fn test_detects_stale_extremity() {
        let mut tree = tree_of(&[2, 1, 3]);
        let two = tree.find(&2).index;
        tree.nodes.set_left(HEADER, two);
        assert_eq!(tree.validate(), Err(InvariantViolation::Extremity));
    }

    #[test]
    fn test_detects_leaked_node_in_empty_tree() {
        let mut tree = RbTree::<u32>::new();
        tree.nodes.alloc(Node::leaf(7, NIL)).unwrap();
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::Leak {
                allocated: 1,
                reachable: 0
            })
        );
    }

    #[test]
    fn test_detects_leaked_node_beside_tree() {
        let mut tree = tree_of(&[2, 1, 3]);
        tree.nodes.alloc(Node::leaf(9, NIL)).unwrap();
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::Leak {
                allocated: 4,
                reachable: 3
            })
        );
    }

    #[test]
    fn test_detects_count_mismatch() {
        let mut tree = tree_of(&[2, 1, 3]);
        tree.len = 5;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::Count {
                stored: 5,
                reachable: 3
            })
        );
    }
}
