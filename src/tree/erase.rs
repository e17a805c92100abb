//! Removal: by position, by key and by range.

use log::debug;

use super::algo;
use super::iter::Position;
use super::tree::RbTree;
use crate::constants::HEADER;
use crate::error::TreeError;
use crate::key::{Compare, KeyOfValue};

impl<V, P, C> RbTree<V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    /// Unlink the value node `z`, free it and return its value.
    fn remove_node(&mut self, z: u32) -> V {
        let removed = algo::erase_rebalance(&mut self.nodes, z);
        self.len -= 1;
        let node = self.nodes.free(removed);
        self.debug_validate();
        match node.value {
            Some(value) => value,
            None => unreachable!("header was unlinked"),
        }
    }

    /// Remove the value at `pos` and return the position after it.
    ///
    /// Only `pos` is invalidated; every other position stays valid.
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` if `pos` is `end()`, already erased
    /// or from another tree; the tree is unchanged
    ///
    /// # Performance
    /// O(log n)
    pub fn erase(&mut self, pos: Position) -> Result<Position, TreeError> {
        self.check_live(pos)?;
        let next = algo::successor(&self.nodes, pos.index);
        self.remove_node(pos.index);
        Ok(self.position_of(next))
    }

    /// Remove the value at `pos` and hand it back.
    ///
    /// # Errors
    /// `TreeError::InvalidPosition`, as for `erase`
    pub fn remove_at(&mut self, pos: Position) -> Result<V, TreeError> {
        self.check_live(pos)?;
        Ok(self.remove_node(pos.index))
    }

    /// Remove every value with key equivalent to `key`.
    ///
    /// # Returns
    /// Number of values removed
    ///
    /// # Performance
    /// O(log n + k) for k matches
    pub fn erase_multi(&mut self, key: &P::Key) -> usize {
        let mut x = self.lower_bound_node(key);
        let last = self.upper_bound_node(key);
        let mut removed = 0;
        while x != last {
            let next = algo::successor(&self.nodes, x);
            self.remove_node(x);
            x = next;
            removed += 1;
        }
        removed
    }

    /// Remove the value with key equivalent to `key`, if any.
    ///
    /// # Returns
    /// 1 if a value was removed, 0 otherwise
    pub fn erase_unique(&mut self, key: &P::Key) -> usize {
        let x = self.find_node(key);
        if x == HEADER {
            return 0;
        }
        self.remove_node(x);
        1
    }

    /// Remove every value in `[first, last)`.
    ///
    /// `first` must not come after `last`; debug builds panic if the key
    /// at `last` orders before the key at `first`. Removing the whole
    /// tree is done with `clear`.
    ///
    /// # Returns
    /// `last`
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` if either position is stale or from
    /// another tree; the tree is unchanged
    ///
    /// # Performance
    /// O(k log n) for k removed values
    pub fn erase_range(&mut self, first: Position, last: Position) -> Result<Position, TreeError> {
        self.check_position(first)?;
        self.check_position(last)?;
        debug_assert!(
            first.is_end()
                || last.is_end()
                || !self.compare.less(self.key_at(last.index), self.key_at(first.index)),
            "erase_range: first comes after last"
        );

        if first == self.begin() && last.is_end() {
            self.clear();
            return Ok(self.end());
        }

        let mut x = first.index;
        let mut removed = 0usize;
        while x != last.index && x != HEADER {
            let next = algo::successor(&self.nodes, x);
            self.remove_node(x);
            x = next;
            removed += 1;
        }
        debug!("erased range of {removed} values");
        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use crate::{RbTree, TreeError};
    use alloc::vec::Vec;

    fn tree_of(values: &[u32]) -> RbTree<u32> {
        let mut tree = RbTree::new();
        for &v in values {
            tree.insert_multi(v).unwrap();
        }
        tree
    }

    fn values(tree: &RbTree<u32>) -> Vec<u32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn test_erase_root_from_sample() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let pos = tree.find(&5);
        let next = tree.erase(pos).unwrap();
        assert_eq!(tree.value_at(next), Some(&7));
        assert_eq!(values(&tree), [1, 3, 4, 7, 8, 9]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_erase_keeps_other_positions_valid() {
        let mut tree = tree_of(&(0..32).collect::<Vec<_>>());
        let keep: Vec<_> = [3, 15, 16, 31].iter().map(|k| tree.find(k)).collect();
        for k in [0, 8, 16, 4, 20, 12, 28] {
            if k != 16 {
                tree.erase_unique(&k);
            }
        }
        for (pos, k) in keep.iter().zip([3, 15, 16, 31]) {
            assert_eq!(tree.value_at(*pos), Some(&k));
        }
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_erase_end_is_rejected() {
        let mut tree = tree_of(&[1, 2]);
        let end = tree.end();
        assert_eq!(tree.erase(end), Err(TreeError::InvalidPosition));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_erase_twice_is_rejected() {
        let mut tree = tree_of(&[1, 2, 3]);
        let pos = tree.find(&2);
        tree.erase(pos).unwrap();
        assert_eq!(tree.erase(pos), Err(TreeError::InvalidPosition));
        assert_eq!(values(&tree), [1, 3]);
    }

    #[test]
    fn test_remove_at_returns_value() {
        let mut tree = tree_of(&[10, 20]);
        let pos = tree.find(&20);
        assert_eq!(tree.remove_at(pos), Ok(20));
        assert_eq!(values(&tree), [10]);
    }

    #[test]
    fn test_erase_multi_counts() {
        let mut tree = tree_of(&[1, 2, 2, 2, 3]);
        assert_eq!(tree.erase_multi(&2), 3);
        assert_eq!(tree.erase_multi(&2), 0);
        assert_eq!(values(&tree), [1, 3]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_erase_unique_counts() {
        let mut tree = tree_of(&[1, 2, 2]);
        assert_eq!(tree.erase_unique(&2), 1);
        assert_eq!(tree.erase_unique(&5), 0);
        assert_eq!(values(&tree), [1, 2]);
    }

    #[test]
    fn test_erase_range_middle() {
        let mut tree = tree_of(&(0..10).collect::<Vec<_>>());
        let first = tree.find(&3);
        let last = tree.find(&7);
        let after = tree.erase_range(first, last).unwrap();
        assert_eq!(after, last);
        assert_eq!(values(&tree), [0, 1, 2, 7, 8, 9]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_erase_range_to_end() {
        let mut tree = tree_of(&(0..10).collect::<Vec<_>>());
        let first = tree.find(&6);
        let end = tree.end();
        tree.erase_range(first, end).unwrap();
        assert_eq!(values(&tree), [0, 1, 2, 3, 4, 5]);
        assert_eq!(tree.last(), Some(&5));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "first comes after last")]
    fn test_erase_range_reversed_panics_in_debug() {
        let mut tree = tree_of(&(0..10).collect::<Vec<_>>());
        let first = tree.find(&7);
        let last = tree.find(&3);
        let _ = tree.erase_range(first, last);
    }

    #[test]
    fn test_erase_range_rejects_foreign_position() {
        let mut tree = tree_of(&[1, 2, 3]);
        let other = tree_of(&[1, 2, 3]);
        let end = tree.end();
        assert_eq!(
            tree.erase_range(other.begin(), end),
            Err(TreeError::InvalidPosition)
        );
        assert_eq!(values(&tree), [1, 2, 3]);
    }

    #[test]
    fn test_erase_range_everything() {
        let mut tree = tree_of(&[4, 5, 6]);
        let (begin, end) = (tree.begin(), tree.end());
        tree.erase_range(begin, end).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
    }

    #[test]
    fn test_erase_all_in_arbitrary_order() {
        let keys = [13, 2, 27, 8, 19, 1, 30, 5, 22, 11, 16, 25, 3, 9, 14];
        let mut tree = tree_of(&keys);
        for k in [8, 30, 1, 14, 22, 2, 27, 9, 13, 5, 25, 11, 3, 19, 16] {
            assert_eq!(tree.erase_unique(&k), 1);
            assert!(tree.validate().is_ok());
        }
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.begin(), tree.end());
        assert!(tree.first().is_none());
    }
}
