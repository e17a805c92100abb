//! Insertion: multi-key and unique-key, with and without hints.
//!
//! Every insertion goes through the same three steps:
//! 1. Find the parent and side for the new leaf (descent or hint)
//! 2. Check capacity and allocate the node
//! 3. Link the node and rebalance
//!
//! Steps 1 and 2 never touch the structure, so a failing insertion
//! leaves the tree exactly as it was.

use log::{debug, trace};

use super::algo;
use super::iter::Position;
use super::node::Node;
use super::tree::RbTree;
use crate::constants::{HEADER, NIL};
use crate::error::TreeError;
use crate::key::{Compare, KeyOfValue};

impl<V, P, C> RbTree<V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    /// Fail if `additional` more values would exceed `max_size()`.
    pub(crate) fn check_capacity(&self, additional: usize) -> Result<(), TreeError> {
        let max_len = self.config.get_max_len();
        if additional > max_len - self.len {
            debug!(
                "rejecting insertion of {additional} values: {} of {max_len} used",
                self.len
            );
            return Err(TreeError::CapacityOverflow {
                len: self.len,
                max_len,
            });
        }
        Ok(())
    }

    /// Allocate a node for `value` and link it below `parent`.
    fn insert_at(&mut self, parent: u32, as_left: bool, value: V) -> Result<u32, TreeError> {
        self.check_capacity(1)?;
        let z = self.nodes.alloc(Node::leaf(value, parent))?;
        algo::link_and_rebalance(&mut self.nodes, z, parent, as_left);
        self.len += 1;
        self.debug_validate();
        Ok(z)
    }

    /// Descend from the root to the null slot where `key` belongs.
    ///
    /// Equal keys go right, so equal values keep insertion order.
    ///
    /// # Returns
    /// `(parent, as_left)`; `parent == HEADER` for an empty tree
    fn descend(&self, key: &P::Key) -> (u32, bool) {
        let mut parent = HEADER;
        let mut as_left = true;
        let mut x = algo::root(&self.nodes);
        while x != NIL {
            parent = x;
            as_left = self.compare.less(key, self.key_at(x));
            x = if as_left {
                self.nodes.left(x)
            } else {
                self.nodes.right(x)
            };
        }
        (parent, as_left)
    }

    /// Insertion point for a unique key.
    ///
    /// # Returns
    /// - `Ok((parent, as_left))` if no equivalent key is stored
    /// - `Err(existing)` with the node holding the equivalent key
    fn unique_slot(&self, key: &P::Key) -> Result<(u32, bool), u32> {
        let (parent, as_left) = self.descend(key);

        // The only candidate for an equal key is the in-order
        // predecessor of the insertion point.
        let candidate = if as_left {
            if parent == self.nodes.left(HEADER) {
                return Ok((parent, as_left));
            }
            algo::predecessor(&self.nodes, parent)
        } else {
            parent
        };

        if self.compare.less(self.key_at(candidate), key) {
            Ok((parent, as_left))
        } else {
            Err(candidate)
        }
    }

    /// Node index a hint refers to, or `None` if the hint is stale or
    /// from another tree.
    fn resolve_hint(&self, hint: Position) -> Option<u32> {
        if self.check_position(hint).is_ok() {
            Some(hint.index)
        } else {
            trace!("ignoring invalid hint at slot {}", hint.index);
            None
        }
    }

    /// Insert a value, allowing duplicate keys.
    ///
    /// The new value is placed after every value with an equivalent key.
    ///
    /// # Arguments
    /// * `args` - anything convertible into the value type
    ///
    /// # Returns
    /// Position of the new value
    ///
    /// # Errors
    /// `CapacityOverflow` or `AllocFailed`; the tree is unchanged
    ///
    /// # Performance
    /// O(log n)
    pub fn emplace_multi<A: Into<V>>(&mut self, args: A) -> Result<Position, TreeError> {
        let value = args.into();
        let (parent, as_left) = self.descend(P::key(&value));
        let z = self.insert_at(parent, as_left, value)?;
        Ok(self.position_of(z))
    }

    /// Insert a value unless an equivalent key is already stored.
    ///
    /// # Returns
    /// - `(new, true)` after inserting
    /// - `(existing, false)` if the key was present; the new value is
    ///   dropped and the tree is unchanged
    ///
    /// # Errors
    /// `CapacityOverflow` or `AllocFailed`; the tree is unchanged
    ///
    /// # Performance
    /// O(log n)
    pub fn emplace_unique<A: Into<V>>(&mut self, args: A) -> Result<(Position, bool), TreeError> {
        let value = args.into();
        match self.unique_slot(P::key(&value)) {
            Ok((parent, as_left)) => {
                let z = self.insert_at(parent, as_left, value)?;
                Ok((self.position_of(z), true))
            }
            Err(existing) => {
                trace!("unique insert found existing key at slot {existing}");
                Ok((self.position_of(existing), false))
            }
        }
    }

    /// Slot next to `hint` where `key` may go in a multi-key tree.
    ///
    /// Accepts the hint if `key` fits between the hint's predecessor and
    /// the hint itself (inclusive at both ends).
    fn multi_hint_slot(&self, hint: u32, key: &P::Key) -> Option<(u32, bool)> {
        let nodes = &self.nodes;
        let leftmost = nodes.left(HEADER);
        let rightmost = nodes.right(HEADER);

        if self.len == 0 {
            return Some((HEADER, true));
        }
        if hint == leftmost {
            // leftmost never has a left child
            return (!self.compare.less(self.key_at(hint), key)).then_some((hint, true));
        }
        if hint == HEADER {
            return (!self.compare.less(key, self.key_at(rightmost))).then_some((rightmost, false));
        }

        let before = algo::predecessor(nodes, hint);
        if self.compare.less(key, self.key_at(before)) || self.compare.less(self.key_at(hint), key)
        {
            return None;
        }
        if nodes.right(before) == NIL {
            Some((before, false))
        } else if nodes.left(hint) == NIL {
            Some((hint, true))
        } else {
            None
        }
    }

    /// Slot next to `hint` where `key` may go in a unique-key tree.
    ///
    /// Accepts the hint only if `key` is strictly between the hint's
    /// predecessor and the hint itself.
    fn unique_hint_slot(&self, hint: u32, key: &P::Key) -> Option<(u32, bool)> {
        let nodes = &self.nodes;
        let leftmost = nodes.left(HEADER);
        let rightmost = nodes.right(HEADER);

        if self.len == 0 {
            return Some((HEADER, true));
        }
        if hint == leftmost {
            return self.compare.less(key, self.key_at(hint)).then_some((hint, true));
        }
        if hint == HEADER {
            return self.compare.less(self.key_at(rightmost), key).then_some((rightmost, false));
        }

        let before = algo::predecessor(nodes, hint);
        if !self.compare.less(self.key_at(before), key) || !self.compare.less(key, self.key_at(hint))
        {
            return None;
        }
        if nodes.right(before) == NIL {
            Some((before, false))
        } else if nodes.left(hint) == NIL {
            Some((hint, true))
        } else {
            None
        }
    }

    /// Insert with a position hint, allowing duplicate keys.
    ///
    /// If the value belongs immediately before `hint`, it is linked there
    /// without a descent. Any other hint, including a stale one, falls
    /// back to `emplace_multi`; the hint never affects correctness.
    ///
    /// # Performance
    /// O(1) amortized with a correct hint, O(log n) otherwise
    pub fn emplace_multi_use_hint<A: Into<V>>(
        &mut self,
        hint: Position,
        args: A,
    ) -> Result<Position, TreeError> {
        let value = args.into();
        let slot = self
            .resolve_hint(hint)
            .and_then(|h| self.multi_hint_slot(h, P::key(&value)));
        match slot {
            Some((parent, as_left)) => {
                let z = self.insert_at(parent, as_left, value)?;
                Ok(self.position_of(z))
            }
            None => {
                trace!("multi hint rejected, falling back to descent");
                self.emplace_multi(value)
            }
        }
    }

    /// Insert with a position hint unless an equivalent key is stored.
    ///
    /// If the key belongs strictly between `hint`'s predecessor and
    /// `hint`, the value is linked there without a descent; otherwise
    /// this behaves exactly like `emplace_unique`.
    ///
    /// # Performance
    /// O(1) amortized with a correct hint, O(log n) otherwise
    pub fn emplace_unique_use_hint<A: Into<V>>(
        &mut self,
        hint: Position,
        args: A,
    ) -> Result<(Position, bool), TreeError> {
        let value = args.into();
        let slot = self
            .resolve_hint(hint)
            .and_then(|h| self.unique_hint_slot(h, P::key(&value)));
        match slot {
            Some((parent, as_left)) => {
                let z = self.insert_at(parent, as_left, value)?;
                Ok((self.position_of(z), true))
            }
            None => {
                trace!("unique hint rejected, falling back to descent");
                self.emplace_unique(value)
            }
        }
    }

    /// Insert a value, allowing duplicate keys. See `emplace_multi`.
    #[inline]
    pub fn insert_multi(&mut self, value: V) -> Result<Position, TreeError> {
        self.emplace_multi(value)
    }

    /// Insert a value unless its key is present. See `emplace_unique`.
    #[inline]
    pub fn insert_unique(&mut self, value: V) -> Result<(Position, bool), TreeError> {
        self.emplace_unique(value)
    }

    /// Hinted `insert_multi`. See `emplace_multi_use_hint`.
    #[inline]
    pub fn insert_multi_hint(&mut self, hint: Position, value: V) -> Result<Position, TreeError> {
        self.emplace_multi_use_hint(hint, value)
    }

    /// Hinted `insert_unique`. See `emplace_unique_use_hint`.
    #[inline]
    pub fn insert_unique_hint(
        &mut self,
        hint: Position,
        value: V,
    ) -> Result<(Position, bool), TreeError> {
        self.emplace_unique_use_hint(hint, value)
    }

    /// Insert every value of `iter`, allowing duplicate keys.
    ///
    /// Capacity for the iterator's lower size bound is checked and
    /// reserved before the first insertion. Each insertion is atomic; if
    /// one fails, the values inserted before it stay in the tree.
    ///
    /// # Example
    /// ```rust
    /// use ordered_rbtree::RbTree;
    ///
    /// let mut tree = RbTree::<u8>::new();
    /// tree.extend_multi([3, 1, 3, 2]).unwrap();
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 3]);
    /// ```
    pub fn extend_multi<I>(&mut self, iter: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = V>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.check_capacity(lower)?;
        self.nodes.try_reserve(lower)?;
        debug!("bulk multi insert of at least {lower} values");
        for value in iter {
            self.emplace_multi(value)?;
        }
        Ok(())
    }

    /// Insert every value of `iter` whose key is not yet present.
    ///
    /// # Returns
    /// Number of values actually inserted
    pub fn extend_unique<I>(&mut self, iter: I) -> Result<usize, TreeError>
    where
        I: IntoIterator<Item = V>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.nodes.try_reserve(lower)?;
        debug!("bulk unique insert of at least {lower} values");
        let mut inserted = 0;
        for value in iter {
            if self.emplace_unique(value)?.1 {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use crate::{First, MapTree, RbTree, TreeConfig, TreeError};
    use crate::key::Natural;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn values(tree: &RbTree<u32>) -> Vec<u32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn test_insert_unique_round_trip() {
        let mut tree = RbTree::<u32>::new();
        for v in [5, 3, 8, 1, 4, 7, 9] {
            let (_, inserted) = tree.insert_unique(v).unwrap();
            assert!(inserted);
        }
        assert_eq!(values(&tree), [1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.len(), 7);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_insert_unique_duplicate_returns_existing() {
        let mut tree = RbTree::<u32>::new();
        let (first, _) = tree.insert_unique(5).unwrap();
        tree.insert_unique(3).unwrap();
        let (again, inserted) = tree.insert_unique(5).unwrap();
        assert!(!inserted);
        assert_eq!(again, first);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_insert_multi_keeps_duplicates_in_order() {
        let mut tree: MapTree<u32, char> = RbTree::new();
        for (i, c) in "abcde".chars().enumerate() {
            tree.insert_multi(((i % 2) as u32, c)).unwrap();
        }
        let order: String = tree.iter().map(|(_, c)| *c).collect();
        // Equal keys keep insertion order
        assert_eq!(order, "acebd");
        assert_eq!(tree.len(), 5);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_emplace_converts_arguments() {
        let mut tree: RbTree<String> = RbTree::new();
        tree.emplace_unique("pear").unwrap();
        tree.emplace_unique("apple").unwrap();
        let (_, inserted) = tree.emplace_unique("pear").unwrap();
        assert!(!inserted);
        assert_eq!(tree.first().map(String::as_str), Some("apple"));
    }

    #[test]
    fn test_unique_map_keeps_first_value() {
        let mut map: RbTree<(u8, &str), First, Natural> = RbTree::new();
        map.insert_unique((1, "first")).unwrap();
        let (pos, inserted) = map.insert_unique((1, "second")).unwrap();
        assert!(!inserted);
        assert_eq!(map.value_at(pos), Some(&(1, "first")));
    }

    #[test]
    fn test_hint_at_end_for_ascending_input() {
        let mut tree = RbTree::<u32>::new();
        for v in 0..100 {
            let end = tree.end();
            tree.insert_unique_hint(end, v).unwrap();
        }
        assert_eq!(values(&tree), (0..100).collect::<Vec<_>>());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_hint_at_begin_for_descending_input() {
        let mut tree = RbTree::<u32>::new();
        for v in (0..100).rev() {
            let begin = tree.begin();
            tree.insert_multi_hint(begin, v).unwrap();
        }
        assert_eq!(values(&tree), (0..100).collect::<Vec<_>>());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_hint_in_middle() {
        let mut tree = RbTree::<u32>::new();
        for v in [10, 20, 30, 40] {
            tree.insert_unique(v).unwrap();
        }
        let hint = tree.find(&30);
        let (pos, inserted) = tree.insert_unique_hint(hint, 25).unwrap();
        assert!(inserted);
        assert_eq!(tree.value_at(pos), Some(&25));
        assert_eq!(values(&tree), [10, 20, 25, 30, 40]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_wrong_hint_falls_back() {
        let mut tree = RbTree::<u32>::new();
        for v in [10, 20, 30, 40] {
            tree.insert_unique(v).unwrap();
        }
        let hint = tree.find(&40);
        tree.insert_unique_hint(hint, 5).unwrap();
        tree.insert_multi_hint(tree.begin(), 35).unwrap();
        tree.insert_multi_hint(tree.end(), 15).unwrap();
        assert_eq!(values(&tree), [5, 10, 15, 20, 30, 35, 40]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_hint_unique_duplicate() {
        let mut tree = RbTree::<u32>::new();
        for v in [10, 20, 30] {
            tree.insert_unique(v).unwrap();
        }
        let hint = tree.find(&30);
        let (pos, inserted) = tree.insert_unique_hint(hint, 20).unwrap();
        assert!(!inserted);
        assert_eq!(pos, tree.find(&20));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_stale_hint_falls_back() {
        let mut tree = RbTree::<u32>::new();
        for v in [1, 2, 3] {
            tree.insert_unique(v).unwrap();
        }
        let stale = tree.find(&2);
        tree.erase(stale).unwrap();
        tree.insert_multi_hint(stale, 0).unwrap();
        assert_eq!(values(&tree), [0, 1, 3]);
    }

    #[test]
    fn test_hint_multi_equal_keys() {
        let mut tree = RbTree::<u32>::new();
        for v in [5, 5, 5] {
            tree.insert_multi(v).unwrap();
        }
        let hint = tree.upper_bound(&5);
        tree.insert_multi_hint(hint, 5).unwrap();
        assert_eq!(tree.count_multi(&5), 4);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_capacity_overflow_leaves_tree_unchanged() {
        let config = TreeConfig::new().max_len(3);
        let mut tree = RbTree::<u32>::with_config(config, Natural);
        for v in [1, 2, 3] {
            tree.insert_multi(v).unwrap();
        }
        let err = tree.insert_multi(4).unwrap_err();
        assert_eq!(err, TreeError::CapacityOverflow { len: 3, max_len: 3 });
        assert_eq!(values(&tree), [1, 2, 3]);

        // A duplicate in a full unique tree is not an insertion
        let (_, inserted) = tree.insert_unique(2).unwrap();
        assert!(!inserted);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_extend_multi_checks_capacity_up_front() {
        let config = TreeConfig::new().max_len(4);
        let mut tree = RbTree::<u32>::with_config(config, Natural);
        tree.insert_multi(1).unwrap();
        assert!(tree.extend_multi([2, 3, 4, 5]).is_err());
        assert_eq!(tree.len(), 1);
        tree.extend_multi([2, 2, 3]).unwrap();
        assert_eq!(values(&tree), [1, 2, 2, 3]);
    }

    #[test]
    fn test_extend_unique_counts_insertions() {
        let mut tree = RbTree::<u32>::new();
        let inserted = tree.extend_unique([4, 2, 4, 1, 2]).unwrap();
        assert_eq!(inserted, 3);
        assert_eq!(values(&tree), [1, 2, 4]);
    }
}
