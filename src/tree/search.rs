//! Lookup operations: find, bounds, counting and ranges.

use core::ops::{Bound, RangeBounds};

use super::algo;
use super::iter::{Position, Range};
use super::tree::RbTree;
use crate::constants::{HEADER, NIL};
use crate::key::{Compare, KeyOfValue};

impl<V, P, C> RbTree<V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    /// Index of the first node whose key is not less than `key`.
    pub(crate) fn lower_bound_node(&self, key: &P::Key) -> u32 {
        let mut result = HEADER;
        let mut x = algo::root(&self.nodes);
        while x != NIL {
            if !self.compare.less(self.key_at(x), key) {
                result = x;
                x = self.nodes.left(x);
            } else {
                x = self.nodes.right(x);
            }
        }
        result
    }

    /// Index of the first node whose key is greater than `key`.
    pub(crate) fn upper_bound_node(&self, key: &P::Key) -> u32 {
        let mut result = HEADER;
        let mut x = algo::root(&self.nodes);
        while x != NIL {
            if self.compare.less(key, self.key_at(x)) {
                result = x;
                x = self.nodes.left(x);
            } else {
                x = self.nodes.right(x);
            }
        }
        result
    }

    /// Position of the first value whose key is not less than `key`.
    ///
    /// # Performance
    /// O(log n)
    pub fn lower_bound(&self, key: &P::Key) -> Position {
        self.position_of(self.lower_bound_node(key))
    }

    /// Position of the first value whose key is greater than `key`.
    ///
    /// # Performance
    /// O(log n)
    pub fn upper_bound(&self, key: &P::Key) -> Position {
        self.position_of(self.upper_bound_node(key))
    }

    /// Position of a value with key equivalent to `key`, `end()` if none.
    ///
    /// With duplicate keys this is the first of them in order.
    ///
    /// # Example
    /// ```rust
    /// use ordered_rbtree::RbTree;
    ///
    /// let mut tree = RbTree::<u32>::new();
    /// tree.insert_unique(42).unwrap();
    /// assert_eq!(tree.value_at(tree.find(&42)), Some(&42));
    /// assert!(tree.find(&7).is_end());
    /// ```
    pub fn find(&self, key: &P::Key) -> Position {
        self.position_of(self.find_node(key))
    }

    pub(crate) fn find_node(&self, key: &P::Key) -> u32 {
        let x = self.lower_bound_node(key);
        if x == HEADER || self.compare.less(key, self.key_at(x)) {
            HEADER
        } else {
            x
        }
    }

    /// `true` if a value with key equivalent to `key` is stored.
    #[inline]
    pub fn contains(&self, key: &P::Key) -> bool {
        self.find_node(key) != HEADER
    }

    /// First value with key equivalent to `key`.
    #[inline]
    pub fn get(&self, key: &P::Key) -> Option<&V> {
        self.nodes.get(self.find_node(key)).value.as_ref()
    }

    /// Number of values with key equivalent to `key`.
    ///
    /// # Performance
    /// O(log n + k) for k matches
    pub fn count_multi(&self, key: &P::Key) -> usize {
        let (first, last) = self.equal_range_multi(key);
        self.range_between(first, last).count()
    }

    /// 1 if a value with key equivalent to `key` is stored, else 0.
    #[inline]
    pub fn count_unique(&self, key: &P::Key) -> usize {
        usize::from(self.contains(key))
    }

    /// `[lower_bound(key), upper_bound(key))`.
    pub fn equal_range_multi(&self, key: &P::Key) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Range holding the single match for `key`, or an empty range at
    /// the insertion point.
    ///
    /// # Performance
    /// O(log n) - one descent plus one successor step
    pub fn equal_range_unique(&self, key: &P::Key) -> (Position, Position) {
        let first = self.lower_bound_node(key);
        if first != HEADER && !self.compare.less(key, self.key_at(first)) {
            let next = algo::successor(&self.nodes, first);
            (self.position_of(first), self.position_of(next))
        } else {
            let pos = self.position_of(first);
            (pos, pos)
        }
    }

    /// Iterate over values whose keys fall inside `range`.
    ///
    /// An inverted range yields nothing.
    ///
    /// # Example
    /// ```rust
    /// use ordered_rbtree::RbTree;
    ///
    /// let mut tree = RbTree::<u64>::new();
    /// for v in [100, 150, 200, 300] {
    ///     tree.insert_unique(v).unwrap();
    /// }
    /// let hits: Vec<u64> = tree.range(100..=200).copied().collect();
    /// assert_eq!(hits, vec![100, 150, 200]);
    /// ```
    pub fn range<R>(&self, range: R) -> Range<'_, V, P, C>
    where
        R: RangeBounds<P::Key>,
    {
        use Bound::*;

        let front = match range.start_bound() {
            Included(key) => self.lower_bound_node(key),
            Excluded(key) => self.upper_bound_node(key),
            Unbounded => self.nodes.left(HEADER),
        };
        let back = match range.end_bound() {
            Included(key) => self.upper_bound_node(key),
            Excluded(key) => self.lower_bound_node(key),
            Unbounded => HEADER,
        };

        // Both ends are the first node satisfying a monotone predicate,
        // so equal keys at both ends mean the same node.
        let inverted = front == HEADER
            || (back != HEADER && self.compare.less(self.key_at(back), self.key_at(front)));
        if inverted {
            Range::new(self, back, back)
        } else {
            Range::new(self, front, back)
        }
    }

    /// Iterate over `[first, last)`.
    ///
    /// `first` must not come after `last`. Positions that are stale or
    /// from another tree yield an empty iterator.
    pub fn range_between(&self, first: Position, last: Position) -> Range<'_, V, P, C> {
        let valid = |pos: Position| self.check_position(pos).is_ok();
        if valid(first) && valid(last) && !first.is_end() {
            Range::new(self, first.index, last.index)
        } else {
            Range::new(self, HEADER, HEADER)
        }
    }
}
