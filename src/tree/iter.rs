//! Positions, cursors and iterators over a tree.
//!
//! Traversal is driven entirely by the link algorithms: stepping forward
//! is a successor step, stepping backward is a predecessor step, and the
//! header sentinel doubles as the one-past-the-end position.
//!
//! # Performance
//! - O(1) amortized per step for a full traversal
//! - O(log n) worst case for a single step

use core::iter::FusedIterator;

use super::algo;
use super::tree::RbTree;
use crate::constants::HEADER;
use crate::key::{Compare, KeyOfValue};

/// Detached handle naming one node of a tree (or its end).
///
/// A position stays valid until the node it names is erased or the tree
/// is cleared; erasing other nodes never invalidates it. Positions carry
/// the node's generation, so a stale position is detected instead of
/// silently naming a node that later reused the same slot. They also
/// carry the id of the tree that issued them, so a position handed to a
/// different tree is rejected.
///
/// Equality is node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) tree: u32,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Position {
    /// `true` if this is the one-past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == HEADER
    }
}

/// Bidirectional cursor over a borrowed tree.
///
/// The cursor always rests on a value or on the end position. Stepping
/// is circular through the end position: advancing from the last value
/// reaches the end, advancing from the end reaches the first value, and
/// retreating mirrors this.
///
/// # Example
/// ```rust
/// use ordered_rbtree::RbTree;
///
/// let mut tree = RbTree::<i32>::new();
/// for v in [20, 10, 30] {
///     tree.insert_unique(v).unwrap();
/// }
///
/// let mut cursor = tree.cursor_end();
/// cursor.retreat();
/// assert_eq!(cursor.get(), Some(&30));
/// cursor.retreat();
/// assert_eq!(cursor.get(), Some(&20));
/// cursor.advance();
/// cursor.advance();
/// assert!(cursor.is_end());
/// ```
pub struct Cursor<'a, V, P, C> {
    tree: &'a RbTree<V, P, C>,
    node: u32,
}

impl<'a, V, P, C> Cursor<'a, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    #[inline]
    pub(crate) fn new(tree: &'a RbTree<V, P, C>, node: u32) -> Self {
        Cursor { tree, node }
    }

    /// Value under the cursor, `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&'a V> {
        self.tree.nodes.get(self.node).value.as_ref()
    }

    /// `true` if the cursor rests on the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        algo::is_header(&self.tree.nodes, self.node)
    }

    /// Detached position of the cursor, usable after the borrow ends.
    #[inline]
    pub fn position(&self) -> Position {
        self.tree.position_of(self.node)
    }

    /// Step to the in-order successor.
    ///
    /// From the last value this reaches the end; from the end it wraps
    /// to the first value.
    pub fn advance(&mut self) {
        let nodes = &self.tree.nodes;
        self.node = if algo::is_header(nodes, self.node) {
            nodes.left(HEADER)
        } else {
            algo::successor(nodes, self.node)
        };
    }

    /// Step to the in-order predecessor.
    ///
    /// From the end this reaches the last value; from the first value it
    /// wraps to the end.
    pub fn retreat(&mut self) {
        let nodes = &self.tree.nodes;
        self.node = if self.node == nodes.left(HEADER) && !algo::is_header(nodes, self.node) {
            HEADER
        } else {
            algo::predecessor(nodes, self.node)
        };
    }

    /// Value after the cursor without moving it.
    pub fn peek_next(&self) -> Option<&'a V> {
        let mut next = self.clone();
        next.advance();
        next.get()
    }

    /// Value before the cursor without moving it.
    pub fn peek_prev(&self) -> Option<&'a V> {
        let mut prev = self.clone();
        prev.retreat();
        prev.get()
    }
}

impl<V, P, C> Clone for Cursor<'_, V, P, C> {
    fn clone(&self) -> Self {
        Cursor {
            tree: self.tree,
            node: self.node,
        }
    }
}

impl<V, P, C> PartialEq for Cursor<'_, V, P, C> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<V, P, C> Eq for Cursor<'_, V, P, C> {}

/// Iterator over values in comparator order.
///
/// Double-ended: `.rev()` walks from the largest value down, starting
/// with a predecessor step from the header.
///
/// # Example
/// ```rust
/// use ordered_rbtree::RbTree;
///
/// let mut tree = RbTree::<u64>::new();
/// for v in [30, 10, 20] {
///     tree.insert_multi(v).unwrap();
/// }
///
/// let keys: Vec<u64> = tree.iter().copied().collect();
/// assert_eq!(keys, vec![10, 20, 30]);
/// let rev: Vec<u64> = tree.iter().rev().copied().collect();
/// assert_eq!(rev, vec![30, 20, 10]);
/// ```
pub struct Iter<'a, V, P, C> {
    /// Next node to yield from the front
    front: u32,

    /// One past the last node to yield from the back
    back: u32,

    /// Values left between `front` and `back`
    remaining: usize,

    tree: &'a RbTree<V, P, C>,
}

impl<'a, V, P, C> Iter<'a, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    pub(crate) fn new(tree: &'a RbTree<V, P, C>) -> Self {
        Iter {
            front: tree.nodes.left(HEADER),
            back: HEADER,
            remaining: tree.len(),
            tree,
        }
    }
}

impl<'a, V, P, C> Iterator for Iter<'a, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = &self.tree.nodes;
        let value = nodes.value(self.front);
        self.front = algo::successor(nodes, self.front);
        self.remaining -= 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V, P, C> DoubleEndedIterator for Iter<'a, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    fn next_back(&mut self) -> Option<&'a V> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = &self.tree.nodes;
        self.back = algo::predecessor(nodes, self.back);
        self.remaining -= 1;
        Some(nodes.value(self.back))
    }
}

impl<V, P, C> ExactSizeIterator for Iter<'_, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
}

impl<V, P, C> FusedIterator for Iter<'_, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
}

impl<V, P, C> Clone for Iter<'_, V, P, C> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            tree: self.tree,
        }
    }
}

/// Iterator over the values between two positions.
///
/// Yields `[front, back)` in comparator order; double-ended.
///
/// # Example
/// ```rust
/// use ordered_rbtree::RbTree;
///
/// let mut tree = RbTree::<u32>::new();
/// for v in 0..100 {
///     tree.insert_unique(v).unwrap();
/// }
///
/// let keys: Vec<u32> = tree.range(10..20).copied().collect();
/// assert_eq!(keys.len(), 10);
/// assert_eq!(keys[0], 10);
/// assert_eq!(keys[9], 19);
/// ```
pub struct Range<'a, V, P, C> {
    front: u32,
    back: u32,
    tree: &'a RbTree<V, P, C>,
}

impl<'a, V, P, C> Range<'a, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    pub(crate) fn new(tree: &'a RbTree<V, P, C>, front: u32, back: u32) -> Self {
        Range { front, back, tree }
    }
}

impl<'a, V, P, C> Iterator for Range<'a, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        if self.front == self.back || self.front == HEADER {
            return None;
        }
        let nodes = &self.tree.nodes;
        let value = nodes.value(self.front);
        self.front = algo::successor(nodes, self.front);
        Some(value)
    }
}

impl<'a, V, P, C> DoubleEndedIterator for Range<'a, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    fn next_back(&mut self) -> Option<&'a V> {
        let nodes = &self.tree.nodes;
        if self.front == self.back || self.back == nodes.left(HEADER) {
            return None;
        }
        self.back = algo::predecessor(nodes, self.back);
        Some(nodes.value(self.back))
    }
}

impl<V, P, C> FusedIterator for Range<'_, V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
}

impl<'a, V, P, C> IntoIterator for &'a RbTree<V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    type Item = &'a V;
    type IntoIter = Iter<'a, V, P, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::RbTree;
    use alloc::vec::Vec;

    fn sample() -> RbTree<u32> {
        let mut tree = RbTree::new();
        for v in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert_unique(v).unwrap();
        }
        tree
    }

    #[test]
    fn test_iter_forward_and_back() {
        let tree = sample();
        let fwd: Vec<u32> = tree.iter().copied().collect();
        assert_eq!(fwd, [1, 3, 4, 5, 7, 8, 9]);
        let rev: Vec<u32> = tree.iter().rev().copied().collect();
        assert_eq!(rev, [9, 8, 7, 5, 4, 3, 1]);
    }

    #[test]
    fn test_iter_meets_in_middle() {
        let tree = sample();
        let mut it = tree.iter();
        assert_eq!(it.len(), 7);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&9));
        assert_eq!(it.next(), Some(&3));
        assert_eq!(it.next_back(), Some(&8));
        let rest: Vec<u32> = it.copied().collect();
        assert_eq!(rest, [4, 5, 7]);
    }

    #[test]
    fn test_iter_empty() {
        let tree = RbTree::<u32>::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().next_back(), None);
    }

    #[test]
    fn test_iter_is_restartable() {
        let tree = sample();
        let first: Vec<&u32> = tree.iter().collect();
        let second: Vec<&u32> = (&tree).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cursor_wraps_through_end() {
        let tree = sample();
        let mut cursor = tree.cursor_front();
        assert_eq!(cursor.get(), Some(&1));
        assert_eq!(cursor.peek_prev(), None);

        cursor.retreat();
        assert!(cursor.is_end());
        assert_eq!(cursor.get(), None);

        cursor.retreat();
        assert_eq!(cursor.get(), Some(&9));

        cursor.advance();
        assert!(cursor.is_end());
        cursor.advance();
        assert_eq!(cursor.get(), Some(&1));
    }

    #[test]
    fn test_cursor_on_empty_tree_stays_at_end() {
        let tree = RbTree::<u32>::new();
        let mut cursor = tree.cursor_front();
        assert!(cursor.is_end());
        cursor.advance();
        assert!(cursor.is_end());
        cursor.retreat();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_cursor_position_round_trip() {
        let tree = sample();
        let pos = tree.find(&7);
        let cursor = tree.cursor(pos).unwrap();
        assert_eq!(cursor.get(), Some(&7));
        assert_eq!(cursor.peek_next(), Some(&8));
        assert_eq!(cursor.peek_prev(), Some(&5));
        assert_eq!(cursor.position(), pos);
    }

    #[test]
    fn test_cursor_equality_is_identity() {
        let tree = sample();
        let a = tree.cursor(tree.find(&4)).unwrap();
        let mut b = tree.cursor(tree.find(&3)).unwrap();
        assert!(a != b);
        b.advance();
        assert!(a == b);
    }

    #[test]
    fn test_range_double_ended() {
        let tree = sample();
        let mut range = tree.range(3..=8);
        assert_eq!(range.next_back(), Some(&8));
        assert_eq!(range.next(), Some(&3));
        let rest: Vec<u32> = range.copied().collect();
        assert_eq!(rest, [4, 5, 7]);
    }
}
