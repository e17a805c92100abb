//! Main tree container.

use core::cmp::Ordering;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use log::debug;

use super::algo;
use super::iter::{Cursor, Iter, Position};
use super::node::{Color, Node};
use crate::arena::Arena;
use crate::config::TreeConfig;
use crate::constants::{HEADER, NIL};
use crate::error::TreeError;
use crate::key::{Compare, Identity, KeyOfValue, Natural};

/// Source of tree ids stamped into positions.
///
/// Wraps after `u32::MAX` constructions; two trees sharing an id only
/// lose the cross-tree check between themselves.
static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(0);

/// Red-black tree over values of type `V`.
///
/// The tree orders values by the key that the projection `P` extracts,
/// using the strict weak ordering `C`. It backs both set-like trees
/// (`P = Identity`, the default) and map-like trees (`P = First` over
/// `(key, mapped)` pairs), and supports unique-key as well as
/// multi-key insertion on the same instance.
///
/// # Architecture
/// - All nodes live in one arena, addressed by `u32` indices
/// - Index 0 is the header sentinel: its `parent` is the root, its
///   `left`/`right` cache the minimum/maximum nodes
/// - Erase moves nodes, never values, so positions of surviving values
///   stay valid
///
/// # Performance Characteristics
/// - Insert / erase / lookup: O(log n)
/// - First / last / len: O(1)
/// - Full iteration: O(n)
///
/// # Example
/// ```rust
/// use ordered_rbtree::RbTree;
///
/// let mut tree = RbTree::<u32>::new();
/// let (_, inserted) = tree.insert_unique(42).unwrap();
/// assert!(inserted);
/// let (pos, inserted) = tree.insert_unique(42).unwrap();
/// assert!(!inserted);
/// assert_eq!(tree.value_at(pos), Some(&42));
/// assert_eq!(tree.len(), 1);
/// ```
pub struct RbTree<V, P = Identity, C = Natural> {
    /// Node storage; slot `HEADER` holds the sentinel
    pub(crate) nodes: Arena<Node<V>>,

    /// Number of value nodes
    pub(crate) len: usize,

    /// Key ordering
    pub(crate) compare: C,

    /// Construction-time limits
    pub(crate) config: TreeConfig,

    /// Id stamped into every position this tree hands out; shared by clones
    pub(crate) id: u32,

    _projection: core::marker::PhantomData<fn() -> P>,
}

/// Set-like tree: every value is its own key.
pub type SetTree<T, C = Natural> = RbTree<T, Identity, C>;

/// Map-like tree over `(key, mapped)` pairs ordered by key.
pub type MapTree<K, M, C = Natural> = RbTree<(K, M), crate::key::First, C>;

impl<V, P, C> RbTree<V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    /// Create an empty tree with the default comparator.
    ///
    /// # Performance
    /// O(1) - allocates the header node only
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::with_config(TreeConfig::default(), C::default())
    }

    /// Create an empty tree ordered by `compare`.
    pub fn with_comparator(compare: C) -> Self {
        Self::with_config(TreeConfig::default(), compare)
    }

    /// Create an empty tree with explicit limits.
    ///
    /// # Arguments
    /// * `config` - maximum size and initial node capacity
    /// * `compare` - key ordering
    pub fn with_config(config: TreeConfig, compare: C) -> Self {
        let capacity = config.get_initial_capacity().saturating_add(1);
        let mut nodes = Arena::with_capacity(capacity);
        // Slot 0 is always free here, so this cannot fail.
        let header = nodes.alloc(Node::header(HEADER));
        debug_assert_eq!(header, Ok(HEADER));
        RbTree {
            nodes,
            len: 0,
            compare,
            config,
            id: NEXT_TREE_ID.fetch_add(1, AtomicOrdering::Relaxed),
            _projection: core::marker::PhantomData,
        }
    }

    /// Number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the tree holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest number of values this tree accepts.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.config.get_max_len()
    }

    /// Number of values the tree can hold before its node storage grows.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity().saturating_sub(1)
    }

    /// The tree's comparator.
    #[inline]
    pub fn key_comp(&self) -> &C {
        &self.compare
    }

    /// Construction-time configuration.
    #[inline]
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Position of the smallest value (`end()` when empty).
    ///
    /// # Performance
    /// O(1) - reads the header's leftmost cache
    #[inline]
    pub fn begin(&self) -> Position {
        self.position_of(self.nodes.left(HEADER))
    }

    /// One-past-the-end position.
    #[inline]
    pub fn end(&self) -> Position {
        self.position_of(HEADER)
    }

    /// Smallest value.
    ///
    /// # Performance
    /// O(1)
    #[inline]
    pub fn first(&self) -> Option<&V> {
        self.nodes.get(self.nodes.left(HEADER)).value.as_ref()
    }

    /// Largest value.
    ///
    /// # Performance
    /// O(1)
    #[inline]
    pub fn last(&self) -> Option<&V> {
        self.nodes.get(self.nodes.right(HEADER)).value.as_ref()
    }

    /// Value at `pos`, or `None` for `end()` and stale positions.
    #[inline]
    pub fn value_at(&self, pos: Position) -> Option<&V> {
        if self.is_live(pos) {
            Some(self.nodes.value(pos.index))
        } else {
            None
        }
    }

    /// Color of the node at `pos`, for diagnostics.
    #[inline]
    pub fn color_at(&self, pos: Position) -> Option<Color> {
        self.is_live(pos).then(|| self.nodes.color(pos.index))
    }

    /// Position following `pos` (`end()` after the last value).
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` if `pos` is stale or already `end()`
    pub fn next_position(&self, pos: Position) -> Result<Position, TreeError> {
        self.check_live(pos)?;
        Ok(self.position_of(algo::successor(&self.nodes, pos.index)))
    }

    /// Position preceding `pos`; `None` before the first value.
    ///
    /// `end()` steps back to the last value.
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` if `pos` is stale or from another tree
    pub fn prev_position(&self, pos: Position) -> Result<Option<Position>, TreeError> {
        self.check_position(pos)?;
        if pos.index == self.nodes.left(HEADER) {
            return Ok(None);
        }
        Ok(Some(self.position_of(algo::predecessor(&self.nodes, pos.index))))
    }

    /// Iterate over values in comparator order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, V, P, C> {
        Iter::new(self)
    }

    /// Cursor resting on `pos`.
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` if `pos` is stale or from another tree
    pub fn cursor(&self, pos: Position) -> Result<Cursor<'_, V, P, C>, TreeError> {
        self.check_position(pos)?;
        Ok(Cursor::new(self, pos.index))
    }

    /// Cursor on the smallest value (on the end when empty).
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, V, P, C> {
        Cursor::new(self, self.nodes.left(HEADER))
    }

    /// Cursor on the end position.
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, V, P, C> {
        Cursor::new(self, HEADER)
    }

    /// Remove every value.
    ///
    /// Resets the header to the empty state and invalidates every
    /// position except `end()`. Node capacity is kept for reuse.
    ///
    /// # Performance
    /// O(n) - drops each value
    pub fn clear(&mut self) {
        if self.len > 0 {
            debug!("clearing tree of {} values", self.len);
        }
        self.nodes.release_from(HEADER + 1);
        let header = self.nodes.get_mut(HEADER);
        header.parent = NIL;
        header.left = HEADER;
        header.right = HEADER;
        self.len = 0;
    }

    /// Exchange the contents of two trees, comparators included.
    ///
    /// Positions keep naming the same values, now inside the other tree,
    /// including the end positions.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Move the contents out, leaving `self` empty.
    ///
    /// The returned tree owns every node; `self` keeps a copy of the
    /// comparator and configuration.
    pub fn take(&mut self) -> Self
    where
        C: Clone,
    {
        let empty = Self::with_config(self.config, self.compare.clone());
        core::mem::replace(self, empty)
    }

    /// Generation-checked handle for `index`.
    #[inline]
    pub(crate) fn position_of(&self, index: u32) -> Position {
        Position {
            tree: self.id,
            index,
            generation: self.nodes.generation(index).unwrap_or(0),
        }
    }

    /// `true` if `pos` names a value currently stored in this tree.
    #[inline]
    pub(crate) fn is_live(&self, pos: Position) -> bool {
        pos.tree == self.id
            && pos.index != HEADER
            && self.nodes.generation(pos.index) == Some(pos.generation)
    }

    /// `true` if `pos` is this tree's end position.
    #[inline]
    pub(crate) fn is_own_end(&self, pos: Position) -> bool {
        pos.tree == self.id && pos.is_end()
    }

    /// Accept a live position or this tree's end.
    #[inline]
    pub(crate) fn check_position(&self, pos: Position) -> Result<(), TreeError> {
        if self.is_own_end(pos) {
            Ok(())
        } else {
            self.check_live(pos)
        }
    }

    #[inline]
    pub(crate) fn check_live(&self, pos: Position) -> Result<(), TreeError> {
        if self.is_live(pos) {
            Ok(())
        } else {
            Err(TreeError::InvalidPosition)
        }
    }

    /// Key of the value stored at a value node.
    #[inline(always)]
    pub(crate) fn key_at(&self, index: u32) -> &P::Key {
        P::key(self.nodes.value(index))
    }

    /// Re-run the full invariant check after a mutation.
    #[inline(always)]
    pub(crate) fn debug_validate(&self) {
        #[cfg(feature = "strict-checks")]
        debug_assert_eq!(self.validate().err(), None);
    }
}

impl<V, P, C> Default for RbTree<V, P, C>
where
    P: KeyOfValue<V>,
    C: Compare<P::Key> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Structural copy: same shape, same colors, same indices.
impl<V: Clone, P, C: Clone> Clone for RbTree<V, P, C> {
    fn clone(&self) -> Self {
        RbTree {
            nodes: self.nodes.clone(),
            len: self.len,
            compare: self.compare.clone(),
            config: self.config,
            id: self.id,
            _projection: core::marker::PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.nodes.clone_from(&source.nodes);
        self.len = source.len;
        self.compare = source.compare.clone();
        self.config = source.config;
        self.id = source.id;
    }
}

impl<V, P, C> fmt::Debug for RbTree<V, P, C>
where
    V: fmt::Debug,
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V, P, C> PartialEq for RbTree<V, P, C>
where
    V: PartialEq,
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<V, P, C> Eq for RbTree<V, P, C>
where
    V: Eq,
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
}

impl<V, P, C> PartialOrd for RbTree<V, P, C>
where
    V: PartialOrd,
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<V, P, C> Ord for RbTree<V, P, C>
where
    V: Ord,
    P: KeyOfValue<V>,
    C: Compare<P::Key>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}
