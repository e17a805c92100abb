//! Construction-time configuration for trees.

use crate::constants::MAX_LEN;

/// Tuning knobs applied when a tree is created.
///
/// # Example
/// ```rust
/// use ordered_rbtree::{Natural, RbTree, TreeConfig};
///
/// let config = TreeConfig::new().max_len(2).initial_capacity(2);
/// let mut tree = RbTree::<u8>::with_config(config, Natural);
/// tree.insert_multi(1).unwrap();
/// tree.insert_multi(2).unwrap();
/// assert!(tree.insert_multi(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum number of values (clamped to `MAX_LEN`)
    max_len: usize,

    /// Number of value nodes to reserve up front
    initial_capacity: usize,
}

impl TreeConfig {
    /// Default configuration: full index space, no pre-allocation.
    #[inline]
    pub const fn new() -> Self {
        TreeConfig {
            max_len: MAX_LEN,
            initial_capacity: 0,
        }
    }

    /// Limit the number of values the tree accepts.
    ///
    /// Values above `MAX_LEN` are clamped.
    #[inline]
    pub const fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = if max_len > MAX_LEN { MAX_LEN } else { max_len };
        self
    }

    /// Reserve room for `capacity` value nodes at construction.
    #[inline]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Configured maximum number of values.
    #[inline]
    pub const fn get_max_len(&self) -> usize {
        self.max_len
    }

    /// Configured initial node capacity.
    #[inline]
    pub const fn get_initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}
