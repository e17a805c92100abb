//! Error types for tree operations and invariant checking.

use alloc::collections::TryReserveError;
use core::fmt;

/// Errors reported by fallible tree operations.
///
/// Every operation that returns a `TreeError` leaves the tree exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Inserting would push the tree past its configured maximum size.
    CapacityOverflow {
        /// Number of values stored when the insertion was attempted
        len: usize,
        /// Maximum number of values the tree accepts
        max_len: usize,
    },

    /// The node arena could not reserve memory for a new node.
    AllocFailed(TryReserveError),

    /// The position is `end()`, was erased, or belongs to another tree.
    InvalidPosition,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::CapacityOverflow { len, max_len } => {
                write!(f, "tree size {len} would exceed maximum of {max_len}")
            }
            TreeError::AllocFailed(err) => write!(f, "node allocation failed: {err}"),
            TreeError::InvalidPosition => f.write_str("position does not name a live element"),
        }
    }
}

impl core::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            TreeError::AllocFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for TreeError {
    fn from(err: TryReserveError) -> Self {
        TreeError::AllocFailed(err)
    }
}

/// A broken red-black or bookkeeping invariant found by `RbTree::validate`.
///
/// Node fields carry arena indices, which are only meaningful for
/// debugging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node is Red.
    RedRoot,

    /// A Red node has a Red child.
    RedRed { node: u32 },

    /// Two paths below `node` see different numbers of Black nodes.
    BlackHeight { node: u32, left: usize, right: usize },

    /// In-order traversal found a key smaller than its predecessor.
    Order { node: u32 },

    /// A child's parent link does not point back at its parent.
    ParentLink { node: u32 },

    /// The header's cached leftmost or rightmost node is wrong.
    Extremity,

    /// The stored count differs from the number of reachable nodes.
    Count { stored: usize, reachable: usize },

    /// The arena holds value nodes that are not linked into the tree.
    Leak { allocated: usize, reachable: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::RedRoot => f.write_str("root is red"),
            InvariantViolation::RedRed { node } => write!(f, "red node {node} has a red child"),
            InvariantViolation::BlackHeight { node, left, right } => write!(
                f,
                "black-height mismatch below node {node}: left {left}, right {right}"
            ),
            InvariantViolation::Order { node } => write!(f, "node {node} is out of order"),
            InvariantViolation::ParentLink { node } => {
                write!(f, "node {node} has an inconsistent parent link")
            }
            InvariantViolation::Extremity => f.write_str("cached leftmost/rightmost is stale"),
            InvariantViolation::Count { stored, reachable } => write!(
                f,
                "stored count {stored} differs from {reachable} reachable nodes"
            ),
            InvariantViolation::Leak {
                allocated,
                reachable,
            } => write!(
                f,
                "{allocated} value nodes allocated but only {reachable} reachable"
            ),
        }
    }
}

impl core::error::Error for InvariantViolation {}
