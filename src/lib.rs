//! # ordered-rbtree
//!
//! Red-black tree core for ordered associative containers.
//! O(log n) insert, erase and lookup. O(1) access to both extremities.
//!
//! ## Features
//! - Multi-key and unique-key insertion, with and without position hints
//! - Arena-backed nodes addressed by generation-checked positions
//! - Set-like and map-like value projections
//! - Bidirectional cursors and double-ended iterators
//! - no_std compatible (requires alloc)
//!
//! ## Example
//! ```rust
//! use ordered_rbtree::RbTree;
//!
//! let mut tree = RbTree::<u32>::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert_unique(key).unwrap();
//! }
//!
//! let keys: Vec<u32> = tree.iter().copied().collect();
//! assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod arena;
mod config;
mod constants;
mod error;
mod key;
mod tree;

pub use config::TreeConfig;
pub use constants::MAX_LEN;
pub use error::{InvariantViolation, TreeError};
pub use key::{Compare, First, FnCompare, Identity, KeyOfValue, Natural, Reverse};
pub use tree::{Color, Cursor, Iter, MapTree, Position, Range, RbTree, SetTree};
