//! Node arena for tree storage
//!
//! This module provides the index-addressed allocator that owns every
//! node of a tree, with slot reuse through an intrusive free list and
//! generation counters for stale-handle detection.

#[allow(clippy::module_inception)]
mod arena;
mod free_list;

pub use arena::Arena;
pub use free_list::FreeList;
