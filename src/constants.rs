//! Core constants and index conventions for ordered-rbtree.

/// Sentinel value for an absent link.
///
/// Used to indicate:
/// - Missing left/right child (conceptual black leaf)
/// - Missing root in an empty tree (`header.parent`)
/// - End of the arena free list
pub const NIL: u32 = u32::MAX;

/// Arena index of the header sentinel.
///
/// The header is allocated first and never released, so it always
/// occupies slot 0 of a tree's node arena.
pub const HEADER: u32 = 0;

/// Maximum number of values a single tree can hold.
///
/// Every index except `HEADER` and `NIL` can address a value node.
pub const MAX_LEN: usize = (u32::MAX - 1) as usize;
