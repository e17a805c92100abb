//! Free list management for released arena slots.

use crate::constants::NIL;

/// Intrusive LIFO list of vacant arena slots.
///
/// The links live inside the vacant slots themselves (see
/// `Slot::Vacant::next_free`), so releasing a slot never allocates.
/// This struct only tracks the head and the number of vacant slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeList {
    /// Most recently released slot, or `NIL` when no slot is vacant
    head: u32,

    /// Number of vacant slots on the list
    len: usize,
}

impl FreeList {
    /// Create a new empty free list.
    #[inline]
    pub const fn new() -> Self {
        FreeList { head: NIL, len: 0 }
    }

    /// Slot that the next allocation will reuse, if any.
    #[inline(always)]
    pub fn head(&self) -> Option<u32> {
        (self.head != NIL).then_some(self.head)
    }

    /// Number of vacant slots available for reuse.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Record that `index` was released; returns the previous head, which
    /// the caller stores in the vacant slot.
    #[inline]
    pub fn push(&mut self, index: u32) -> u32 {
        let prev = self.head;
        self.head = index;
        self.len += 1;
        prev
    }

    /// Unlink the head slot; `next` is the link read from that slot.
    #[inline]
    pub fn pop(&mut self, next: u32) {
        debug_assert!(self.len > 0, "pop from empty free list");
        self.head = next;
        self.len -= 1;
    }
}

impl Default for FreeList {
    fn default() -> Self {
        Self::new()
    }
}
