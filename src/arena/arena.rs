//! Arena structure for tree node storage

extern crate alloc;
use alloc::vec::Vec;

use super::FreeList;
use crate::constants::{MAX_LEN, NIL};
use crate::error::TreeError;

/// One arena slot: either a live element or a link in the free list.
///
/// Both states carry a generation counter that is bumped every time the
/// slot is released, so a handle remembering `(index, generation)` can
/// tell whether the element it named is still there.
#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied { generation: u32, item: T },
    Vacant { generation: u32, next_free: u32 },
}

/// Generic slot arena with index-based addressing and slot reuse.
///
/// Provides stable `u32` indices for the lifetime of each element.
/// Released slots are threaded onto an intrusive free list and reused by
/// later allocations.
///
/// # Type Parameters
/// * `T` - Element type (tree nodes)
///
/// # Memory Layout
/// - Elements stored contiguously in Vec
/// - Index-based access (u32 indices, `NIL` reserved)
/// - Grows only when the free list is empty
///
/// # Performance
/// - Allocation: O(1) amortized
/// - Release: O(1), never allocates
/// - Access: O(1) by index
#[derive(Debug)]
pub struct Arena<T> {
    /// Storage for occupied and vacant slots.
    ///
    /// Index in this Vec is the arena index used for references.
    slots: Vec<Slot<T>>,

    /// Vacant slots available for reuse
    free: FreeList,

    /// Number of occupied slots
    len: usize,
}

impl<T> Arena<T> {
    /// Create a new empty arena.
    ///
    /// # Performance
    /// O(1) - creates empty Vec
    #[inline(always)]
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: FreeList::new(),
            len: 0,
        }
    }

    /// Create arena with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Number of elements to pre-allocate
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: FreeList::new(),
            len: 0,
        }
    }

    /// Make sure `additional` more elements fit without reallocating.
    ///
    /// Vacant slots count towards the requirement.
    ///
    /// # Errors
    /// `TreeError::AllocFailed` if the reservation cannot be satisfied
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TreeError> {
        let missing = additional.saturating_sub(self.free.len());
        self.slots.try_reserve(missing)?;
        Ok(())
    }

    /// Store an element and return its index.
    ///
    /// Reuses the most recently released slot when one exists, otherwise
    /// appends. On error nothing is modified and `item` is dropped.
    ///
    /// # Errors
    /// - `TreeError::CapacityOverflow` if the index space is exhausted
    /// - `TreeError::AllocFailed` if growing the slot vector fails
    ///
    /// # Performance
    /// O(1) amortized
    pub fn alloc(&mut self, item: T) -> Result<u32, TreeError> {
        let index = match self.free.head() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let (generation, next_free) = match *slot {
                    Slot::Vacant {
                        generation,
                        next_free,
                    } => (generation, next_free),
                    Slot::Occupied { .. } => unreachable!("free list names occupied slot {index}"),
                };
                *slot = Slot::Occupied { generation, item };
                self.free.pop(next_free);
                index
            }
            None => {
                if self.slots.len() >= NIL as usize {
                    return Err(TreeError::CapacityOverflow {
                        len: self.len,
                        max_len: MAX_LEN,
                    });
                }
                self.slots.try_reserve(1)?;
                let index = self.slots.len() as u32;
                self.slots.push(Slot::Occupied {
                    generation: 0,
                    item,
                });
                index
            }
        };
        self.len += 1;
        Ok(index)
    }

    /// Release the element at `index` and hand it back.
    ///
    /// # Panics
    /// Panics if the slot is vacant
    ///
    /// # Performance
    /// O(1)
    pub fn free(&mut self, index: u32) -> T {
        let generation = match self.slots[index as usize] {
            Slot::Occupied { generation, .. } => generation,
            Slot::Vacant { .. } => panic!("double free of arena slot {index}"),
        };
        let next_free = self.free.push(index);
        let old = core::mem::replace(
            &mut self.slots[index as usize],
            Slot::Vacant {
                generation: generation.wrapping_add(1),
                next_free,
            },
        );
        self.len -= 1;
        match old {
            Slot::Occupied { item, .. } => item,
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    /// Release every element at `start` or above.
    ///
    /// Slots below `start` are untouched and must all be occupied. The
    /// free list is rebuilt so that low indices are reused first.
    ///
    /// # Performance
    /// O(slots) - drops each released element
    pub fn release_from(&mut self, start: u32) {
        let start = start as usize;
        debug_assert!(
            self.slots[..start.min(self.slots.len())]
                .iter()
                .all(|slot| matches!(slot, Slot::Occupied { .. })),
            "release_from requires an occupied prefix"
        );

        self.free = FreeList::new();
        for index in (start..self.slots.len()).rev() {
            let next_free = self.free.push(index as u32);
            let slot = &mut self.slots[index];
            let generation = match *slot {
                Slot::Occupied { generation, .. } => generation.wrapping_add(1),
                Slot::Vacant { generation, .. } => generation,
            };
            *slot = Slot::Vacant {
                generation,
                next_free,
            };
        }
        self.len = start.min(self.slots.len());
    }

    /// Get element by index.
    ///
    /// # Panics
    /// Panics if index is out of bounds or the slot is vacant
    ///
    /// # Performance
    /// O(1) - direct Vec indexing
    #[inline(always)]
    pub fn get(&self, index: u32) -> &T {
        match &self.slots[index as usize] {
            Slot::Occupied { item, .. } => item,
            Slot::Vacant { .. } => panic!("access to vacant arena slot {index}"),
        }
    }

    /// Get mutable element by index.
    ///
    /// # Panics
    /// Panics if index is out of bounds or the slot is vacant
    #[inline(always)]
    pub fn get_mut(&mut self, index: u32) -> &mut T {
        match &mut self.slots[index as usize] {
            Slot::Occupied { item, .. } => item,
            Slot::Vacant { .. } => panic!("access to vacant arena slot {index}"),
        }
    }

    /// Generation of the element at `index`, or `None` if there is none.
    #[inline]
    pub fn generation(&self, index: u32) -> Option<u32> {
        match self.slots.get(index as usize)? {
            Slot::Occupied { generation, .. } => Some(*generation),
            Slot::Vacant { .. } => None,
        }
    }

    /// Get number of occupied slots.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of elements the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}

impl<T: Clone> Clone for Arena<T> {
    fn clone(&self) -> Self {
        Arena {
            slots: self.slots.clone(),
            free: self.free,
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.slots.clone_from(&source.slots);
        self.free = source.free;
        self.len = source.len;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_new() {
        let arena: Arena<u64> = Arena::new();
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_arena_with_capacity() {
        let arena: Arena<u64> = Arena::with_capacity(100);
        assert_eq!(arena.len(), 0);
        assert!(arena.capacity() >= 100);
    }

    #[test]
    fn test_alloc_sequential_indices() {
        let mut arena = Arena::new();

        let idx0 = arena.alloc(10u64).unwrap();
        assert_eq!(idx0, 0);
        assert_eq!(arena.len(), 1);

        let idx1 = arena.alloc(20u64).unwrap();
        assert_eq!(idx1, 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(*arena.get(idx1), 20);
    }

    #[test]
    fn test_free_reuses_slot_with_new_generation() {
        let mut arena = Arena::new();
        let a = arena.alloc('a').unwrap();
        let _b = arena.alloc('b').unwrap();
        assert_eq!(arena.generation(a), Some(0));

        assert_eq!(arena.free(a), 'a');
        assert_eq!(arena.generation(a), None);
        assert_eq!(arena.len(), 1);

        let c = arena.alloc('c').unwrap();
        assert_eq!(c, a);
        assert_eq!(arena.generation(c), Some(1));
        assert_eq!(*arena.get(c), 'c');
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new();
        let idx = arena.alloc(1u32).unwrap();
        *arena.get_mut(idx) = 42;
        assert_eq!(*arena.get(idx), 42);
    }

    #[test]
    #[should_panic(expected = "vacant")]
    fn test_get_vacant_panics() {
        let mut arena = Arena::new();
        let idx = arena.alloc(1u32).unwrap();
        arena.free(idx);
        arena.get(idx);
    }

    #[test]
    fn test_release_from_keeps_prefix() {
        let mut arena = Arena::new();
        for i in 0..5u32 {
            arena.alloc(i).unwrap();
        }
        arena.free(3);
        arena.release_from(1);

        assert_eq!(arena.len(), 1);
        assert_eq!(*arena.get(0), 0);
        for i in 1..5 {
            assert_eq!(arena.generation(i), None);
        }

        // Low indices come back first
        assert_eq!(arena.alloc(7).unwrap(), 1);
        assert_eq!(arena.alloc(8).unwrap(), 2);
        // Slot 2 was occupied once, so its generation moved on
        assert_eq!(arena.generation(2), Some(1));
    }

    #[test]
    fn test_try_reserve_counts_vacant_slots() {
        let mut arena = Arena::new();
        for i in 0..4u8 {
            arena.alloc(i).unwrap();
        }
        arena.free(0);
        arena.free(1);
        arena.try_reserve(2).unwrap();
        assert!(arena.capacity() >= arena.len() + 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut arena = Arena::new();
        let idx = arena.alloc(5i32).unwrap();
        let mut copy = arena.clone();
        *copy.get_mut(idx) = 6;
        assert_eq!(*arena.get(idx), 5);
        assert_eq!(*copy.get(idx), 6);
    }
}
