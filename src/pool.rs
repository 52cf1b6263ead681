//! Fragment pool: a fixed 2048-byte arena carved into 64 slots.
//!
//! The pool hands out slots in O(1) through an intrusive free list that is
//! threaded through the slots' own storage: while a slot is free, its
//! first byte holds the index of the next free slot ([`NONE_BYTE`]
//! terminates the list). There is no per-slot liveness tag; membership in
//! the free list is the only indicator of whether a slot is free or owned
//! by a queue segment, and the two interpretations of the slot bytes are
//! mutually exclusive.
//!
//! Cross-slot references are [`SlotIndex`] values rather than pointers, so
//! a reference fits in a single arena byte.

use crate::config::{ARENA_SIZE, NONE_BYTE, SLOT_COUNT, SLOT_SIZE};
use crate::error::{QueueError, QueueResult};

/// Index of a slot within the pool, in the range `0..SLOT_COUNT`.
///
/// This is the compact stand-in for a slot pointer: segments reference
/// each other by storing a `SlotIndex` in one bookkeeping byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// Create a slot index, returning `None` if out of range.
    pub fn new(raw: u8) -> Option<Self> {
        ((raw as usize) < SLOT_COUNT).then_some(Self(raw))
    }

    /// Get the raw index value.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub(crate) fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Decode an arena byte into an optional index (`NONE_BYTE` = none).
    #[inline]
    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        if byte == NONE_BYTE {
            None
        } else {
            debug_assert!((byte as usize) < SLOT_COUNT, "corrupt slot index byte");
            Some(Self(byte))
        }
    }

    /// Encode an optional index as an arena byte.
    #[inline]
    pub(crate) fn encode(index: Option<SlotIndex>) -> u8 {
        index.map_or(NONE_BYTE, |i| i.0)
    }
}

/// Fixed-size slot allocator over an inline byte arena.
///
/// All 2048 bytes live inside the struct; the pool performs no heap
/// allocation at any point. Allocation pops the free-list head and
/// deallocation pushes onto it, both O(1). Deallocation zeroes the slot so
/// no payload or bookkeeping leaks into its next use.
pub struct FragmentPool {
    /// Backing storage for all slots.
    arena: [u8; ARENA_SIZE],
    /// Head of the intrusive free list, or `None` when exhausted.
    free_head: Option<SlotIndex>,
}

impl FragmentPool {
    /// Create a pool with a zeroed arena and every slot free.
    ///
    /// Slots are threaded into the free list in ascending order, so a
    /// fresh pool allocates slot 0 first, then 1, and so on.
    pub fn new() -> Self {
        let mut arena = [0u8; ARENA_SIZE];
        for i in 0..SLOT_COUNT {
            let next = if i + 1 < SLOT_COUNT {
                (i + 1) as u8
            } else {
                NONE_BYTE
            };
            arena[i * SLOT_SIZE] = next;
        }
        Self {
            arena,
            free_head: SlotIndex::new(0),
        }
    }

    /// Allocate a slot, popping the free-list head.
    ///
    /// Fails with [`QueueError::OutOfMemory`] when all slots are in use;
    /// nothing is mutated on failure. The returned slot still carries its
    /// free-list link byte; the caller is expected to initialize it as a
    /// segment before use.
    pub fn allocate(&mut self) -> QueueResult<SlotIndex> {
        let head = self.free_head.ok_or(QueueError::OutOfMemory)?;
        self.free_head = SlotIndex::from_byte(self.arena[head.as_usize() * SLOT_SIZE]);
        Ok(head)
    }

    /// Return a slot to the pool.
    ///
    /// The slot's bytes are zeroed before it is pushed onto the free list,
    /// so stale payload never survives across reuse.
    ///
    /// The caller must pass a slot that is currently in use, exactly once;
    /// the pool keeps no per-slot liveness bits to catch a double free.
    pub fn deallocate(&mut self, index: SlotIndex) {
        debug_assert!(!self.is_free(index), "double free of slot {}", index.get());
        let base = index.as_usize() * SLOT_SIZE;
        self.arena[base..base + SLOT_SIZE].fill(0);
        self.arena[base] = SlotIndex::encode(self.free_head);
        self.free_head = Some(index);
    }

    /// Get shared access to a slot's bytes.
    #[inline]
    pub fn slot(&self, index: SlotIndex) -> &[u8] {
        let base = index.as_usize() * SLOT_SIZE;
        &self.arena[base..base + SLOT_SIZE]
    }

    /// Get exclusive access to a slot's bytes.
    #[inline]
    pub fn slot_mut(&mut self, index: SlotIndex) -> &mut [u8] {
        let base = index.as_usize() * SLOT_SIZE;
        &mut self.arena[base..base + SLOT_SIZE]
    }

    /// Read-only view of the raw arena, for diagnostics.
    #[inline]
    pub fn arena(&self) -> &[u8; ARENA_SIZE] {
        &self.arena
    }

    /// Count the slots currently on the free list.
    ///
    /// Walks the list, so this is O(SLOT_COUNT); intended for tests and
    /// diagnostics, not the hot path.
    pub fn free_count(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.free_head;
        while let Some(index) = cursor {
            count += 1;
            debug_assert!(count <= SLOT_COUNT, "free list cycle");
            cursor = SlotIndex::from_byte(self.arena[index.as_usize() * SLOT_SIZE]);
        }
        count
    }

    /// Check whether a slot is currently linked into the free list.
    fn is_free(&self, index: SlotIndex) -> bool {
        let mut cursor = self.free_head;
        let mut steps = 0;
        while let Some(free) = cursor {
            if free == index {
                return true;
            }
            steps += 1;
            if steps > SLOT_COUNT {
                break;
            }
            cursor = SlotIndex::from_byte(self.arena[free.as_usize() * SLOT_SIZE]);
        }
        false
    }
}

impl Default for FragmentPool {
    fn default() -> Self {
        Self::new()
    }
}
