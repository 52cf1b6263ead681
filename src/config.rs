//! Pool geometry constants.
//!
//! Every configuration value is fixed at compile time: the arena never
//! grows, slots never change size, and the payload/bookkeeping split is
//! part of the arena byte format. The assertions below keep the constants
//! mutually consistent if one is ever retuned.

/// Total arena size in bytes.
pub const ARENA_SIZE: usize = 2048;

/// Size of one slot in bytes.
pub const SLOT_SIZE: usize = 32;

/// Number of slots in the arena.
pub const SLOT_COUNT: usize = 64;

/// Bookkeeping bytes at the start of an in-use slot
/// (back segment, next segment, front item, back item).
pub const BOOKKEEPING_SIZE: usize = 4;

/// Payload bytes per slot.
pub const PAYLOAD_SIZE: usize = 28;

/// Byte encoding of "no index" in arena-resident index fields.
///
/// Slot indices occupy 0..64 and payload indices 0..28, so `0xFF` is
/// unreachable as a real index and can stand for "none".
pub const NONE_BYTE: u8 = 0xFF;

// Compile-time consistency checks
const _: () = assert!(SLOT_COUNT * SLOT_SIZE == ARENA_SIZE);
const _: () = assert!(BOOKKEEPING_SIZE + PAYLOAD_SIZE == SLOT_SIZE);
const _: () = assert!(SLOT_COUNT < NONE_BYTE as usize);
const _: () = assert!(PAYLOAD_SIZE < NONE_BYTE as usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry() {
        assert_eq!(ARENA_SIZE, 2048);
        assert_eq!(SLOT_SIZE, 32);
        assert_eq!(SLOT_COUNT, 64);
        assert_eq!(PAYLOAD_SIZE, 28);
        assert_eq!(BOOKKEEPING_SIZE, 4);
    }

    #[test]
    fn test_none_byte_unreachable_as_index() {
        assert!(SLOT_COUNT <= NONE_BYTE as usize);
        assert!(PAYLOAD_SIZE <= NONE_BYTE as usize);
    }
}
