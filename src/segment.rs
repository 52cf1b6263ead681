//! Segment byte layout: the in-use interpretation of a pool slot.
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       1     back_segment: index of the queue's back segment;
//!               meaningful only in the front segment
//! 1       1     next_segment: next segment toward the back, or none
//! 2       1     front_item: next payload index to read, or none
//! 3       1     back_item: last payload index written, or none
//! 4       28    payload bytes
//! ```
//!
//! Index fields use [`NONE_BYTE`] for "none". A segment is logically
//! empty when `front_item` is none or `back_item < front_item`.
//!
//! [`Segment`] and [`SegmentMut`] are thin typed views over one slot's
//! bytes; they hold no state of their own and are meant to be constructed
//! per access.

use crate::config::{BOOKKEEPING_SIZE, NONE_BYTE, PAYLOAD_SIZE, SLOT_SIZE};
use crate::pool::SlotIndex;

const BACK_SEGMENT: usize = 0;
const NEXT_SEGMENT: usize = 1;
const FRONT_ITEM: usize = 2;
const BACK_ITEM: usize = 3;
const PAYLOAD: usize = BOOKKEEPING_SIZE;

/// Shared view over one slot interpreted as a segment.
pub(crate) struct Segment<'a> {
    bytes: &'a [u8],
}

impl<'a> Segment<'a> {
    #[inline]
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len(), SLOT_SIZE);
        Self { bytes }
    }

    /// Index of the back segment, cached in the front segment.
    #[inline]
    pub(crate) fn back_segment(&self) -> Option<SlotIndex> {
        SlotIndex::from_byte(self.bytes[BACK_SEGMENT])
    }

    /// Index of the next segment toward the back.
    #[inline]
    pub(crate) fn next_segment(&self) -> Option<SlotIndex> {
        SlotIndex::from_byte(self.bytes[NEXT_SEGMENT])
    }

    /// Payload index of the next byte to read.
    #[inline]
    pub(crate) fn front_item(&self) -> Option<u8> {
        decode_item(self.bytes[FRONT_ITEM])
    }

    /// Payload index of the last byte written.
    #[inline]
    pub(crate) fn back_item(&self) -> Option<u8> {
        decode_item(self.bytes[BACK_ITEM])
    }

    /// Read the payload byte at the given index.
    #[inline]
    pub(crate) fn byte_at(&self, item: u8) -> u8 {
        debug_assert!((item as usize) < PAYLOAD_SIZE);
        self.bytes[PAYLOAD + item as usize]
    }

    /// A segment is empty when nothing has been written yet, or the back
    /// index has fallen behind the front index.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        let front = match self.front_item() {
            None => return true,
            Some(front) => front,
        };
        match self.back_item() {
            None => true,
            Some(back) => back < front,
        }
    }

    /// The last payload position has been written; appends need a new
    /// segment.
    #[inline]
    pub(crate) fn is_back_at_end(&self) -> bool {
        self.back_item() == Some(PAYLOAD_SIZE as u8 - 1)
    }

    /// The last payload position is about to be read; this segment is
    /// exhausted after the read.
    #[inline]
    pub(crate) fn is_front_at_end(&self) -> bool {
        self.front_item() == Some(PAYLOAD_SIZE as u8 - 1)
    }
}

/// Exclusive view over one slot interpreted as a segment.
pub(crate) struct SegmentMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> SegmentMut<'a> {
    #[inline]
    pub(crate) fn new(bytes: &'a mut [u8]) -> Self {
        debug_assert_eq!(bytes.len(), SLOT_SIZE);
        Self { bytes }
    }

    #[inline]
    pub(crate) fn set_back_segment(&mut self, index: Option<SlotIndex>) {
        self.bytes[BACK_SEGMENT] = SlotIndex::encode(index);
    }

    #[inline]
    pub(crate) fn set_next_segment(&mut self, index: Option<SlotIndex>) {
        self.bytes[NEXT_SEGMENT] = SlotIndex::encode(index);
    }

    #[inline]
    pub(crate) fn set_front_item(&mut self, item: Option<u8>) {
        self.bytes[FRONT_ITEM] = encode_item(item);
    }

    #[inline]
    pub(crate) fn set_back_item(&mut self, item: Option<u8>) {
        self.bytes[BACK_ITEM] = encode_item(item);
    }

    /// Advance the back index and return the new position.
    ///
    /// A back index of none advances to 0, so the first write into a
    /// fresh segment lands at payload position 0.
    #[inline]
    pub(crate) fn advance_back(&mut self) -> u8 {
        let next = match decode_item(self.bytes[BACK_ITEM]) {
            None => 0,
            Some(back) => back + 1,
        };
        debug_assert!((next as usize) < PAYLOAD_SIZE);
        self.bytes[BACK_ITEM] = next;
        next
    }

    /// Advance the front index past a consumed byte.
    ///
    /// Like [`advance_back`](Self::advance_back), none advances to 0.
    #[inline]
    pub(crate) fn advance_front(&mut self) {
        let next = match decode_item(self.bytes[FRONT_ITEM]) {
            None => 0,
            Some(front) => front + 1,
        };
        debug_assert!((next as usize) < PAYLOAD_SIZE);
        self.bytes[FRONT_ITEM] = next;
    }

    #[inline]
    pub(crate) fn write_byte(&mut self, item: u8, byte: u8) {
        debug_assert!((item as usize) < PAYLOAD_SIZE);
        self.bytes[PAYLOAD + item as usize] = byte;
    }

    #[inline]
    pub(crate) fn clear_payload(&mut self) {
        self.bytes[PAYLOAD..].fill(0);
    }
}

#[inline]
fn decode_item(byte: u8) -> Option<u8> {
    if byte == NONE_BYTE {
        None
    } else {
        debug_assert!((byte as usize) < PAYLOAD_SIZE, "corrupt item index byte");
        Some(byte)
    }
}

#[inline]
fn encode_item(item: Option<u8>) -> u8 {
    match item {
        None => NONE_BYTE,
        Some(item) => {
            debug_assert!((item as usize) < PAYLOAD_SIZE);
            item
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_slot() -> [u8; SLOT_SIZE] {
        let mut bytes = [0u8; SLOT_SIZE];
        // front_item and back_item start at none
        bytes[FRONT_ITEM] = NONE_BYTE;
        bytes[BACK_ITEM] = NONE_BYTE;
        bytes[NEXT_SEGMENT] = NONE_BYTE;
        bytes
    }

    #[test]
    fn test_fresh_segment_is_empty() {
        let slot = fresh_slot();
        let seg = Segment::new(&slot);
        assert!(seg.is_empty());
        assert!(!seg.is_back_at_end());
        assert!(!seg.is_front_at_end());
    }

    #[test]
    fn test_empty_when_back_behind_front() {
        // The second disjunct of the empty check: back_item < front_item
        let mut slot = fresh_slot();
        {
            let mut seg = SegmentMut::new(&mut slot);
            seg.set_front_item(Some(5));
            seg.set_back_item(Some(4));
        }
        assert!(Segment::new(&slot).is_empty());
    }

    #[test]
    fn test_nonempty_when_back_at_front() {
        let mut slot = fresh_slot();
        {
            let mut seg = SegmentMut::new(&mut slot);
            seg.set_front_item(Some(3));
            seg.set_back_item(Some(3));
        }
        assert!(!Segment::new(&slot).is_empty());
    }

    #[test]
    fn test_write_and_read_front_byte() {
        let mut slot = fresh_slot();
        {
            let mut seg = SegmentMut::new(&mut slot);
            seg.set_front_item(Some(0));
            seg.set_back_item(Some(0));
            seg.write_byte(0, 42);
        }
        let seg = Segment::new(&slot);
        assert_eq!(seg.byte_at(0), 42);
    }

    #[test]
    fn test_advance_back_from_none() {
        let mut slot = fresh_slot();
        let mut seg = SegmentMut::new(&mut slot);
        assert_eq!(seg.advance_back(), 0);
        assert_eq!(seg.advance_back(), 1);
    }

    #[test]
    fn test_end_predicates() {
        let mut slot = fresh_slot();
        {
            let mut seg = SegmentMut::new(&mut slot);
            seg.set_front_item(Some(PAYLOAD_SIZE as u8 - 1));
            seg.set_back_item(Some(PAYLOAD_SIZE as u8 - 1));
        }
        let seg = Segment::new(&slot);
        assert!(seg.is_front_at_end());
        assert!(seg.is_back_at_end());
        assert!(!seg.is_empty());
    }

    #[test]
    fn test_segment_links() {
        let mut slot = fresh_slot();
        let next = SlotIndex::new(9).unwrap();
        let back = SlotIndex::new(12).unwrap();
        {
            let mut seg = SegmentMut::new(&mut slot);
            seg.set_next_segment(Some(next));
            seg.set_back_segment(Some(back));
        }
        let seg = Segment::new(&slot);
        assert_eq!(seg.next_segment(), Some(next));
        assert_eq!(seg.back_segment(), Some(back));
    }
}
