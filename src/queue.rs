//! Queue operations over the fragment pool.
//!
//! A queue is a chain of segments linked front to back through each
//! segment's next index. The handle refers only to the front segment; the
//! front segment caches the index of the back segment, so append never
//! walks the chain. All four operations are O(1) except destroy, which is
//! bounded by the pool size.
//!
//! Handles are values, not references: any operation that can deallocate
//! the front segment returns an updated handle, and the pre-call handle
//! must be treated as consumed. Holding on to a stale handle after a
//! dequeue or destroy is the caller's bug; the pool may have reissued the
//! slot to another queue.

use crate::error::{QueueError, QueueResult};
use crate::pool::{FragmentPool, SlotIndex};
use crate::reporter::{Reporter, TracingReporter};
use crate::segment::{Segment, SegmentMut};

/// Handle to one queue: the index of its front segment, or empty.
///
/// An empty handle means the queue holds no bytes and no memory. Queues
/// release their last segment the instant the last byte is dequeued, so
/// "empty" and "holding memory" never coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueHandle(Option<SlotIndex>);

impl QueueHandle {
    /// A handle to no queue.
    pub const EMPTY: QueueHandle = QueueHandle(None);

    /// Whether this handle refers to no backing storage.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Index of the front segment, if any.
    #[inline]
    pub fn front(&self) -> Option<SlotIndex> {
        self.0
    }
}

/// Up to 64 byte queues multiplexed over one [`FragmentPool`].
///
/// Owns the pool and a fault [`Reporter`]. Single-threaded by design: all
/// operations take `&mut self` and complete synchronously.
pub struct ByteQueues {
    pool: FragmentPool,
    reporter: Box<dyn Reporter>,
}

impl ByteQueues {
    /// Create a fresh pool with every slot free, reporting faults through
    /// [`TracingReporter`].
    pub fn new() -> Self {
        Self::with_reporter(Box::new(TracingReporter))
    }

    /// Create a fresh pool with a caller-provided fault reporter.
    pub fn with_reporter(reporter: Box<dyn Reporter>) -> Self {
        Self {
            pool: FragmentPool::new(),
            reporter,
        }
    }

    /// Shared access to the underlying pool, for diagnostics.
    #[inline]
    pub fn pool(&self) -> &FragmentPool {
        &self.pool
    }

    /// Create a new, empty queue.
    ///
    /// Allocates one segment and returns a handle to it. Fails with
    /// [`QueueError::OutOfMemory`] when the pool is exhausted; nothing is
    /// mutated on failure.
    pub fn create_queue(&mut self) -> QueueResult<QueueHandle> {
        let front = self.allocate_front()?;
        Ok(QueueHandle(Some(front)))
    }

    /// Append a byte at the back of the queue.
    ///
    /// An empty handle lazily creates the queue first. On
    /// [`QueueError::OutOfMemory`] the operation is a no-op: the byte is
    /// dropped and the queue (and handle) are exactly as before the call.
    #[must_use = "the returned handle replaces the one passed in"]
    pub fn enqueue_byte(&mut self, handle: QueueHandle, byte: u8) -> QueueResult<QueueHandle> {
        let front = match handle.0 {
            Some(front) => front,
            None => self.allocate_front()?,
        };
        let handle = QueueHandle(Some(front));

        // O(1) back lookup through the index cached in the front segment;
        // the chain is never walked here.
        let front_seg = Segment::new(self.pool.slot(front));
        debug_assert!(front_seg.back_segment().is_some(), "front missing back index");
        let back = front_seg.back_segment().unwrap_or(front);

        if Segment::new(self.pool.slot(back)).is_back_at_end() {
            // Back segment is full: grow the chain by one segment.
            let new_back = match self.pool.allocate() {
                Ok(index) => index,
                Err(error) => {
                    self.reporter.on_error(error);
                    return Err(error);
                }
            };
            SegmentMut::new(self.pool.slot_mut(front)).set_back_segment(Some(new_back));
            SegmentMut::new(self.pool.slot_mut(back)).set_next_segment(Some(new_back));

            let mut seg = SegmentMut::new(self.pool.slot_mut(new_back));
            seg.set_back_segment(None);
            seg.set_next_segment(None);
            seg.set_front_item(None);
            seg.set_back_item(Some(0));
            seg.clear_payload();
            seg.write_byte(0, byte);
            return Ok(handle);
        }

        if Segment::new(self.pool.slot(front)).front_item().is_none() {
            // Very first byte into a freshly created queue (front == back).
            let mut seg = SegmentMut::new(self.pool.slot_mut(front));
            seg.set_front_item(Some(0));
            seg.set_back_item(Some(0));
            seg.write_byte(0, byte);
            return Ok(handle);
        }

        let mut seg = SegmentMut::new(self.pool.slot_mut(back));
        let item = seg.advance_back();
        seg.write_byte(item, byte);
        Ok(handle)
    }

    /// Remove and return the byte at the front of the queue.
    ///
    /// Fails with [`QueueError::EmptyQueue`] on an empty handle or a
    /// logically empty front segment, mutating nothing. Memory is
    /// reclaimed eagerly: the front segment is freed the moment its last
    /// byte leaves, and a fully drained queue returns an empty handle.
    #[must_use = "the returned handle replaces the one passed in"]
    pub fn dequeue_byte(&mut self, handle: QueueHandle) -> QueueResult<(u8, QueueHandle)> {
        let front = match handle.0 {
            Some(front) => front,
            None => return Err(self.report(QueueError::EmptyQueue)),
        };

        let seg = Segment::new(self.pool.slot(front));
        let item = match seg.front_item() {
            Some(item) if !seg.is_empty() => item,
            _ => return Err(self.report(QueueError::EmptyQueue)),
        };
        let byte = seg.byte_at(item);
        let front_at_end = seg.is_front_at_end();
        let next = seg.next_segment();
        let back = seg.back_segment();

        if front_at_end {
            return match next {
                // Last segment just drained entirely.
                None => {
                    self.pool.deallocate(front);
                    Ok((byte, QueueHandle::EMPTY))
                }
                // Promote the next segment to front, carrying the cached
                // back index across so append stays O(1).
                Some(next) => {
                    let mut seg = SegmentMut::new(self.pool.slot_mut(next));
                    seg.set_back_segment(back);
                    seg.set_front_item(Some(0));
                    self.pool.deallocate(front);
                    Ok((byte, QueueHandle(Some(next))))
                }
            };
        }

        SegmentMut::new(self.pool.slot_mut(front)).advance_front();
        if Segment::new(self.pool.slot(front)).is_empty() {
            // Single-segment queue whose last byte was just consumed.
            self.pool.deallocate(front);
            return Ok((byte, QueueHandle::EMPTY));
        }
        Ok((byte, handle))
    }

    /// Destroy a queue, returning every segment to the pool.
    ///
    /// Total over all handle states: destroying an empty handle is a
    /// no-op. Always returns [`QueueHandle::EMPTY`].
    #[must_use = "the returned handle replaces the one passed in"]
    pub fn destroy_queue(&mut self, handle: QueueHandle) -> QueueHandle {
        let mut cursor = handle.0;
        while let Some(index) = cursor {
            cursor = Segment::new(self.pool.slot(index)).next_segment();
            self.pool.deallocate(index);
        }
        QueueHandle::EMPTY
    }

    /// Allocate and initialize a front segment: its own back, no next,
    /// nothing written.
    fn allocate_front(&mut self) -> QueueResult<SlotIndex> {
        let index = match self.pool.allocate() {
            Ok(index) => index,
            Err(error) => {
                self.reporter.on_error(error);
                return Err(error);
            }
        };
        let mut seg = SegmentMut::new(self.pool.slot_mut(index));
        seg.set_back_segment(Some(index));
        seg.set_next_segment(None);
        seg.set_front_item(None);
        seg.set_back_item(None);
        seg.clear_payload();
        Ok(index)
    }

    fn report(&mut self, error: QueueError) -> QueueError {
        self.reporter.on_error(error);
        error
    }
}

impl Default for ByteQueues {
    fn default() -> Self {
        Self::new()
    }
}
