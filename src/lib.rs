//! Byte queues multiplexed over a fixed 2048-byte fragment pool.
//!
//! This crate provides up to 64 independent FIFO byte queues that share a
//! single fixed-size arena, with O(1) create/enqueue/dequeue and no heap
//! allocation for queue data. It targets workloads where allocation must
//! be bounded and fragmentation-free.
//!
//! # Architecture
//!
//! ```text
//! +---------------------------------------------+
//! |                 ByteQueues                  |
//! |                                             |
//! |  +---------------------------------------+  |
//! |  | FragmentPool (2048-byte arena)        |  |
//! |  | +------+------+------+-----+------+   |  |
//! |  | | slot | slot | slot | ... | slot |   |  |
//! |  | +------+------+------+-----+------+   |  |
//! |  |   64 slots x 32 bytes                 |  |
//! |  |   free list threaded through slots    |  |
//! |  +---------------------------------------+  |
//! +---------------------------------------------+
//!
//! queue = chain of in-use slots ("segments"):
//!
//!   front                          back
//!   +---------+    +---------+    +---------+
//!   | segment | -> | segment | -> | segment |
//!   +---------+    +---------+    +---------+
//!        |                             ^
//!        +--- cached back index -------+
//! ```
//!
//! Each in-use slot spends 4 bytes on bookkeeping (back-segment index,
//! next-segment index, front item index, back item index) and 28 bytes on
//! payload. Segments reference each other by slot index, never by
//! pointer, so a link costs one arena byte. The front segment caches the
//! back segment's index, which is what makes append O(1) without walking
//! the chain.
//!
//! # Handles
//!
//! A queue is identified by a [`QueueHandle`]: the index of its front
//! segment, or empty. Operations that can free the front segment return
//! an updated handle and the old one must not be reused. A fully drained
//! queue holds no memory at all; enqueue onto an empty handle lazily
//! recreates it.
//!
//! # Example
//!
//! ```
//! use fragq::{ByteQueues, QueueHandle};
//!
//! let mut queues = ByteQueues::new();
//! let q = queues.create_queue().unwrap();
//! let q = queues.enqueue_byte(q, 1).unwrap();
//! let q = queues.enqueue_byte(q, 2).unwrap();
//! let (byte, q) = queues.dequeue_byte(q).unwrap();
//! assert_eq!(byte, 1);
//! let q = queues.destroy_queue(q);
//! assert_eq!(q, QueueHandle::EMPTY);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
mod dump;
mod error;
mod pool;
mod queue;
mod reporter;
mod segment;

pub use dump::dump_arena;
pub use error::{QueueError, QueueResult};
pub use pool::{FragmentPool, SlotIndex};
pub use queue::{ByteQueues, QueueHandle};
pub use reporter::{NullReporter, Reporter, TracingReporter};
