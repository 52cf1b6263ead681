//! Error types for queue operations.

use std::fmt;

/// Errors that can occur during queue operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The fragment pool is exhausted (all 64 slots in use).
    /// The failed operation mutated nothing; retry after freeing
    /// another queue.
    OutOfMemory,

    /// Dequeue was attempted on an empty or nonexistent queue.
    /// The handle is unchanged.
    EmptyQueue,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::EmptyQueue => write!(f, "queue empty"),
        }
    }
}

impl std::error::Error for QueueError {}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;
