//! Fault reporting callback.
//!
//! Queue operations signal [`QueueError::OutOfMemory`] and
//! [`QueueError::EmptyQueue`] both through their return value and through
//! a [`Reporter`]. The reporter is purely observational: it never affects
//! control flow, it just gives embedders a hook for logging or counting
//! faults.

use crate::error::QueueError;

/// Observer for queue operation faults.
pub trait Reporter {
    /// Called once per failed operation with the error that occurred.
    fn on_error(&mut self, error: QueueError);
}

/// Default reporter that emits a `tracing` warning per fault.
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn on_error(&mut self, error: QueueError) {
        match error {
            QueueError::OutOfMemory => tracing::warn!("out of memory, no slot allocated"),
            QueueError::EmptyQueue => tracing::warn!("queue empty, no byte dequeued"),
        }
    }
}

/// Reporter that discards all faults.
///
/// Useful when the caller inspects the returned `Result` and wants no log
/// output.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_error(&mut self, _error: QueueError) {}
}
