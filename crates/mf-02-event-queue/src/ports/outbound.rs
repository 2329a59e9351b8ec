//! Outbound Ports (Driven Ports)
//!
//! The queue never runs a subscriber's callback itself. It hands the pending
//! [`AsyncResult`] to a work scheduler, which invokes the callback exactly
//! once on some worker thread at some later time.

use crate::domain::AsyncResult;
use thiserror::Error;

/// Errors from work schedulers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The scheduler no longer accepts work.
    #[error("Work queue shut down")]
    ShutDown,

    /// The work item could not be dispatched.
    #[error("Failed to dispatch work item: {0}")]
    Dispatch(String),
}

/// Work scheduler (Driven Port)
///
/// Implementations must not invoke the callback more than once per call and
/// may invoke it on the calling thread. The queue never holds its lock while
/// calling `schedule`.
pub trait WorkScheduler: Send + Sync {
    fn schedule(&self, result: AsyncResult) -> Result<(), SchedulerError>;
}
