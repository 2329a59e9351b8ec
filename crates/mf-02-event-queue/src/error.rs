//! Error types for the event queue

use shared_types::MediaError;
use thiserror::Error;

/// Errors from event queue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue was shut down. Every later call fails the same way.
    #[error("Event queue shut down")]
    ShutDown,

    /// Another consumer is registered.
    #[error("Multiple subscribers")]
    MultipleSubscribers,

    /// The registered callback was re-registered with a different state.
    #[error("Multiple begin calls with mismatched state")]
    MultipleBeginMismatch,

    /// Non-blocking poll on an empty queue.
    #[error("No events available")]
    NoEventsAvailable,

    /// A notification was consumed but the queue head was empty.
    #[error("No event at queue head")]
    Fail,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<QueueError> for MediaError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::ShutDown => MediaError::ShutDown,
            QueueError::MultipleSubscribers => MediaError::MultipleSubscribers,
            QueueError::MultipleBeginMismatch => MediaError::MultipleBeginMismatch,
            QueueError::NoEventsAvailable => MediaError::NoEventsAvailable,
            QueueError::Fail => MediaError::Fail("no event at queue head".to_string()),
            QueueError::InvalidArgument(msg) => MediaError::InvalidArgument(msg),
        }
    }
}
