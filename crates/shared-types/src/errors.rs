//! # Error Types
//!
//! The error taxonomy shared by every component. Component crates define
//! their own narrower enums and convert into [`MediaError`].

use crate::guid::Guid;
use thiserror::Error;

/// Every failure a media-platform component can report.
///
/// None of these are fatal to the process; each is returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// No attribute is stored under the key.
    #[error("Attribute not found: {key}")]
    NotFound { key: Guid },

    /// The value's tag cannot be stored as an attribute.
    #[error("Invalid attribute type")]
    InvalidType,

    /// The stored value has a different tag than the one requested.
    #[error("Attribute type mismatch for {key}")]
    TypeMismatch { key: Guid },

    /// Index past the end of the store.
    #[error("Index out of range: {index} >= {count}")]
    InvalidIndex { index: usize, count: usize },

    /// Allocation failed while growing storage.
    #[error("Out of memory")]
    OutOfMemory,

    /// The object has been shut down.
    #[error("Object is shut down")]
    ShutDown,

    /// Another callback is already waiting for the next event.
    #[error("Multiple subscribers")]
    MultipleSubscribers,

    /// The registered callback was re-registered with a different state.
    #[error("Multiple begin calls with mismatched state")]
    MultipleBeginMismatch,

    /// A non-blocking poll found the queue empty.
    #[error("No events available")]
    NoEventsAvailable,

    /// Unspecified failure.
    #[error("Operation failed: {0}")]
    Fail(String),

    /// Internal state did not hold what the operation expected.
    #[error("Unexpected: {0}")]
    Unexpected(String),

    /// An argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Platform startup requested an unsupported version.
    #[error("Bad startup version: {version:#x}")]
    BadStartupVersion { version: u32 },

    /// Platform services were used before startup.
    #[error("Platform not started")]
    NotStarted,
}

impl MediaError {
    /// Whether the condition is part of normal operation rather than a
    /// caller mistake.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            MediaError::NotFound { .. } | MediaError::NoEventsAvailable
        )
    }
}
