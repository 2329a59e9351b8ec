//! Error types for the attribute store

use crate::domain::AttributeType;
use shared_types::{Guid, MediaError};
use thiserror::Error;

/// Errors that can occur in attribute store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("Attribute not found: {key}")]
    NotFound { key: Guid },

    #[error("Invalid attribute type")]
    InvalidType,

    #[error("Attribute {key} holds {found:?}, not {expected:?}")]
    TypeMismatch {
        key: Guid,
        expected: AttributeType,
        found: AttributeType,
    },

    #[error("Index out of range: {index} >= {count}")]
    InvalidIndex { index: usize, count: usize },

    #[error("Out of memory growing attribute storage")]
    OutOfMemory,

    /// A collection slot left empty by a sparse insert.
    #[error("Collection slot {index} is empty")]
    EmptySlot { index: usize },
}

impl From<AttributeError> for MediaError {
    fn from(err: AttributeError) -> Self {
        match err {
            AttributeError::NotFound { key } => MediaError::NotFound { key },
            AttributeError::InvalidType => MediaError::InvalidType,
            AttributeError::TypeMismatch { key, .. } => MediaError::TypeMismatch { key },
            AttributeError::InvalidIndex { index, count } => {
                MediaError::InvalidIndex { index, count }
            }
            AttributeError::OutOfMemory => MediaError::OutOfMemory,
            AttributeError::EmptySlot { index } => {
                MediaError::Unexpected(format!("collection slot {index} is empty"))
            }
        }
    }
}
