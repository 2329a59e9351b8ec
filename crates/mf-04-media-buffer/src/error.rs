//! Error types for media buffers

use shared_types::MediaError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The requested valid length does not fit in the buffer.
    #[error("Length {length} exceeds buffer capacity {max}")]
    LengthExceedsMax { length: usize, max: usize },

    /// The backing memory could not be allocated.
    #[error("Out of memory allocating {size} byte buffer")]
    OutOfMemory { size: usize },
}

impl From<BufferError> for MediaError {
    fn from(err: BufferError) -> Self {
        let message = err.to_string();
        match err {
            BufferError::LengthExceedsMax { .. } => MediaError::InvalidArgument(message),
            BufferError::OutOfMemory { .. } => MediaError::OutOfMemory,
        }
    }
}
