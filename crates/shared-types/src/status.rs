//! # Status Codes
//!
//! Events carry the outcome of the operation that produced them as a 32-bit
//! status code. Negative values are failures.

use crate::errors::MediaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-bit result code. Non-negative means success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatusCode(i32);

impl StatusCode {
    /// Plain success.
    pub const OK: StatusCode = StatusCode(0);
    /// Success, but a begin call was repeated with the same identity.
    pub const MULTIPLE_BEGIN: StatusCode = StatusCode(0x000D_477A);

    pub const FAIL: StatusCode = StatusCode::from_bits(0x8000_4005);
    pub const UNEXPECTED: StatusCode = StatusCode::from_bits(0x8000_FFFF);
    pub const OUT_OF_MEMORY: StatusCode = StatusCode::from_bits(0x8007_000E);
    pub const INVALID_ARGUMENT: StatusCode = StatusCode::from_bits(0x8007_0057);
    pub const NOT_FOUND: StatusCode = StatusCode::from_bits(0xC00D_36E6);
    pub const INVALID_TYPE: StatusCode = StatusCode::from_bits(0xC00D_36E7);
    pub const TYPE_MISMATCH: StatusCode = StatusCode::from_bits(0xC00D_36E8);
    pub const INVALID_INDEX: StatusCode = StatusCode::from_bits(0xC00D_36E9);
    pub const SHUT_DOWN: StatusCode = StatusCode::from_bits(0xC00D_3E85);
    pub const MULTIPLE_SUBSCRIBERS: StatusCode = StatusCode::from_bits(0xC00D_3E86);
    pub const MULTIPLE_BEGIN_MISMATCH: StatusCode = StatusCode::from_bits(0xC00D_3E87);
    pub const NO_EVENTS_AVAILABLE: StatusCode = StatusCode::from_bits(0xC00D_3E88);
    pub const BAD_STARTUP_VERSION: StatusCode = StatusCode::from_bits(0xC00D_3E89);
    pub const NOT_STARTED: StatusCode = StatusCode::from_bits(0xC00D_3E8A);

    /// Build a code from its signed value.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Build a code from its unsigned bit pattern.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits as i32)
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 0
    }

    #[must_use]
    pub const fn is_failure(self) -> bool {
        self.0 < 0
    }
}

impl From<&MediaError> for StatusCode {
    fn from(err: &MediaError) -> Self {
        match err {
            MediaError::NotFound { .. } => StatusCode::NOT_FOUND,
            MediaError::InvalidType => StatusCode::INVALID_TYPE,
            MediaError::TypeMismatch { .. } => StatusCode::TYPE_MISMATCH,
            MediaError::InvalidIndex { .. } => StatusCode::INVALID_INDEX,
            MediaError::OutOfMemory => StatusCode::OUT_OF_MEMORY,
            MediaError::ShutDown => StatusCode::SHUT_DOWN,
            MediaError::MultipleSubscribers => StatusCode::MULTIPLE_SUBSCRIBERS,
            MediaError::MultipleBeginMismatch => StatusCode::MULTIPLE_BEGIN_MISMATCH,
            MediaError::NoEventsAvailable => StatusCode::NO_EVENTS_AVAILABLE,
            MediaError::Fail(_) => StatusCode::FAIL,
            MediaError::Unexpected(_) => StatusCode::UNEXPECTED,
            MediaError::InvalidArgument(_) => StatusCode::INVALID_ARGUMENT,
            MediaError::BadStartupVersion { .. } => StatusCode::BAD_STARTUP_VERSION,
            MediaError::NotStarted => StatusCode::NOT_STARTED,
        }
    }
}

impl<T> From<&Result<T, MediaError>> for StatusCode {
    fn from(result: &Result<T, MediaError>) -> Self {
        match result {
            Ok(_) => StatusCode::OK,
            Err(err) => StatusCode::from(err),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0 as u32)
    }
}
