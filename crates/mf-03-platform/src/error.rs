//! Error types for platform lifetime management

use shared_types::MediaError;
use thiserror::Error;

/// Errors from platform operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// `startup` was called with a version other than the supported ones.
    #[error("Bad startup version: {version:#x}")]
    BadStartupVersion { version: u32 },

    /// Platform services were requested while the platform is not running.
    #[error("Platform not started")]
    NotStarted,

    /// Configuration rejected by validation.
    #[error("Invalid platform configuration: {0}")]
    InvalidConfig(String),

    /// The worker runtime could not be built.
    #[error("Failed to start work queue: {0}")]
    WorkQueue(String),
}

impl From<PlatformError> for MediaError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::BadStartupVersion { version } => MediaError::BadStartupVersion { version },
            PlatformError::NotStarted => MediaError::NotStarted,
            PlatformError::InvalidConfig(msg) => MediaError::InvalidArgument(msg),
            PlatformError::WorkQueue(msg) => MediaError::Fail(msg),
        }
    }
}
