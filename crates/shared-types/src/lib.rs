//! # Shared Types Crate
//!
//! Types shared by every media-platform object in the workspace.
//!
//! ## Contents
//!
//! - [`Guid`]: 128-bit identifier used as attribute key and event extended type
//! - [`ObjectHandle`]: reference-counted handle to an external object
//! - [`StatusCode`]: result code carried by events
//! - [`MediaError`]: workspace-wide error taxonomy
//!
//! Per-crate error enums (`AttributeError`, `QueueError`, ...) convert into
//! [`MediaError`] so a caller juggling several components can use one type.

pub mod errors;
pub mod guid;
pub mod handle;
pub mod status;

pub use errors::MediaError;
pub use guid::Guid;
pub use handle::ObjectHandle;
pub use status::StatusCode;
