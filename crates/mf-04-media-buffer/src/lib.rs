//! # MF-04 Media Buffer
//!
//! Fixed-capacity byte buffers for sample payloads. A buffer has a maximum
//! length set at creation and a current length that marks the valid prefix.
//!
//! ```
//! use mf_04_media_buffer::MemoryBuffer;
//!
//! let buffer = MemoryBuffer::new(4).unwrap();
//! buffer.lock()[..2].copy_from_slice(&[7, 8]);
//! buffer.set_current_length(2).unwrap();
//! assert_eq!(buffer.to_vec(), vec![7, 8]);
//! assert!(buffer.set_current_length(5).is_err());
//! ```

pub mod error;
pub mod memory;

pub use error::BufferError;
pub use memory::{BufferLock, MemoryBuffer};
