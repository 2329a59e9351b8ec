//! # Media Runtime
//!
//! Host library behind the `media-runtime` binary.
//!
//! - `source/` - demo media source composing an attribute store and an event queue
//! - `runtime/` - platform boot, playback and async event draining

pub mod runtime;
pub mod source;

pub use runtime::{MediaRuntime, RunSummary, RuntimeConfig};
pub use source::{keys, MediaSource, SourceError, SourceState};
