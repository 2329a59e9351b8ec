//! Adapters Layer
//!
//! - `ThreadScheduler`, `InlineScheduler`, `DeferredScheduler`: work
//!   scheduler implementations
//! - `next_event`: async bridge over the begin/end protocol, backed by one
//!   `AsyncBridge` subscriber per queue

pub mod async_receiver;
pub mod thread_scheduler;

pub(crate) use async_receiver::AsyncBridge;
pub use async_receiver::next_event;
pub use thread_scheduler::{DeferredScheduler, InlineScheduler, ThreadScheduler};
