//! Domain Layer - events, completion tokens and the queue
//!
//! RULES:
//! - No I/O operations
//! - One mutex per queue; callbacks are never invoked while it is held

pub mod async_result;
pub mod event;
pub mod queue;

pub use async_result::{AsyncCallback, AsyncResult, BeginStatus};
pub use event::{EventType, MediaEvent};
pub use queue::EventQueue;
