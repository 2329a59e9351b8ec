//! Ports Layer - trait definitions
//!
//! - `EventGenerator`: driving port for objects that expose an event queue
//! - `WorkScheduler`: driven port the queue uses to deliver notifications

pub mod inbound;
pub mod outbound;

pub use inbound::EventGenerator;
pub use outbound::{SchedulerError, WorkScheduler};
