//! # Media Event Queue
//!
//! A FIFO of shared [`MediaEvent`]s consumed by exactly one consumer at a
//! time, either by blocking pull or through the begin/end async protocol.
//!
//! ## Architecture
//!
//! ```text
//! producers ──enqueue──▶ EventQueue ──pop_blocking──▶ synchronous consumer
//!                            │
//!                            └─ notification ─▶ WorkScheduler ─▶ AsyncCallback
//!                                                                   │
//!                                              end_async ◀──────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use mf_02_event_queue::{EventQueue, EventType, InlineScheduler, MediaEvent};
//! use std::sync::Arc;
//!
//! let queue = EventQueue::new(Arc::new(InlineScheduler));
//! queue.enqueue(MediaEvent::of_type(EventType::SourceStarted).into_shared()).unwrap();
//!
//! let event = queue.pop_blocking(true).unwrap();
//! assert_eq!(event.event_type(), EventType::SourceStarted);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;

pub use adapters::{next_event, DeferredScheduler, InlineScheduler, ThreadScheduler};
pub use domain::{AsyncCallback, AsyncResult, BeginStatus, EventQueue, EventType, MediaEvent};
pub use error::QueueError;
pub use metrics::{QueueMetrics, QueueMetricsSnapshot};
pub use ports::{EventGenerator, SchedulerError, WorkScheduler};
