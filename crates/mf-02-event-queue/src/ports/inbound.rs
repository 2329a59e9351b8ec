//! Inbound Ports (Driving Ports)
//!
//! Media sources and sessions are event generators: they own an event queue
//! and expose its consumer side to callers. Implementing [`EventGenerator`]
//! provides that surface by delegation.

use crate::domain::{AsyncCallback, AsyncResult, BeginStatus, EventQueue, EventType, MediaEvent};
use crate::error::QueueError;
use mf_01_attributes::PropValue;
use shared_types::{Guid, ObjectHandle, StatusCode};
use std::sync::Arc;

/// An object that owns an [`EventQueue`].
pub trait EventGenerator {
    /// The embedded queue.
    fn event_queue(&self) -> &EventQueue;

    /// Take the next event, blocking unless `no_wait` is set.
    fn get_event(&self, no_wait: bool) -> Result<Arc<MediaEvent>, QueueError> {
        self.event_queue().pop_blocking(no_wait)
    }

    fn begin_get_event(
        &self,
        callback: Arc<dyn AsyncCallback>,
        state: Option<ObjectHandle>,
    ) -> Result<BeginStatus, QueueError> {
        self.event_queue().begin_async(callback, state)
    }

    fn end_get_event(&self, result: &AsyncResult) -> Result<Arc<MediaEvent>, QueueError> {
        self.event_queue().end_async(result)
    }

    fn queue_event(
        &self,
        event_type: EventType,
        extended_type: Guid,
        status: StatusCode,
        value: PropValue,
    ) -> Result<(), QueueError> {
        self.event_queue()
            .queue_event(event_type, extended_type, status, value)
    }
}

impl EventGenerator for EventQueue {
    fn event_queue(&self) -> &EventQueue {
        self
    }
}
