//! # Event Queue
//!
//! FIFO of shared events with two mutually exclusive consumption modes:
//!
//! - **Blocking pull**: `pop_blocking` parks on a condition variable until an
//!   event arrives or the queue shuts down.
//! - **Begin/end async**: `begin_async` registers a single subscriber. When
//!   the queue holds events the subscriber's token is handed to the work
//!   scheduler once; the callback then calls `end_async` to take the head.
//!
//! ## Notification rule
//!
//! A registered subscriber is notified at most once per registration. The
//! `notified` flag in the slot is set when the token is handed to the
//! scheduler and only cleared together with the slot by `end_async` or
//! `shutdown`. A burst of enqueues therefore produces one notification, and
//! `end_async` returns whatever is at the head at that moment.
//!
//! ## Locking
//!
//! One `parking_lot` mutex guards the events, the subscriber slot and the
//! shutdown flag. The scheduler is always called after the guard is dropped,
//! so a scheduler may run callbacks on the calling thread.

use crate::adapters::AsyncBridge;
use crate::domain::{AsyncCallback, AsyncResult, BeginStatus, EventType, MediaEvent};
use crate::error::QueueError;
use crate::metrics::QueueMetrics;
use crate::ports::WorkScheduler;
use mf_01_attributes::PropValue;
use parking_lot::{Condvar, Mutex};
use shared_types::{Guid, ObjectHandle, StatusCode};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace, warn};

struct Subscriber {
    result: AsyncResult,
    /// Token already handed to the scheduler for this registration.
    notified: bool,
}

#[derive(Default)]
struct QueueState {
    events: VecDeque<Arc<MediaEvent>>,
    subscriber: Option<Subscriber>,
    is_shut_down: bool,
}

impl QueueState {
    /// Mark the subscriber notified and return its token, if a notification
    /// is due.
    fn take_notification(&mut self) -> Option<AsyncResult> {
        if self.events.is_empty() {
            return None;
        }
        match self.subscriber.as_mut() {
            Some(subscriber) if !subscriber.notified => {
                subscriber.notified = true;
                Some(subscriber.result.clone())
            }
            _ => None,
        }
    }
}

/// Single-subscriber media event queue.
pub struct EventQueue {
    state: Mutex<QueueState>,
    update: Condvar,
    scheduler: Arc<dyn WorkScheduler>,
    metrics: QueueMetrics,
    /// Subscriber shared by `next_event` callers, created on first use.
    async_bridge: OnceLock<Arc<AsyncBridge>>,
}

impl EventQueue {
    /// Create an empty queue that delivers notifications through `scheduler`.
    #[must_use]
    pub fn new(scheduler: Arc<dyn WorkScheduler>) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            update: Condvar::new(),
            scheduler,
            metrics: QueueMetrics::new(),
            async_bridge: OnceLock::new(),
        }
    }

    /// Append `event` to the tail.
    ///
    /// Wakes every blocked `pop_blocking` caller and, if a subscriber is
    /// registered and has not been notified yet, schedules its notification
    /// before returning.
    pub fn enqueue(&self, event: Arc<MediaEvent>) -> Result<(), QueueError> {
        let notification = {
            let mut state = self.state.lock();
            if state.is_shut_down {
                return Err(QueueError::ShutDown);
            }
            trace!(event_type = ?event.event_type(), depth = state.events.len() + 1, "Event enqueued");
            state.events.push_back(event);
            self.metrics.record_enqueued();
            state.take_notification()
        };

        self.update.notify_all();
        if let Some(result) = notification {
            self.dispatch(result);
        }
        Ok(())
    }

    /// Create an event and enqueue it.
    pub fn queue_event(
        &self,
        event_type: EventType,
        extended_type: Guid,
        status: StatusCode,
        value: impl Into<PropValue>,
    ) -> Result<(), QueueError> {
        let event = MediaEvent::new(event_type, extended_type, status, value);
        self.enqueue(event.into_shared())
    }

    /// Create an event whose value is an object handle and enqueue it.
    pub fn queue_event_with_object(
        &self,
        event_type: EventType,
        extended_type: Guid,
        status: StatusCode,
        object: ObjectHandle,
    ) -> Result<(), QueueError> {
        self.queue_event(event_type, extended_type, status, PropValue::Object(object))
    }

    /// Take the head event.
    ///
    /// With `no_wait` an empty queue fails with `NoEventsAvailable`.
    /// Otherwise the caller blocks until an event arrives or the queue is
    /// shut down. Fails with `MultipleSubscribers` while an async subscriber
    /// is registered.
    pub fn pop_blocking(&self, no_wait: bool) -> Result<Arc<MediaEvent>, QueueError> {
        let mut state = self.state.lock();
        if state.is_shut_down {
            return Err(QueueError::ShutDown);
        }
        if state.subscriber.is_some() {
            return Err(QueueError::MultipleSubscribers);
        }
        if no_wait && state.events.is_empty() {
            return Err(QueueError::NoEventsAvailable);
        }

        while state.events.is_empty() && !state.is_shut_down {
            self.update.wait(&mut state);
        }
        if state.is_shut_down {
            return Err(QueueError::ShutDown);
        }

        let event = state.events.pop_front().ok_or(QueueError::Fail)?;
        self.metrics.record_dequeued();
        Ok(event)
    }

    /// Register `callback` as the queue's subscriber.
    ///
    /// Re-registering the pending callback with the same state is
    /// informational and changes nothing. A fresh registration over a
    /// non-empty queue schedules a notification before returning.
    pub fn begin_async(
        &self,
        callback: Arc<dyn AsyncCallback>,
        state: Option<ObjectHandle>,
    ) -> Result<BeginStatus, QueueError> {
        let notification = {
            let mut guard = self.state.lock();
            if guard.is_shut_down {
                return Err(QueueError::ShutDown);
            }

            if let Some(subscriber) = guard.subscriber.as_ref() {
                if !subscriber.result.has_callback(&callback) {
                    return Err(QueueError::MultipleSubscribers);
                }
                if !subscriber.result.has_state(state.as_ref()) {
                    warn!("begin_async repeated with a different state");
                    return Err(QueueError::MultipleBeginMismatch);
                }
                return Ok(BeginStatus::AlreadyRegistered);
            }

            guard.subscriber = Some(Subscriber {
                result: AsyncResult::new(callback, state),
                notified: false,
            });
            debug!(pending = guard.events.len(), "Async subscriber registered");
            guard.take_notification()
        };

        if let Some(result) = notification {
            self.dispatch(result);
        }
        Ok(BeginStatus::Registered)
    }

    /// Complete the pending request identified by `result` and take the
    /// head event.
    ///
    /// The subscriber slot is cleared even when the queue turns out to be
    /// empty, in which case the call fails with `Fail`.
    pub fn end_async(&self, result: &AsyncResult) -> Result<Arc<MediaEvent>, QueueError> {
        let mut state = self.state.lock();
        if state.is_shut_down {
            return Err(QueueError::ShutDown);
        }

        match state.subscriber.as_ref() {
            Some(subscriber) if subscriber.result.ptr_eq(result) => {}
            Some(_) => {
                return Err(QueueError::InvalidArgument(
                    "token does not match the pending request".to_string(),
                ))
            }
            None => {
                return Err(QueueError::InvalidArgument(
                    "no pending request".to_string(),
                ))
            }
        }
        state.subscriber = None;

        match state.events.pop_front() {
            Some(event) => {
                self.metrics.record_dequeued();
                Ok(event)
            }
            None => {
                warn!("end_async found no event at the queue head");
                Err(QueueError::Fail)
            }
        }
    }

    /// Permanently close the queue.
    ///
    /// Releases every queued event, drops the pending subscriber without
    /// invoking it and wakes all blocked callers. Later calls do nothing.
    pub fn shutdown(&self) {
        let (drained, subscriber) = {
            let mut state = self.state.lock();
            if state.is_shut_down {
                return;
            }
            state.is_shut_down = true;
            (
                std::mem::take(&mut state.events),
                state.subscriber.take(),
            )
        };

        self.update.notify_all();
        if let Some(bridge) = self.async_bridge.get() {
            bridge.close();
        }
        self.metrics.record_discarded(drained.len());
        debug!(
            discarded = drained.len(),
            had_subscriber = subscriber.is_some(),
            "Event queue shut down"
        );
        drop(subscriber);
        drop(drained);
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().events.is_empty()
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.state.lock().is_shut_down
    }

    /// Whether an async subscriber is registered.
    #[must_use]
    pub fn has_subscriber(&self) -> bool {
        self.state.lock().subscriber.is_some()
    }

    pub fn metrics(&self) -> &QueueMetrics {
        &self.metrics
    }

    pub(crate) fn async_bridge(&self) -> &Arc<AsyncBridge> {
        self.async_bridge.get_or_init(Arc::default)
    }

    /// Hand a notification to the scheduler. Called without the lock held.
    fn dispatch(&self, result: AsyncResult) {
        match self.scheduler.schedule(result.clone()) {
            Ok(()) => self.metrics.record_notification(),
            Err(err) => {
                self.metrics.record_scheduling_failure();
                warn!(error = %err, "Failed to schedule event notification");
                // Allow the next enqueue to retry.
                let mut state = self.state.lock();
                if let Some(subscriber) = state.subscriber.as_mut() {
                    if subscriber.result.ptr_eq(&result) {
                        subscriber.notified = false;
                    }
                }
            }
        }
    }
}

impl Drop for EventQueue {
    fn drop(&mut self) {
        // A parked token points back at the bridge.
        if let Some(bridge) = self.async_bridge.get() {
            bridge.close();
        }
    }
}

impl fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("EventQueue")
            .field("len", &state.events.len())
            .field("has_subscriber", &state.subscriber.is_some())
            .field("is_shut_down", &state.is_shut_down)
            .finish_non_exhaustive()
    }
}
