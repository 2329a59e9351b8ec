//! Simple work schedulers
//!
//! `ThreadScheduler` runs each callback on a fresh named thread.
//! `InlineScheduler` runs it on the caller before `schedule` returns.
//! `DeferredScheduler` holds work until `run_pending` is called, which makes
//! delivery order observable in tests and single-threaded hosts.

use crate::domain::AsyncResult;
use crate::ports::{SchedulerError, WorkScheduler};
use parking_lot::Mutex;
use std::thread;
use tracing::trace;

/// Default worker thread name.
pub const DEFAULT_THREAD_NAME: &str = "mf-callback";

/// Spawns one thread per work item.
#[derive(Debug, Clone)]
pub struct ThreadScheduler {
    thread_name: String,
}

impl ThreadScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }

    /// Builder-style method to set the worker thread name
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkScheduler for ThreadScheduler {
    fn schedule(&self, result: AsyncResult) -> Result<(), SchedulerError> {
        thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || result.invoke())
            .map(|_| ())
            .map_err(|e| SchedulerError::Dispatch(e.to_string()))
    }
}

/// Runs callbacks on the scheduling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScheduler;

impl WorkScheduler for InlineScheduler {
    fn schedule(&self, result: AsyncResult) -> Result<(), SchedulerError> {
        result.invoke();
        Ok(())
    }
}

#[derive(Debug, Default)]
struct DeferredState {
    pending: Vec<AsyncResult>,
    closed: bool,
}

/// Queues work until [`DeferredScheduler::run_pending`] is called.
#[derive(Debug, Default)]
pub struct DeferredScheduler {
    state: Mutex<DeferredState>,
}

impl DeferredScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items waiting to run.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Run every queued item in submission order. Returns how many ran.
    ///
    /// Items scheduled by the callbacks themselves wait for the next call.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut self.state.lock().pending);
        trace!(count = batch.len(), "Running deferred work items");
        for result in &batch {
            result.invoke();
        }
        batch.len()
    }

    /// Refuse further work and drop anything still queued.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.pending.clear();
    }
}

impl WorkScheduler for DeferredScheduler {
    fn schedule(&self, result: AsyncResult) -> Result<(), SchedulerError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SchedulerError::ShutDown);
        }
        state.pending.push(result);
        Ok(())
    }
}
