//! # Standard Work Queue
//!
//! The platform's shared worker pool. Each scheduled completion runs on the
//! blocking pool of a dedicated multi-threaded `tokio` runtime, so callbacks
//! may block (for example on `pop_blocking` of another queue) without
//! starving async tasks.
//!
//! After [`StandardWorkQueue::shutdown`] every `schedule` fails with
//! `SchedulerError::ShutDown`. Work already running is not interrupted.

use crate::config::PlatformConfig;
use crate::error::PlatformError;
use mf_02_event_queue::{AsyncResult, SchedulerError, WorkScheduler};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

/// Worker pool backing the platform's event notifications.
pub struct StandardWorkQueue {
    runtime: Mutex<Option<Runtime>>,
    items_dispatched: AtomicU64,
}

impl StandardWorkQueue {
    /// Build the runtime described by `config`.
    pub fn new(config: &PlatformConfig) -> Result<Self, PlatformError> {
        config.validate()?;
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .thread_name(config.thread_name.clone())
            .build()
            .map_err(|e| PlatformError::WorkQueue(e.to_string()))?;

        info!(
            worker_threads = config.worker_threads,
            thread_name = %config.thread_name,
            "Standard work queue started"
        );
        Ok(Self {
            runtime: Mutex::new(Some(runtime)),
            items_dispatched: AtomicU64::new(0),
        })
    }

    /// Whether the queue still accepts work.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.runtime.lock().is_some()
    }

    /// Total work items handed to the pool.
    #[must_use]
    pub fn items_dispatched(&self) -> u64 {
        self.items_dispatched.load(Ordering::Relaxed)
    }

    /// Stop accepting work and release the runtime without waiting for
    /// running callbacks. Idempotent.
    pub fn shutdown(&self) {
        let runtime = self.runtime.lock().take();
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
            debug!(
                items_dispatched = self.items_dispatched(),
                "Standard work queue shut down"
            );
        }
    }
}

impl WorkScheduler for StandardWorkQueue {
    fn schedule(&self, result: AsyncResult) -> Result<(), SchedulerError> {
        let handle = match self.runtime.lock().as_ref() {
            Some(runtime) => runtime.handle().clone(),
            None => return Err(SchedulerError::ShutDown),
        };
        handle.spawn_blocking(move || result.invoke());
        self.items_dispatched.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl Drop for StandardWorkQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for StandardWorkQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardWorkQueue")
            .field("running", &self.is_running())
            .field("items_dispatched", &self.items_dispatched())
            .finish()
    }
}
