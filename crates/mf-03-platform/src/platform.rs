//! # Platform Lifetime
//!
//! A counted, explicitly owned platform resource. `startup` and `lock` take
//! a reference, `shutdown` and `unlock` release one. The standard work queue
//! is created when the first `startup` brings the count from zero and torn
//! down when the count returns to zero.
//!
//! Hosts create one [`Platform`] per process and share it by `Arc`.

use crate::config::PlatformConfig;
use crate::error::PlatformError;
use crate::work_queue::StandardWorkQueue;
use media_telemetry::log_event;
use mf_02_event_queue::{EventQueue, WorkScheduler};
use parking_lot::Mutex;
use std::sync::Arc;

const COMPONENT: &str = "platform";

/// API version component shared by the accepted startup versions.
pub const API_VERSION: u32 = 0x0070;

/// First supported startup version.
pub const VERSION_1: u32 = (1 << 16) | API_VERSION;

/// Current startup version.
pub const VERSION_2: u32 = (2 << 16) | API_VERSION;

/// Version passed by hosts that do not care.
pub const VERSION: u32 = VERSION_2;

#[derive(Default)]
struct PlatformState {
    lock_count: u32,
    work_queue: Option<Arc<StandardWorkQueue>>,
}

/// Process-wide platform services.
pub struct Platform {
    config: PlatformConfig,
    state: Mutex<PlatformState>,
}

impl Platform {
    #[must_use]
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            config,
            state: Mutex::new(PlatformState::default()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Take a startup reference, creating the work queue on the first one.
    pub fn startup(&self, version: u32) -> Result<(), PlatformError> {
        if version != VERSION_1 && version != VERSION_2 {
            log_event!(
                warn,
                COMPONENT,
                "Rejected platform startup",
                version = format_args!("{version:#x}")
            );
            return Err(PlatformError::BadStartupVersion { version });
        }

        let mut state = self.state.lock();
        if state.work_queue.is_none() {
            let work_queue = StandardWorkQueue::new(&self.config)?;
            state.work_queue = Some(Arc::new(work_queue));
            log_event!(info, COMPONENT, "Platform started");
        }
        state.lock_count += 1;
        log_event!(debug, COMPONENT, "Platform startup", lock_count = state.lock_count);
        Ok(())
    }

    /// Release a startup reference. Does nothing when not started.
    pub fn shutdown(&self) {
        self.release("shutdown");
    }

    /// Take an extra reference that keeps the platform alive.
    pub fn lock(&self) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        if state.lock_count == 0 {
            return Err(PlatformError::NotStarted);
        }
        state.lock_count += 1;
        log_event!(debug, COMPONENT, "Platform locked", lock_count = state.lock_count);
        Ok(())
    }

    /// Release a reference taken by `lock`.
    pub fn unlock(&self) {
        self.release("unlock");
    }

    /// Whether any reference is held.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.lock().lock_count > 0
    }

    #[must_use]
    pub fn lock_count(&self) -> u32 {
        self.state.lock().lock_count
    }

    /// The standard work queue as a scheduler for event queues.
    pub fn scheduler(&self) -> Result<Arc<dyn WorkScheduler>, PlatformError> {
        self.work_queue()
            .map(|work_queue| work_queue as Arc<dyn WorkScheduler>)
    }

    /// The standard work queue.
    pub fn work_queue(&self) -> Result<Arc<StandardWorkQueue>, PlatformError> {
        self.state
            .lock()
            .work_queue
            .clone()
            .ok_or(PlatformError::NotStarted)
    }

    /// Create an event queue whose notifications run on the work queue.
    pub fn create_event_queue(&self) -> Result<EventQueue, PlatformError> {
        Ok(EventQueue::new(self.scheduler()?))
    }

    fn release(&self, operation: &'static str) {
        let retired = {
            let mut state = self.state.lock();
            if state.lock_count == 0 {
                log_event!(debug, COMPONENT, "Platform not started", operation);
                return;
            }
            state.lock_count -= 1;
            log_event!(
                debug,
                COMPONENT,
                "Platform reference released",
                operation,
                lock_count = state.lock_count
            );
            if state.lock_count == 0 {
                state.work_queue.take()
            } else {
                None
            }
        };

        if let Some(work_queue) = retired {
            work_queue.shutdown();
            log_event!(info, COMPONENT, "Platform shut down");
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new(PlatformConfig::default())
    }
}

impl Drop for Platform {
    fn drop(&mut self) {
        if let Some(work_queue) = self.state.get_mut().work_queue.take() {
            work_queue.shutdown();
        }
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Platform")
            .field("config", &self.config)
            .field("lock_count", &state.lock_count)
            .field("running", &state.work_queue.is_some())
            .finish()
    }
}
