//! Platform configuration from environment variables.

use crate::error::PlatformError;
use serde::{Deserialize, Serialize};
use std::env;

/// Default name prefix for work queue threads.
pub const DEFAULT_THREAD_NAME: &str = "mf-work-queue";

/// Upper bound on worker threads.
pub const MAX_WORKER_THREADS: usize = 256;

/// Configuration for the platform's standard work queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Number of runtime worker threads
    pub worker_threads: usize,

    /// Name given to every worker thread
    pub thread_name: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get().max(1),
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl PlatformConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MF_WORKER_THREADS`: Worker thread count (default: number of CPUs)
    /// - `MF_THREAD_NAME`: Worker thread name (default: mf-work-queue)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            worker_threads: env::var("MF_WORKER_THREADS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.worker_threads),

            thread_name: env::var("MF_THREAD_NAME").unwrap_or(defaults.thread_name),
        }
    }

    /// Builder-style method to set the worker thread count
    #[must_use]
    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    /// Builder-style method to set the worker thread name
    #[must_use]
    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    pub fn validate(&self) -> Result<(), PlatformError> {
        if self.worker_threads == 0 || self.worker_threads > MAX_WORKER_THREADS {
            return Err(PlatformError::InvalidConfig(format!(
                "worker_threads must be in 1..={MAX_WORKER_THREADS}, got {}",
                self.worker_threads
            )));
        }
        if self.thread_name.trim().is_empty() {
            return Err(PlatformError::InvalidConfig(
                "thread_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
