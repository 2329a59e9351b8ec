//! Queue counters
//!
//! Thread-safe counters updated by every queue operation. Cheap enough to
//! leave on in production; read them through [`QueueMetrics::snapshot`].

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one event queue.
#[derive(Debug, Default)]
pub struct QueueMetrics {
    /// Events accepted by `enqueue`
    pub events_enqueued: AtomicU64,
    /// Events handed to a consumer
    pub events_dequeued: AtomicU64,
    /// Events released unconsumed by shutdown
    pub events_discarded: AtomicU64,
    /// Notifications handed to the work scheduler
    pub notifications_scheduled: AtomicU64,
    /// Notifications the work scheduler refused
    pub scheduling_failures: AtomicU64,
}

impl QueueMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_enqueued(&self) {
        self.events_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dequeued(&self) {
        self.events_dequeued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_discarded(&self, count: usize) {
        self.events_discarded
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_notification(&self) {
        self.notifications_scheduled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scheduling_failure(&self) {
        self.scheduling_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> QueueMetricsSnapshot {
        QueueMetricsSnapshot {
            events_enqueued: self.events_enqueued.load(Ordering::Relaxed),
            events_dequeued: self.events_dequeued.load(Ordering::Relaxed),
            events_discarded: self.events_discarded.load(Ordering::Relaxed),
            notifications_scheduled: self.notifications_scheduled.load(Ordering::Relaxed),
            scheduling_failures: self.scheduling_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`QueueMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMetricsSnapshot {
    pub events_enqueued: u64,
    pub events_dequeued: u64,
    pub events_discarded: u64,
    pub notifications_scheduled: u64,
    pub scheduling_failures: u64,
}

impl QueueMetricsSnapshot {
    /// Events accepted but neither consumed nor discarded.
    #[must_use]
    pub fn in_flight(&self) -> u64 {
        self.events_enqueued
            .saturating_sub(self.events_dequeued)
            .saturating_sub(self.events_discarded)
    }
}
