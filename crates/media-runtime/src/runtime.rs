//! # Media Runtime
//!
//! Wires the pieces together: starts the platform, creates a demo source on
//! the platform's work queue, plays it through and drains every event with
//! the async adapter until end of presentation.

use crate::source::{MediaSource, SourceError};
use anyhow::{Context, Result};
use media_telemetry::{component_span, log_event, TelemetryConfig};
use mf_01_attributes::PropValue;
use mf_02_event_queue::{
    next_event, EventGenerator, EventType, MediaEvent, QueueError, QueueMetricsSnapshot,
};
use mf_03_platform::{Platform, PlatformConfig, VERSION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;
use tracing::Instrument;

const COMPONENT: &str = "runtime";

/// Runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub telemetry: TelemetryConfig,
    pub platform: PlatformConfig,
    /// Streams exposed by the demo source
    pub stream_count: u32,
    /// Samples delivered on each stream
    pub samples_per_stream: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            telemetry: TelemetryConfig::default(),
            platform: PlatformConfig::default(),
            stream_count: 2,
            samples_per_stream: 8,
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MF_DEMO_STREAMS`: Stream count (default: 2)
    /// - `MF_DEMO_SAMPLES`: Samples per stream (default: 8)
    /// - everything read by `TelemetryConfig::from_env` and `PlatformConfig::from_env`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            telemetry: TelemetryConfig::for_component("runtime"),
            platform: PlatformConfig::from_env(),
            stream_count: env::var("MF_DEMO_STREAMS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.stream_count),
            samples_per_stream: env::var("MF_DEMO_SAMPLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.samples_per_stream),
        }
    }
}

/// What the consumer observed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub events_received: u64,
    pub samples_received: u64,
    pub sample_bytes: u64,
    /// Events per type, keyed by type name.
    pub by_type: BTreeMap<String, u64>,
    pub queue: QueueMetricsSnapshot,
}

impl RunSummary {
    fn record(&mut self, event: &MediaEvent) {
        self.events_received += 1;
        *self
            .by_type
            .entry(format!("{:?}", event.event_type()))
            .or_insert(0) += 1;

        if event.event_type() == EventType::MediaSample {
            self.samples_received += 1;
            if let PropValue::Blob(bytes) = event.value() {
                self.sample_bytes += bytes.len() as u64;
            }
        }
    }
}

/// Demo host.
pub struct MediaRuntime {
    config: RuntimeConfig,
    platform: Arc<Platform>,
}

impl MediaRuntime {
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        let platform = Arc::new(Platform::new(config.platform.clone()));
        Self { config, platform }
    }

    #[must_use]
    pub fn platform(&self) -> &Arc<Platform> {
        &self.platform
    }

    /// Start the platform, play the demo source and shut everything down.
    pub async fn run(&self) -> Result<RunSummary> {
        self.platform
            .startup(VERSION)
            .context("Failed to start platform")?;
        let result = self.play().await;
        self.platform.shutdown();
        result
    }

    async fn play(&self) -> Result<RunSummary> {
        let scheduler = self.platform.scheduler()?;
        let source = Arc::new(
            MediaSource::new("demo", self.config.stream_count, scheduler)
                .context("Failed to create source")?,
        );
        let summary = play_source(source, self.config.samples_per_stream).await?;

        log_event!(
            info,
            COMPONENT,
            "Presentation complete",
            events = summary.events_received,
            samples = summary.samples_received
        );
        Ok(summary)
    }
}

/// Play `source` through while a spawned task drains it.
///
/// The source is shut down on every path, so a failed producer never leaves
/// the consumer parked in `next_event`.
async fn play_source(source: Arc<MediaSource>, samples_per_stream: u32) -> Result<RunSummary> {
    let consumer = tokio::spawn(
        consume(Arc::clone(&source)).instrument(component_span!(COMPONENT, "consume")),
    );

    let produced = produce(&source, samples_per_stream);
    if let Err(err) = &produced {
        log_event!(warn, COMPONENT, "Producer failed", error = %err);
        source.shutdown();
    } else {
        log_event!(debug, COMPONENT, "Producer finished");
    }

    let consumed = consumer.await.context("Consumer task failed");
    source.shutdown();

    produced.context("Playback failed")?;
    Ok(consumed??)
}

fn produce(source: &MediaSource, samples_per_stream: u32) -> Result<(), SourceError> {
    source.start()?;
    for sequence in 0..samples_per_stream {
        for stream in 0..source.stream_count() {
            source.deliver_sample(stream, &sequence.to_le_bytes())?;
        }
    }
    source.end_of_presentation()
}

/// Drain `source` until end of presentation.
async fn consume(source: Arc<MediaSource>) -> Result<RunSummary, QueueError> {
    let mut summary = RunSummary::default();
    loop {
        let event = next_event(source.event_queue()).await?;
        summary.record(&event);
        if event.event_type() == EventType::EndOfPresentation {
            break;
        }
    }
    summary.queue = source.event_queue().metrics().snapshot();
    Ok(summary)
}
