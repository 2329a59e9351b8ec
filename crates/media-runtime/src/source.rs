//! # Demo Media Source
//!
//! A media-source-shaped producer: it owns an attribute store describing the
//! presentation and an event queue its consumer drains. State transitions
//! emit the matching source and stream events.
//!
//! ```text
//! Stopped ──start──▶ Started ──pause──▶ Paused
//!    ▲                  │  ▲              │
//!    └──────stop────────┘  └────start─────┘
//!
//! any ──shutdown──▶ ShutDown (terminal)
//! ```

use media_telemetry::{log_event, log_media_event};
use mf_01_attributes::{AttributeError, AttributeHost, AttributeStore, PropValue};
use mf_02_event_queue::{
    EventGenerator, EventQueue, EventType, MediaEvent, QueueError, WorkScheduler,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{Guid, MediaError, StatusCode};
use std::sync::Arc;
use thiserror::Error;

const COMPONENT: &str = "source";

/// Attribute keys used by the source.
pub mod keys {
    use shared_types::Guid;

    /// Number of streams (u32), on the source.
    pub const STREAM_COUNT: Guid = Guid::from_u128(0x6d66_0001_0000_4000_8000_0000_0000_0001);
    /// Source display name (string), on the source.
    pub const SOURCE_NAME: Guid = Guid::from_u128(0x6d66_0001_0000_4000_8000_0000_0000_0002);
    /// Stream index (u32), on stream and sample events.
    pub const STREAM_INDEX: Guid = Guid::from_u128(0x6d66_0001_0000_4000_8000_0000_0000_0003);
    /// Sample sequence number (u64), on sample events.
    pub const SAMPLE_SEQUENCE: Guid = Guid::from_u128(0x6d66_0001_0000_4000_8000_0000_0000_0004);
}

/// Playback state of a [`MediaSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceState {
    Stopped,
    Started,
    Paused,
    ShutDown,
}

/// Errors from source operations
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source is shut down")]
    ShutDown,

    #[error("Cannot {operation} while {state:?}")]
    InvalidTransition {
        operation: &'static str,
        state: SourceState,
    },

    #[error("Stream index {index} out of range ({count} streams)")]
    InvalidStream { index: u32, count: u32 },

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

impl From<SourceError> for MediaError {
    fn from(err: SourceError) -> Self {
        let message = err.to_string();
        match err {
            SourceError::ShutDown => MediaError::ShutDown,
            SourceError::InvalidTransition { .. } => MediaError::Fail(message),
            SourceError::InvalidStream { .. } => MediaError::InvalidArgument(message),
            SourceError::Queue(e) => e.into(),
            SourceError::Attribute(e) => e.into(),
        }
    }
}

struct Playback {
    state: SourceState,
    next_sequence: u64,
}

/// A producer of media events with descriptive attributes.
pub struct MediaSource {
    attributes: AttributeStore,
    events: EventQueue,
    playback: Mutex<Playback>,
    stream_count: u32,
}

impl MediaSource {
    /// Create a stopped source with `stream_count` streams.
    pub fn new(
        name: &str,
        stream_count: u32,
        scheduler: Arc<dyn WorkScheduler>,
    ) -> Result<Self, SourceError> {
        let attributes = AttributeStore::with_capacity(2)?;
        attributes.set_u32(keys::STREAM_COUNT, stream_count)?;
        attributes.set_string(keys::SOURCE_NAME, name)?;

        Ok(Self {
            attributes,
            events: EventQueue::new(scheduler),
            playback: Mutex::new(Playback {
                state: SourceState::Stopped,
                next_sequence: 0,
            }),
            stream_count,
        })
    }

    #[must_use]
    pub fn state(&self) -> SourceState {
        self.playback.lock().state
    }

    #[must_use]
    pub fn stream_count(&self) -> u32 {
        self.stream_count
    }

    /// Start or resume playback.
    pub fn start(&self) -> Result<(), SourceError> {
        let mut playback = self.playback.lock();
        match playback.state {
            SourceState::Stopped | SourceState::Paused => {}
            SourceState::Started => {
                return Err(SourceError::InvalidTransition {
                    operation: "start",
                    state: playback.state,
                })
            }
            SourceState::ShutDown => return Err(SourceError::ShutDown),
        }

        self.events
            .queue_event(EventType::SourceStarted, Guid::NIL, StatusCode::OK, PropValue::Empty)?;
        self.queue_per_stream(EventType::StreamStarted)?;
        playback.state = SourceState::Started;
        log_event!(info, COMPONENT, "Source started", streams = self.stream_count);
        Ok(())
    }

    pub fn pause(&self) -> Result<(), SourceError> {
        self.transition(
            "pause",
            &[SourceState::Started],
            SourceState::Paused,
            EventType::SourcePaused,
            EventType::StreamPaused,
        )
    }

    pub fn stop(&self) -> Result<(), SourceError> {
        self.transition(
            "stop",
            &[SourceState::Started, SourceState::Paused],
            SourceState::Stopped,
            EventType::SourceStopped,
            EventType::StreamStopped,
        )
    }

    /// Emit one sample on `stream`. Returns its sequence number.
    pub fn deliver_sample(&self, stream: u32, payload: &[u8]) -> Result<u64, SourceError> {
        if stream >= self.stream_count {
            return Err(SourceError::InvalidStream {
                index: stream,
                count: self.stream_count,
            });
        }

        let mut playback = self.playback.lock();
        match playback.state {
            SourceState::Started => {}
            SourceState::ShutDown => return Err(SourceError::ShutDown),
            state => {
                return Err(SourceError::InvalidTransition {
                    operation: "deliver a sample",
                    state,
                })
            }
        }

        let sequence = playback.next_sequence;
        let event = MediaEvent::new(EventType::MediaSample, Guid::NIL, StatusCode::OK, payload);
        event.attributes().set_u32(keys::STREAM_INDEX, stream)?;
        event.attributes().set_u64(keys::SAMPLE_SEQUENCE, sequence)?;
        self.events.enqueue(event.into_shared())?;
        playback.next_sequence += 1;
        log_media_event!(
            trace,
            COMPONENT,
            "Sample delivered",
            EventType::MediaSample,
            stream,
            sequence,
            bytes = payload.len()
        );
        Ok(sequence)
    }

    /// Signal the end of every stream followed by end of presentation.
    pub fn end_of_presentation(&self) -> Result<(), SourceError> {
        let playback = self.playback.lock();
        if playback.state == SourceState::ShutDown {
            return Err(SourceError::ShutDown);
        }
        self.queue_per_stream(EventType::EndOfStream)?;
        self.events.queue_event(
            EventType::EndOfPresentation,
            Guid::NIL,
            StatusCode::OK,
            PropValue::Empty,
        )?;
        log_media_event!(debug, COMPONENT, "Presentation ended", EventType::EndOfPresentation);
        Ok(())
    }

    /// Shut the source down and release its queued events. Idempotent.
    pub fn shutdown(&self) {
        let mut playback = self.playback.lock();
        if playback.state == SourceState::ShutDown {
            return;
        }
        playback.state = SourceState::ShutDown;
        drop(playback);

        self.events.shutdown();
        log_event!(info, COMPONENT, "Source shut down");
    }

    fn transition(
        &self,
        operation: &'static str,
        from: &[SourceState],
        to: SourceState,
        source_event: EventType,
        stream_event: EventType,
    ) -> Result<(), SourceError> {
        let mut playback = self.playback.lock();
        if playback.state == SourceState::ShutDown {
            return Err(SourceError::ShutDown);
        }
        if !from.contains(&playback.state) {
            return Err(SourceError::InvalidTransition {
                operation,
                state: playback.state,
            });
        }

        self.events
            .queue_event(source_event, Guid::NIL, StatusCode::OK, PropValue::Empty)?;
        self.queue_per_stream(stream_event)?;
        log_media_event!(
            debug,
            COMPONENT,
            "Source state changed",
            source_event,
            from = ?playback.state,
            to = ?to
        );
        playback.state = to;
        Ok(())
    }

    fn queue_per_stream(&self, event_type: EventType) -> Result<(), SourceError> {
        for index in 0..self.stream_count {
            let event = MediaEvent::of_type(event_type);
            event.attributes().set_u32(keys::STREAM_INDEX, index)?;
            self.events.enqueue(event.into_shared())?;
        }
        Ok(())
    }
}

impl AttributeHost for MediaSource {
    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }
}

impl EventGenerator for MediaSource {
    fn event_queue(&self) -> &EventQueue {
        &self.events
    }
}
