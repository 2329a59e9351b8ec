//! # Media Events
//!
//! An event is an immutable record of something that happened to a media
//! object: a type tag, an extended type, the status of the operation that
//! produced it and a scalar value. Extensible metadata rides in the embedded
//! attribute store, which is the only mutable part.
//!
//! Events are shared as `Arc<MediaEvent>`: the queue holds one reference
//! while the event is enqueued, consumers hold their own.

use mf_01_attributes::{AttributeHost, AttributeStore, PropValue};
use serde::{Deserialize, Serialize};
use shared_types::{Guid, StatusCode};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Kind of media event.
///
/// Equality and hashing follow [`EventType::code`], so `Custom(201)` equals
/// `SourceStarted`. Use [`EventType::from_code`] to get the named variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum EventType {
    // =========================================================================
    // GENERIC
    // =========================================================================
    Unknown,
    Error,
    /// Meaning is carried by the extended type.
    ExtendedType,
    NonFatalError,

    // =========================================================================
    // SESSION
    // =========================================================================
    SessionTopologySet,
    SessionStarted,
    SessionPaused,
    SessionStopped,
    SessionClosed,
    SessionEnded,

    // =========================================================================
    // SOURCE
    // =========================================================================
    SourceStarted,
    StreamStarted,
    SourceSeeked,
    StreamSeeked,
    NewStream,
    UpdatedStream,
    SourceStopped,
    StreamStopped,
    SourcePaused,
    StreamPaused,
    EndOfPresentation,
    EndOfStream,
    MediaSample,
    StreamTick,

    /// Application-defined code.
    Custom(u32),
}

impl EventType {
    /// Numeric event code.
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            EventType::Unknown => 0,
            EventType::Error => 1,
            EventType::ExtendedType => 2,
            EventType::NonFatalError => 3,
            EventType::SessionTopologySet => 101,
            EventType::SessionStarted => 103,
            EventType::SessionPaused => 104,
            EventType::SessionStopped => 105,
            EventType::SessionClosed => 106,
            EventType::SessionEnded => 107,
            EventType::SourceStarted => 201,
            EventType::StreamStarted => 202,
            EventType::SourceSeeked => 203,
            EventType::StreamSeeked => 204,
            EventType::NewStream => 205,
            EventType::UpdatedStream => 206,
            EventType::SourceStopped => 207,
            EventType::StreamStopped => 208,
            EventType::SourcePaused => 209,
            EventType::StreamPaused => 210,
            EventType::EndOfPresentation => 211,
            EventType::EndOfStream => 212,
            EventType::MediaSample => 213,
            EventType::StreamTick => 214,
            EventType::Custom(code) => code,
        }
    }

    /// Event type for a numeric code. Unrecognised codes become `Custom`.
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => EventType::Unknown,
            1 => EventType::Error,
            2 => EventType::ExtendedType,
            3 => EventType::NonFatalError,
            101 => EventType::SessionTopologySet,
            103 => EventType::SessionStarted,
            104 => EventType::SessionPaused,
            105 => EventType::SessionStopped,
            106 => EventType::SessionClosed,
            107 => EventType::SessionEnded,
            201 => EventType::SourceStarted,
            202 => EventType::StreamStarted,
            203 => EventType::SourceSeeked,
            204 => EventType::StreamSeeked,
            205 => EventType::NewStream,
            206 => EventType::UpdatedStream,
            207 => EventType::SourceStopped,
            208 => EventType::StreamStopped,
            209 => EventType::SourcePaused,
            210 => EventType::StreamPaused,
            211 => EventType::EndOfPresentation,
            212 => EventType::EndOfStream,
            213 => EventType::MediaSample,
            214 => EventType::StreamTick,
            other => EventType::Custom(other),
        }
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

/// A media event.
#[derive(Debug)]
pub struct MediaEvent {
    event_type: EventType,
    extended_type: Guid,
    status: StatusCode,
    value: PropValue,
    attributes: AttributeStore,
}

impl MediaEvent {
    /// Create an event. The value is copied in; object handles are retained.
    ///
    /// Custom codes that name a built-in type are stored as that type.
    #[must_use]
    pub fn new(
        event_type: EventType,
        extended_type: Guid,
        status: StatusCode,
        value: impl Into<PropValue>,
    ) -> Self {
        Self {
            event_type: EventType::from_code(event_type.code()),
            extended_type,
            status,
            value: value.into(),
            attributes: AttributeStore::new(),
        }
    }

    /// A successful event of `event_type` with no value.
    #[must_use]
    pub fn of_type(event_type: EventType) -> Self {
        Self::new(event_type, Guid::NIL, StatusCode::OK, PropValue::Empty)
    }

    /// Builder-style method to set the extended type
    #[must_use]
    pub fn with_extended_type(mut self, extended_type: Guid) -> Self {
        self.extended_type = extended_type;
        self
    }

    /// Builder-style method to set the status
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Builder-style method to set the value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<PropValue>) -> Self {
        self.value = value.into();
        self
    }

    /// Wrap in a shared handle.
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    #[must_use]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    #[must_use]
    pub fn extended_type(&self) -> Guid {
        self.extended_type
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn value(&self) -> &PropValue {
        &self.value
    }
}

impl AttributeHost for MediaEvent {
    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }
}
