//! Structured logging helpers.
//!
//! Every line logged through these macros carries a `component` field so log
//! queries can select one part of the system:
//! - `component`: store, queue, platform, source, ...
//! - `message`: Log message
//! - Additional context fields

/// Log with a `component` field.
#[macro_export]
macro_rules! log_event {
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (trace, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::trace!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a media-event related line with standard fields.
#[macro_export]
macro_rules! log_media_event {
    ($level:ident, $component:expr, $msg:expr, $event_type:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            event_type = ?$event_type,
            $($($field)*,)?
            $msg
        )
    };
}
