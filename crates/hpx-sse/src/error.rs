//! Error handling for the event source engine.

use std::time::Duration;

use thiserror::Error;

use crate::sse::ReadyState;

/// The main result type used throughout the crate.
pub type EventSourceResult<T> = Result<T, EventSourceError>;

/// Every error an [`EventSource`](crate::sse::EventSource) can report.
///
/// Apart from [`Config`](Self::Config), which is only returned from
/// construction, all variants are transient: they reach the user's error
/// callback and the engine reconnects afterwards.
#[derive(Error, Debug)]
pub enum EventSourceError {
    /// HTTP request errors (wraps reqwest::Error)
    #[cfg(feature = "http-client")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport-level failure reported by a custom transport
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Server answered with a non-success status
    #[error("Unexpected response status: {status}")]
    InvalidStatus { status: http::StatusCode },

    /// Server answered with something other than `text/event-stream`
    #[error("Unexpected content type: {content_type}")]
    InvalidContentType { content_type: String },

    /// A transport signal arrived in a state where it is not allowed
    #[error("Unexpected {signal} signal while {state}")]
    UnexpectedSignal {
        signal: &'static str,
        state: ReadyState,
    },

    /// No event arrived within the configured interval
    #[error("No event received for {duration:?}")]
    Timeout { duration: Duration },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl EventSourceError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout { duration }
    }

    /// Create an invalid status error.
    pub fn invalid_status(status: http::StatusCode) -> Self {
        Self::InvalidStatus { status }
    }

    /// Create an invalid content type error.
    pub fn invalid_content_type(content_type: impl Into<String>) -> Self {
        Self::InvalidContentType {
            content_type: content_type.into(),
        }
    }

    pub(crate) fn unexpected_signal(signal: &'static str, state: ReadyState) -> Self {
        Self::UnexpectedSignal { signal, state }
    }

    /// Returns `true` if the error was synthesized by the liveness watchdog.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
