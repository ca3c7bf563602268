//! Core type definitions for SSE event handling.

use std::fmt;

/// Connection state of an [`EventSource`](super::EventSource).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReadyState {
    /// A connection attempt is in flight or a reconnect is scheduled.
    Connecting,
    /// The server accepted the request and events are streaming.
    Open,
    /// Not connected and not reconnecting.
    Closed,
}

impl ReadyState {
    /// Returns `true` if the connection is actively streaming.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns `true` if the event source is closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// An event delivered to message callbacks and named listeners.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageEvent {
    /// The `event:` name of the frame, if any.
    pub event: Option<String>,
    /// The last event ID known when the frame was dispatched.
    ///
    /// Frames without an `id:` line carry the ID of an earlier frame.
    pub id: Option<String>,
    /// The frame's `data:` payload.
    pub data: Option<String>,
}

impl MessageEvent {
    /// Convenience accessor for the event type field.
    pub fn event_type(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// Convenience accessor for the event ID field.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Convenience accessor for the event's data field.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_state_predicates() {
        assert!(ReadyState::Open.is_open());
        assert!(!ReadyState::Connecting.is_open());
        assert!(ReadyState::Closed.is_closed());
        assert!(!ReadyState::Open.is_closed());
    }

    #[test]
    fn test_ready_state_display() {
        assert_eq!(ReadyState::Connecting.to_string(), "connecting");
        assert_eq!(ReadyState::Open.to_string(), "open");
        assert_eq!(ReadyState::Closed.to_string(), "closed");
    }

    #[test]
    fn test_message_event_accessors() {
        let event = MessageEvent {
            event: Some("update".to_string()),
            id: Some("evt-123".to_string()),
            data: Some("{\"price\": 42000}".to_string()),
        };
        assert_eq!(event.event_type(), Some("update"));
        assert_eq!(event.id(), Some("evt-123"));
        assert_eq!(event.data(), Some("{\"price\": 42000}"));

        let empty = MessageEvent::default();
        assert!(empty.event_type().is_none());
        assert!(empty.id().is_none());
        assert!(empty.data().is_none());
    }
}
