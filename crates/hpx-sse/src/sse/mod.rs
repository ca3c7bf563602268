//! Server-Sent Events (SSE) client engine.
//!
//! This module provides the event source state machine with support for:
//!
//! - **Incremental Parsing**: Frames are cut out of arbitrary network reads
//!   and split into `event`/`id`/`data`/`retry` fields by the [`parse`]
//!   module.
//! - **Auto-Reconnection**: Every failure is followed by a reconnect with a
//!   quadratic, capped backoff (see [`next_delay`](crate::reconnect::next_delay))
//!   that honours the server's `retry:` field and resumes with
//!   `Last-Event-ID`.
//! - **Liveness Detection**: An optional watchdog declares the connection dead
//!   when no event arrives within a configured interval.
//! - **Listeners**: A catch-all message callback plus one listener per event
//!   name.
//!
//! # Architecture
//!
//! ```text
//! EventSource::connect()
//!   └─ spawns per attempt ──► run_subscription(generation)
//!        │                          │  Transport::open(headers)
//!        │                          ▼
//!        │               Connected / Data / Failed / Completed
//!        │                          │
//!        ├── EngineState ◄── lock ──┤  (state, retry, last id, parser)
//!        │                          │
//!        └── callbacks ◄── no lock ─┘  (open, message, listeners, error)
//! ```
//!
//! # Module Index
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | [`EventSourceConfig`] builder for engine settings |
//! | [`connection`] | [`EventSource`], [`EventSourceHandle`] |
//! | `listeners` | Callback registry |
//! | [`parse`] | [`FrameParser`](parse::FrameParser), [`parse_frame`](parse::parse_frame) |
//! | `types` | [`ReadyState`], [`MessageEvent`] |

mod config;
pub mod connection;
mod listeners;
pub mod parse;
mod types;

// Re-export config types
pub use config::{DEFAULT_RETRY_INTERVAL, DEFAULT_TIMEOUT_CHECK_INTERVAL, EventSourceConfig};
// Re-export connection types
pub use connection::{EventSource, EventSourceHandle};
// Re-export callback types
pub use listeners::{ErrorCallback, MessageCallback, OpenCallback};
// Re-export parser types
pub use parse::{FrameParser, ParsedEvent, parse_frame};
// Re-export core types
pub use types::{MessageEvent, ReadyState};
