//! # hpx-sse
//!
//! Server-Sent Events client with automatic reconnection.
//!
//! This crate implements the client side of the `text/event-stream` protocol:
//! an incremental frame and field parser, a connection state machine that
//! reconnects after every failure, a retry policy that follows the server's
//! `retry:` hints, and a watchdog that detects silently dead connections.
//!
//! ## Features
//!
//! - **Transport Agnostic**: The engine drives any [`Transport`]; closures
//!   work too, which keeps tests free of sockets
//! - **HTTP Out of the Box**: [`HttpTransport`](crate::http::HttpTransport) on top of
//!   `reqwest` (feature `http-client`, enabled by default)
//! - **Resumable**: `Last-Event-ID` is tracked and sent on every reconnect
//! - **Thread Safe**: Callbacks may call back into the engine, including
//!   closing it from inside a message handler
//! - **Observability**: Structured logging through `tracing`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use hpx_sse::{EventSource, EventSourceConfig, http::HttpTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new("https://api.example.com/v1/stream");
//!     let config = EventSourceConfig::new().event_timeout(Some(Duration::from_secs(30)));
//!
//!     let source = EventSource::new(config, transport)?;
//!     source.on_open(|| println!("connected"));
//!     source.on_error(|err| eprintln!("connection lost: {err:?}"));
//!     source.add_event_listener("trade", |event| {
//!         println!("trade {:?} ({:?})", event.data(), event.id());
//!     });
//!     source.connect();
//!
//!     tokio::time::sleep(Duration::from_secs(60)).await;
//!     source.close();
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod reconnect;
pub mod sse;
pub mod transport;
pub mod watchdog;

#[cfg(feature = "http-client")]
pub mod http;

// Re-export commonly used types
pub use error::{EventSourceError, EventSourceResult};
pub use sse::{EventSource, EventSourceConfig, EventSourceHandle, MessageEvent, ReadyState};
pub use transport::{SignalStream, Transport, TransportSignal};
