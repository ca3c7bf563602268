//! Transport abstraction for event source connections.
//!
//! The engine never talks HTTP itself. For each connection attempt it hands
//! the request headers to a [`Transport`] and consumes the resulting stream
//! of [`TransportSignal`]s.

use std::fmt;

use bytes::Bytes;
use futures_util::stream::BoxStream;
use http::{HeaderMap, StatusCode};

use crate::error::EventSourceError;

/// Stream of signals produced by one connection attempt.
pub type SignalStream = BoxStream<'static, TransportSignal>;

/// One step of a connection attempt as reported by the transport.
pub enum TransportSignal {
    /// The server accepted the request and the body is about to stream.
    Connected {
        /// Response status.
        status: StatusCode,
        /// Response headers.
        headers: HeaderMap,
    },
    /// A chunk of the response body.
    Data(Bytes),
    /// The attempt failed. Unacceptable statuses are reported this way too.
    Failed(EventSourceError),
    /// The server ended the body.
    Completed,
}

impl TransportSignal {
    /// Short name used in logs and state errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Data(_) => "data",
            Self::Failed(_) => "failed",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` for signals after which the stream carries nothing
    /// useful.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Completed)
    }
}

impl fmt::Debug for TransportSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected { status, .. } => f
                .debug_struct("Connected")
                .field("status", status)
                .finish_non_exhaustive(),
            Self::Data(bytes) => f.debug_tuple("Data").field(&bytes.len()).finish(),
            Self::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
            Self::Completed => f.write_str("Completed"),
        }
    }
}

/// Opens connection attempts for an [`EventSource`](crate::sse::EventSource).
///
/// `open` is called once per attempt with the full set of request headers,
/// including `Accept` and `Last-Event-ID`. Dropping the returned stream must
/// cancel the attempt.
///
/// Any `Fn(HeaderMap) -> SignalStream` closure is a transport, which keeps
/// test doubles short:
///
/// ```
/// use futures_util::{StreamExt, stream};
/// use hpx_sse::transport::{SignalStream, TransportSignal};
///
/// let transport = |_headers: http::HeaderMap| -> SignalStream {
///     stream::iter([TransportSignal::Completed]).boxed()
/// };
/// # let _ = transport;
/// ```
pub trait Transport: Send + Sync + 'static {
    /// Start one connection attempt.
    fn open(&self, headers: HeaderMap) -> SignalStream;
}

impl<F> Transport for F
where
    F: Fn(HeaderMap) -> SignalStream + Send + Sync + 'static,
{
    fn open(&self, headers: HeaderMap) -> SignalStream {
        self(headers)
    }
}
