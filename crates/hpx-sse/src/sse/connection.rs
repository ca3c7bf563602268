//! Event source connection engine.
//!
//! Provides [`EventSource`] and [`EventSourceHandle`]. All mutable state lives
//! in one mutex-guarded [`EngineState`]; transport signals, timers and user
//! calls each take the lock briefly, and user callbacks always run after it
//! has been released.
//!
//! Every connection attempt gets a new generation number. Tasks spawned for
//! an attempt (the transport reader, the reconnect timer, the watchdog)
//! capture it, and whatever they report is ignored once the engine has moved
//! on to a newer generation.

use std::{
    fmt,
    sync::{Arc, Weak},
    time::Duration,
};

use futures_util::StreamExt;
use http::{
    HeaderMap, HeaderName, HeaderValue, StatusCode,
    header::{ACCEPT, CACHE_CONTROL},
};
use parking_lot::{Mutex, RwLock};
use tokio::{runtime::Handle, task::JoinHandle, time::Instant};
use tracing::{debug, info, warn};

use super::{
    config::EventSourceConfig,
    listeners::{ListenerRegistry, MessageCallback},
    parse::{FrameParser, ParsedEvent, parse_frame},
    types::{MessageEvent, ReadyState},
};
use crate::{
    error::{EventSourceError, EventSourceResult},
    reconnect::{RetryState, next_delay},
    transport::{Transport, TransportSignal},
    watchdog::Watchdog,
};

const LAST_EVENT_ID: HeaderName = HeaderName::from_static("last-event-id");

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

struct EngineState {
    ready_state: ReadyState,
    generation: u64,
    retry: RetryState,
    last_event_id: Option<String>,
    /// Start of the current connection attempt, refreshed when it opens.
    connection_started: Instant,
    parser: FrameParser,
    watchdog: Watchdog,
    subscription: Option<JoinHandle<()>>,
    reconnect_timer: Option<JoinHandle<()>>,
}

impl EngineState {
    fn cancel_tasks(&mut self) {
        self.watchdog.stop();
        if let Some(task) = self.subscription.take() {
            task.abort();
        }
        if let Some(task) = self.reconnect_timer.take() {
            task.abort();
        }
    }
}

struct Inner {
    runtime: Handle,
    transport: Box<dyn Transport>,
    headers: HeaderMap,
    state: Mutex<EngineState>,
    listeners: RwLock<ListenerRegistry>,
}

impl Inner {
    fn connect(self: &Arc<Self>) {
        let mut state = self.state.lock();
        if !state.ready_state.is_closed() {
            debug!(state = %state.ready_state, "SSE connect ignored");
            return;
        }
        info!("SSE connecting");
        self.begin_attempt(&mut state);
    }

    fn close(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.cancel_tasks();
        if !state.ready_state.is_closed() {
            state.ready_state = ReadyState::Closed;
            info!("SSE connection closed");
        }
    }

    /// Enter `connecting` and spawn a transport reader for a fresh
    /// generation.
    fn begin_attempt(self: &Arc<Self>, state: &mut EngineState) {
        state.ready_state = ReadyState::Connecting;
        state.generation += 1;
        state.parser.reset();
        state.connection_started = Instant::now();
        if let Some(task) = state.subscription.take() {
            task.abort();
        }

        let generation = state.generation;
        let headers = self.request_headers(state.last_event_id.as_deref());
        debug!(generation, attempt = state.retry.attempt_count, "SSE opening transport");
        state.subscription = Some(self.runtime.spawn(run_subscription(
            Arc::downgrade(self),
            generation,
            headers,
        )));
    }

    fn request_headers(&self, last_event_id: Option<&str>) -> HeaderMap {
        let mut headers = self.headers.clone();
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        // Last-Event-ID for resumption.
        if let Some(id) = last_event_id.filter(|id| !id.is_empty()) {
            match HeaderValue::from_str(id) {
                Ok(value) => {
                    headers.insert(LAST_EVENT_ID, value);
                }
                Err(_) => debug!(id, "Last event ID is not a valid header value, omitting"),
            }
        }
        headers
    }

    fn is_current(&self, generation: u64) -> bool {
        let state = self.state.lock();
        state.generation == generation && !state.ready_state.is_closed()
    }

    fn handle_signal(self: &Arc<Self>, generation: u64, signal: TransportSignal) {
        match signal {
            TransportSignal::Connected { status, .. } => self.handle_open(generation, status),
            TransportSignal::Data(bytes) => self.handle_data(generation, &bytes),
            TransportSignal::Failed(err) => self.handle_failure(generation, Some(err)),
            TransportSignal::Completed => self.handle_failure(generation, None),
        }
    }

    fn handle_open(self: &Arc<Self>, generation: u64, status: StatusCode) {
        let opened = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            match state.ready_state {
                ReadyState::Closed => return,
                ReadyState::Open => Err(ReadyState::Open),
                ReadyState::Connecting => {
                    let now = Instant::now();
                    state.ready_state = ReadyState::Open;
                    state.retry.attempt_count = 0;
                    state.connection_started = now;

                    let engine = Arc::downgrade(self);
                    let timeout = state.watchdog.timeout().unwrap_or_default();
                    state.watchdog.start(&self.runtime, now, move || {
                        if let Some(inner) = engine.upgrade() {
                            inner.handle_failure(generation, Some(EventSourceError::timeout(timeout)));
                        }
                    });
                    info!(%status, generation, "SSE connection established");
                    Ok(())
                }
            }
        };

        match opened {
            Ok(()) => {
                let callback = self.listeners.read().on_open.clone();
                if let Some(callback) = callback {
                    callback();
                }
            }
            Err(state) => self.handle_failure(
                generation,
                Some(EventSourceError::unexpected_signal("connected", state)),
            ),
        }
    }

    fn handle_data(self: &Arc<Self>, generation: u64, bytes: &[u8]) {
        let events = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            match state.ready_state {
                ReadyState::Closed => return,
                ReadyState::Connecting => Err(ReadyState::Connecting),
                ReadyState::Open => Ok(state
                    .parser
                    .process(bytes)
                    .iter()
                    .map(|frame| parse_frame(frame))
                    .collect::<Vec<_>>()),
            }
        };

        match events {
            Ok(events) => {
                for event in events {
                    if !self.dispatch(generation, event) {
                        break;
                    }
                }
            }
            Err(state) => self.handle_failure(
                generation,
                Some(EventSourceError::unexpected_signal("data", state)),
            ),
        }
    }

    /// Deliver one parsed frame. Returns `false` once the generation is no
    /// longer current, so the caller stops dispatching.
    fn dispatch(&self, generation: u64, parsed: ParsedEvent) -> bool {
        let message = {
            let mut state = self.state.lock();
            if state.generation != generation || !state.ready_state.is_open() {
                return false;
            }
            state.watchdog.touch();

            if let Some(millis) = parsed.retry_millis() {
                state.retry.retry_interval = Duration::from_millis(millis);
                debug!(retry_ms = millis, "SSE server updated retry interval");
            }

            if parsed.is_empty() {
                return true;
            }

            if let Some(id) = parsed.id.as_deref()
                && !id.contains('\0')
            {
                state.last_event_id = Some(id.to_string());
            }

            MessageEvent {
                event: parsed.event,
                id: state.last_event_id.clone(),
                data: parsed.data,
            }
        };

        debug!(
            event_type = message.event_type().unwrap_or(""),
            id = message.id().unwrap_or(""),
            "SSE event received",
        );

        let targets: Vec<MessageCallback> =
            self.listeners.read().message_targets(message.event_type());
        for callback in targets {
            if !self.is_current(generation) {
                return false;
            }
            callback(&message);
        }
        true
    }

    /// Report a transport error, stream completion or stall, then reconnect.
    ///
    /// The failed generation is claimed under the lock before the error
    /// callback runs; concurrent failures of one attempt report once.
    fn handle_failure(self: &Arc<Self>, generation: u64, error: Option<EventSourceError>) {
        let Some((next_generation, lived)) = self.claim_failure(generation) else {
            return;
        };

        match &error {
            Some(err) => warn!(error = %err, "SSE connection failed"),
            None => warn!("SSE stream ended"),
        }

        let callback = self.listeners.read().on_error.clone();
        if let Some(callback) = callback {
            callback(error.as_ref());
        }

        self.schedule_reconnect(next_generation, lived);
    }

    /// Move a failed generation to `connecting` under a fresh generation.
    ///
    /// Returns the new generation and how long the failed connection lived,
    /// or `None` when the generation was already superseded or closed.
    fn claim_failure(&self, generation: u64) -> Option<(u64, Duration)> {
        let mut state = self.state.lock();
        if state.generation != generation || state.ready_state.is_closed() {
            return None;
        }

        state.cancel_tasks();
        state.ready_state = ReadyState::Connecting;
        state.generation += 1;
        Some((state.generation, state.connection_started.elapsed()))
    }

    fn schedule_reconnect(self: &Arc<Self>, generation: u64, lived: Duration) {
        let mut state = self.state.lock();
        // A close() or connect() may have raced the error callback.
        if state.generation != generation || state.ready_state != ReadyState::Connecting {
            return;
        }

        let delay = next_delay(state.retry.attempt_count, state.retry.retry_interval, lived);
        state.retry.attempt_count = state.retry.attempt_count.saturating_add(1);
        warn!(
            attempt = state.retry.attempt_count,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "SSE reconnecting after backoff"
        );

        let engine = Arc::downgrade(self);
        state.reconnect_timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = engine.upgrade() {
                inner.reconnect_due(generation);
            }
        }));
    }

    fn reconnect_due(self: &Arc<Self>, generation: u64) {
        let mut state = self.state.lock();
        if state.generation != generation || state.ready_state != ReadyState::Connecting {
            return;
        }
        // The timer task is the caller; dropping the handle does not abort it.
        state.reconnect_timer = None;
        self.begin_attempt(&mut state);
    }

    fn ready_state(&self) -> ReadyState {
        self.state.lock().ready_state
    }

    fn last_event_id(&self) -> Option<String> {
        self.state.lock().last_event_id.clone()
    }

    fn retry_interval(&self) -> Duration {
        self.state.lock().retry.retry_interval
    }

    fn attempt_count(&self) -> u32 {
        self.state.lock().retry.attempt_count
    }
}

/// Reads one connection attempt's signals until it ends or is cancelled.
async fn run_subscription(engine: Weak<Inner>, generation: u64, headers: HeaderMap) {
    let mut signals = match engine.upgrade() {
        Some(inner) => inner.transport.open(headers),
        None => return,
    };

    while let Some(signal) = signals.next().await {
        let Some(inner) = engine.upgrade() else {
            return;
        };
        let terminal = signal.is_terminal();
        inner.handle_signal(generation, signal);
        if terminal {
            return;
        }
    }

    // A transport that just stops yielding ended the stream.
    if let Some(inner) = engine.upgrade() {
        inner.handle_failure(generation, None);
    }
}

// ---------------------------------------------------------------------------
// Public API: EventSource
// ---------------------------------------------------------------------------

/// A Server-Sent Events client.
///
/// Created closed. [`connect()`](Self::connect) starts streaming in the
/// background; from then on every failure (transport error, end of stream,
/// watchdog timeout) is reported to the error callback and followed by an
/// automatic reconnect, until [`close()`](Self::close) is called. Dropping
/// the event source closes it.
///
/// ```rust,no_run
/// use futures_util::{StreamExt, stream};
/// use hpx_sse::{EventSource, EventSourceConfig, transport::{SignalStream, TransportSignal}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = |_headers: http::HeaderMap| -> SignalStream {
///     stream::iter([TransportSignal::Completed]).boxed()
/// };
/// let source = EventSource::new(EventSourceConfig::default(), transport)?;
/// source.on_message(|event| println!("{:?}: {:?}", event.event_type(), event.data()));
/// source.add_event_listener("trade", |event| println!("trade {:?}", event.data()));
/// source.connect();
/// # Ok(())
/// # }
/// ```
pub struct EventSource {
    inner: Arc<Inner>,
}

impl EventSource {
    /// Create a closed event source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, or if no runtime was
    /// configured and the caller is not inside a Tokio runtime.
    pub fn new<T: Transport>(config: EventSourceConfig, transport: T) -> EventSourceResult<Self> {
        config.validate().map_err(EventSourceError::config)?;

        let runtime = match config.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| {
                EventSourceError::config("No Tokio runtime available; set one in EventSourceConfig")
            })?,
        };

        let state = EngineState {
            ready_state: ReadyState::Closed,
            generation: 0,
            retry: RetryState::new(config.retry_interval),
            last_event_id: config.last_event_id,
            connection_started: Instant::now(),
            parser: FrameParser::new(),
            watchdog: Watchdog::new(config.event_timeout, config.timeout_check_interval),
            subscription: None,
            reconnect_timer: None,
        };

        Ok(Self {
            inner: Arc::new(Inner {
                runtime,
                transport: Box::new(transport),
                headers: config.headers,
                state: Mutex::new(state),
                listeners: RwLock::new(ListenerRegistry::default()),
            }),
        })
    }

    /// Start connecting. Only has an effect while closed.
    pub fn connect(&self) {
        self.inner.connect();
    }

    /// Close the connection and cancel any pending reconnect. Idempotent.
    pub fn close(&self) {
        self.inner.close();
    }

    /// Set the callback invoked each time a connection opens.
    pub fn on_open<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.listeners.write().on_open = Some(Arc::new(callback));
    }

    /// Set the callback invoked before every reconnect.
    ///
    /// The error is `None` when the server ended the stream cleanly.
    pub fn on_error<F>(&self, callback: F)
    where
        F: Fn(Option<&EventSourceError>) + Send + Sync + 'static,
    {
        self.inner.listeners.write().on_error = Some(Arc::new(callback));
    }

    /// Set the callback invoked for every dispatched event.
    pub fn on_message<F>(&self, callback: F)
    where
        F: Fn(&MessageEvent) + Send + Sync + 'static,
    {
        self.inner.listeners.write().on_message = Some(Arc::new(callback));
    }

    /// Register a listener for events named `name`, replacing any previous
    /// listener for that name.
    pub fn add_event_listener<F>(&self, name: impl Into<String>, callback: F)
    where
        F: Fn(&MessageEvent) + Send + Sync + 'static,
    {
        self.inner.listeners.write().add(name, Arc::new(callback));
    }

    /// Remove the listener for `name`. Returns `true` if one was registered.
    pub fn remove_event_listener(&self, name: &str) -> bool {
        self.inner.listeners.write().remove(name)
    }

    /// Names with a registered listener, sorted.
    pub fn event_names(&self) -> Vec<String> {
        self.inner.listeners.read().names()
    }

    /// Current connection state.
    pub fn ready_state(&self) -> ReadyState {
        self.inner.ready_state()
    }

    /// The ID sent as `Last-Event-ID` on the next connection attempt.
    pub fn last_event_id(&self) -> Option<String> {
        self.inner.last_event_id()
    }

    /// Current base reconnect interval.
    pub fn retry_interval(&self) -> Duration {
        self.inner.retry_interval()
    }

    /// Reconnects scheduled since the last successful open.
    pub fn attempt_count(&self) -> u32 {
        self.inner.attempt_count()
    }

    /// A cloneable handle, e.g. for closing the source from a callback.
    pub fn handle(&self) -> EventSourceHandle {
        EventSourceHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl Drop for EventSource {
    fn drop(&mut self) {
        self.inner.close();
    }
}

impl fmt::Debug for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("ready_state", &self.ready_state())
            .field("last_event_id", &self.last_event_id())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// EventSourceHandle
// ---------------------------------------------------------------------------

/// Clone-able handle for controlling an [`EventSource`].
///
/// Does not keep the event source alive; once it is dropped every operation
/// is a no-op and the state reads as closed.
#[derive(Clone, Debug)]
pub struct EventSourceHandle {
    inner: Weak<Inner>,
}

impl EventSourceHandle {
    /// Start connecting. Only has an effect while closed.
    pub fn connect(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.connect();
        }
    }

    /// Close the connection. Idempotent.
    pub fn close(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.close();
        }
    }

    /// Current connection state.
    pub fn ready_state(&self) -> ReadyState {
        self.inner
            .upgrade()
            .map_or(ReadyState::Closed, |inner| inner.ready_state())
    }

    /// The ID sent as `Last-Event-ID` on the next connection attempt.
    pub fn last_event_id(&self) -> Option<String> {
        self.inner.upgrade().and_then(|inner| inner.last_event_id())
    }

    /// Reconnects scheduled since the last successful open.
    pub fn attempt_count(&self) -> u32 {
        self.inner.upgrade().map_or(0, |inner| inner.attempt_count())
    }
}

impl fmt::Debug for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use futures_util::stream;

    use super::*;
    use crate::transport::SignalStream;

    fn connected() -> TransportSignal {
        TransportSignal::Connected {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
        }
    }

    fn data(text: &'static str) -> TransportSignal {
        TransportSignal::Data(Bytes::from_static(text.as_bytes()))
    }

    #[tokio::test]
    async fn test_new_source_is_closed() {
        let source = EventSource::new(EventSourceConfig::default(), |_: HeaderMap| -> SignalStream {
            stream::pending().boxed()
        })
        .expect("create source");
        assert_eq!(source.ready_state(), ReadyState::Closed);
        assert!(source.last_event_id().is_none());
        assert_eq!(source.attempt_count(), 0);
        assert_eq!(source.retry_interval(), Duration::from_secs(3));
    }

    #[test]
    fn test_new_without_runtime_fails() {
        let result = EventSource::new(EventSourceConfig::default(), |_: HeaderMap| -> SignalStream {
            stream::pending().boxed()
        });
        assert!(matches!(result, Err(EventSourceError::Config { .. })));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = EventSourceConfig::new().timeout_check_interval(Duration::ZERO);
        let result = EventSource::new(config, |_: HeaderMap| -> SignalStream {
            stream::pending().boxed()
        });
        assert!(matches!(result, Err(EventSourceError::Config { .. })));
    }

    #[tokio::test]
    async fn test_request_headers() {
        let mut extra = HeaderMap::new();
        extra.insert("x-api-key", HeaderValue::from_static("k"));
        let config = EventSourceConfig::new().headers(extra);
        let source = EventSource::new(config, |_: HeaderMap| -> SignalStream {
            stream::pending().boxed()
        })
        .expect("create source");

        let headers = source.inner.request_headers(Some("evt-7"));
        assert_eq!(headers.get(ACCEPT).map(|v| v.as_bytes()), Some(&b"text/event-stream"[..]));
        assert_eq!(headers.get(CACHE_CONTROL).map(|v| v.as_bytes()), Some(&b"no-cache"[..]));
        assert_eq!(headers.get("last-event-id").map(|v| v.as_bytes()), Some(&b"evt-7"[..]));
        assert_eq!(headers.get("x-api-key").map(|v| v.as_bytes()), Some(&b"k"[..]));

        let headers = source.inner.request_headers(None);
        assert!(!headers.contains_key("last-event-id"));

        let headers = source.inner.request_headers(Some(""));
        assert!(!headers.contains_key("last-event-id"));

        let headers = source.inner.request_headers(Some("bad\nid"));
        assert!(!headers.contains_key("last-event-id"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_only_from_closed() {
        let opens = Arc::new(AtomicUsize::new(0));
        let transport = {
            let opens = Arc::clone(&opens);
            move |_: HeaderMap| -> SignalStream {
                opens.fetch_add(1, Ordering::SeqCst);
                stream::iter([connected()]).chain(stream::pending()).boxed()
            }
        };
        let source = EventSource::new(EventSourceConfig::default(), transport).expect("create source");

        source.connect();
        assert_eq!(source.ready_state(), ReadyState::Connecting);
        source.connect();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(source.ready_state(), ReadyState::Open);
        source.connect();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(opens.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_is_idempotent() {
        let source = EventSource::new(EventSourceConfig::default(), |_: HeaderMap| -> SignalStream {
            stream::iter([connected()]).chain(stream::pending()).boxed()
        })
        .expect("create source");

        source.close();
        assert_eq!(source.ready_state(), ReadyState::Closed);

        source.connect();
        tokio::time::sleep(Duration::from_millis(10)).await;
        source.close();
        source.close();
        assert_eq!(source.ready_state(), ReadyState::Closed);

        // Reconnecting after a close is allowed.
        source.connect();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(source.ready_state(), ReadyState::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nul_id_does_not_replace_last_event_id() {
        let source = EventSource::new(EventSourceConfig::default(), |_: HeaderMap| -> SignalStream {
            stream::iter([
                connected(),
                data("id: good\ndata: a\n\n"),
                data("id: b\0ad\ndata: b\n\n"),
            ])
            .chain(stream::pending())
            .boxed()
        })
        .expect("create source");

        let ids = Arc::new(Mutex::new(Vec::new()));
        {
            let ids = Arc::clone(&ids);
            source.on_message(move |event| ids.lock().push(event.id().map(str::to_string)));
        }

        source.connect();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(*ids.lock(), vec![Some("good".to_string()), Some("good".to_string())]);
        assert_eq!(source.last_event_id().as_deref(), Some("good"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_during_error_callback_is_ignored() {
        let source = EventSource::new(EventSourceConfig::default(), |_: HeaderMap| -> SignalStream {
            stream::iter([connected()]).chain(stream::pending()).boxed()
        })
        .expect("create source");
        source.connect();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(source.ready_state(), ReadyState::Open);
        let generation = source.inner.state.lock().generation;

        let errors = Arc::new(AtomicUsize::new(0));
        {
            let errors = Arc::clone(&errors);
            let engine = Arc::downgrade(&source.inner);
            source.on_error(move |_| {
                // A second failure of the same attempt lands mid-callback.
                if errors.fetch_add(1, Ordering::SeqCst) == 0
                    && let Some(inner) = engine.upgrade()
                {
                    inner.handle_failure(generation, Some(EventSourceError::transport("reset")));
                }
            });
        }

        source
            .inner
            .handle_failure(generation, Some(EventSourceError::timeout(Duration::from_secs(1))));

        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(source.attempt_count(), 1);
        assert_eq!(source.ready_state(), ReadyState::Connecting);
        assert!(source.inner.state.lock().reconnect_timer.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_saturated_reconnect_delay() {
        let config = EventSourceConfig::new().retry_interval(Duration::MAX);
        let source = EventSource::new(config, |_: HeaderMap| -> SignalStream {
            stream::iter([TransportSignal::Failed(EventSourceError::transport("refused"))]).boxed()
        })
        .expect("create source");

        source.connect();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(source.ready_state(), ReadyState::Connecting);
        assert_eq!(source.attempt_count(), 1);
        assert!(source.inner.state.lock().reconnect_timer.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_outlives_source() {
        let source = EventSource::new(EventSourceConfig::default(), |_: HeaderMap| -> SignalStream {
            stream::pending().boxed()
        })
        .expect("create source");
        let handle = source.handle();
        handle.connect();
        assert_eq!(handle.ready_state(), ReadyState::Connecting);

        drop(source);
        assert_eq!(handle.ready_state(), ReadyState::Closed);
        handle.connect();
        handle.close();
        assert_eq!(handle.attempt_count(), 0);
        assert!(handle.last_event_id().is_none());
    }

    #[tokio::test]
    async fn test_event_names() {
        let source = EventSource::new(EventSourceConfig::default(), |_: HeaderMap| -> SignalStream {
            stream::pending().boxed()
        })
        .expect("create source");

        source.add_event_listener("trade", |_| {});
        source.add_event_listener("book", |_| {});
        assert_eq!(source.event_names(), vec!["book", "trade"]);

        assert!(source.remove_event_listener("trade"));
        assert!(!source.remove_event_listener("trade"));
        assert_eq!(source.event_names(), vec!["book"]);
    }
}
