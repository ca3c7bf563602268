//! Event source configuration.

use std::time::Duration;

use http::HeaderMap;
use tokio::runtime::Handle;

/// Default base reconnect interval, used until the server sends `retry:`.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(3);

/// Default interval between two liveness checks.
pub const DEFAULT_TIMEOUT_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for an [`EventSource`](super::EventSource).
///
/// Provides sensible defaults and chainable setter methods.
#[derive(Clone, Debug)]
pub struct EventSourceConfig {
    /// Runtime that runs transport I/O and timers. `None` uses the runtime
    /// the event source is created on.
    pub runtime: Option<Handle>,
    /// Maximum silence on an open connection before it is considered dead.
    /// `None` disables the liveness watchdog.
    pub event_timeout: Option<Duration>,
    /// How often the watchdog compares the silence against `event_timeout`.
    pub timeout_check_interval: Duration,
    /// Base reconnect interval until the server overrides it.
    pub retry_interval: Duration,
    /// Additional headers for every connection attempt.
    pub headers: HeaderMap,
    /// Event ID to resume from on the first connection.
    pub last_event_id: Option<String>,
}

impl Default for EventSourceConfig {
    fn default() -> Self {
        Self {
            runtime: None,
            event_timeout: None,
            timeout_check_interval: DEFAULT_TIMEOUT_CHECK_INTERVAL,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            headers: HeaderMap::new(),
            last_event_id: None,
        }
    }
}

impl EventSourceConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime used for I/O and timers.
    #[must_use]
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Set the event timeout (`None` disables the watchdog).
    #[must_use]
    pub fn event_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.event_timeout = timeout;
        self
    }

    /// Set the watchdog check interval.
    #[must_use]
    pub fn timeout_check_interval(mut self, interval: Duration) -> Self {
        self.timeout_check_interval = interval;
        self
    }

    /// Set the initial base reconnect interval.
    #[must_use]
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Set additional request headers.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Resume from the given event ID.
    #[must_use]
    pub fn last_event_id(mut self, id: impl Into<String>) -> Self {
        self.last_event_id = Some(id.into());
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error message string if any field has an invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_check_interval.is_zero() {
            return Err("Timeout check interval must be > 0".to_string());
        }
        if let Some(timeout) = self.event_timeout
            && self.timeout_check_interval >= timeout
        {
            return Err("Timeout check interval must be smaller than the event timeout".to_string());
        }
        if self
            .last_event_id
            .as_deref()
            .is_some_and(|id| id.contains('\0'))
        {
            return Err("Last event ID must not contain NUL".to_string());
        }
        Ok(())
    }
}
