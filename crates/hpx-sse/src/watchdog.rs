//! Liveness detection for open event streams.
//!
//! A server that stops sending without closing the socket leaves the client
//! waiting forever. The [`Watchdog`] checks periodically how long ago the
//! last event arrived and fires once that exceeds the configured timeout.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::debug;

/// Upper bound on the check period; keeps tick deadlines representable.
const MAX_CHECK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Periodic stall detector.
///
/// Created stopped. [`start`](Self::start) spawns the check task, which runs
/// until it either fires or is stopped.
#[derive(Debug)]
pub struct Watchdog {
    timeout: Option<Duration>,
    check_interval: Duration,
    last_event: Arc<Mutex<Instant>>,
    task: Option<JoinHandle<()>>,
}

impl Watchdog {
    /// Create a stopped watchdog. A `timeout` of `None` disables it.
    pub fn new(timeout: Option<Duration>, check_interval: Duration) -> Self {
        Self {
            timeout,
            check_interval,
            last_event: Arc::new(Mutex::new(Instant::now())),
            task: None,
        }
    }

    /// Start checking, with `anchor` as the time of the last event.
    ///
    /// Any running check task is replaced. `on_timeout` is invoked at most
    /// once, from the check task, after which the watchdog is stopped until
    /// the next `start`. Does nothing when no timeout is configured.
    pub fn start<F>(&mut self, runtime: &Handle, anchor: Instant, on_timeout: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.stop();
        let Some(timeout) = self.timeout else {
            return;
        };
        *self.last_event.lock() = anchor;

        let last_event = Arc::clone(&self.last_event);
        let check_interval = self.check_interval.min(MAX_CHECK_INTERVAL);
        self.task = Some(runtime.spawn(async move {
            let mut ticker =
                tokio::time::interval_at(Instant::now() + check_interval, check_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let silent_for = last_event.lock().elapsed();
                if silent_for >= timeout {
                    debug!(
                        silent_ms = u64::try_from(silent_for.as_millis()).unwrap_or(u64::MAX),
                        timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                        "No SSE event within timeout"
                    );
                    on_timeout();
                    return;
                }
            }
        }));
    }

    /// The configured timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Record that an event just arrived.
    pub fn touch(&self) {
        *self.last_event.lock() = Instant::now();
    }

    /// Stop checking. Stopping a stopped watchdog is a no-op.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Returns `true` while a check task is scheduled and has not fired.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.stop();
    }
}
