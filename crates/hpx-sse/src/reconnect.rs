use std::time::Duration;

/// Upper bound on any delay, as a multiple of the base interval.
const MAX_BACKOFF_FACTOR: u32 = 30;

/// Reconnect bookkeeping owned by the connection engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RetryState {
    /// Base interval, replaced whenever the server sends `retry:`.
    pub(crate) retry_interval: Duration,
    /// Reconnects scheduled since the last successful open.
    pub(crate) attempt_count: u32,
}

impl RetryState {
    pub(crate) fn new(retry_interval: Duration) -> Self {
        Self {
            retry_interval,
            attempt_count: 0,
        }
    }
}

/// Compute the delay before reconnect attempt number `attempt`.
///
/// The delay grows quadratically (`base + attempt² × base`) and is capped at
/// 30 × `base`. For every attempt after the first, the time the previous
/// connection stayed alive is subtracted, but the result never drops below
/// `base`.
///
/// ```
/// use std::time::Duration;
///
/// use hpx_sse::reconnect::next_delay;
///
/// let base = Duration::from_millis(500);
/// assert_eq!(next_delay(0, base, Duration::ZERO), base);
/// assert_eq!(next_delay(1, base, Duration::ZERO), Duration::from_secs(1));
/// assert_eq!(next_delay(10, base, Duration::ZERO), Duration::from_secs(15));
/// ```
pub fn next_delay(attempt: u32, base: Duration, last_connection: Duration) -> Duration {
    let backoff = base.saturating_mul(attempt.saturating_mul(attempt));
    let candidate = base
        .saturating_add(backoff)
        .min(base.saturating_mul(MAX_BACKOFF_FACTOR));

    if attempt == 0 {
        return candidate;
    }

    candidate.saturating_sub(last_connection).max(base)
}
