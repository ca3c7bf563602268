//! Fields recognized in one SSE frame.

/// The recognized fields of a single frame.
///
/// Every field is `None` unless the frame contained a line for it. Values are
/// kept as raw text; interpreting `retry` is up to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEvent {
    /// Value of the last `id:` line.
    pub id: Option<String>,
    /// Value of the last `event:` line.
    pub event: Option<String>,
    /// All `data:` lines joined by `\n`.
    pub data: Option<String>,
    /// Value of the last `retry:` line.
    pub retry: Option<String>,
}

impl ParsedEvent {
    /// Returns `true` if the frame carries nothing to dispatch.
    ///
    /// `retry` does not count: a frame with only a retry directive updates the
    /// reconnect interval but is never delivered to listeners.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.event.is_none() && self.data.is_none()
    }

    /// The `retry:` value as milliseconds, if it is a plain non-negative
    /// integer.
    pub fn retry_millis(&self) -> Option<u64> {
        let value = self.retry.as_deref()?;
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        value.parse().ok()
    }
}
