//! Callback registry for an event source.

use std::{collections::HashMap, sync::Arc};

use super::types::MessageEvent;
use crate::error::EventSourceError;

/// Callback invoked when a connection opens.
pub type OpenCallback = Arc<dyn Fn() + Send + Sync>;
/// Callback invoked on every error; `None` means the server ended the stream.
pub type ErrorCallback = Arc<dyn Fn(Option<&EventSourceError>) + Send + Sync>;
/// Callback invoked with a dispatched event.
pub type MessageCallback = Arc<dyn Fn(&MessageEvent) + Send + Sync>;

/// All user callbacks of one event source.
///
/// The engine clones the callbacks it needs out of the registry and invokes
/// them after releasing its locks.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    pub(crate) on_open: Option<OpenCallback>,
    pub(crate) on_error: Option<ErrorCallback>,
    pub(crate) on_message: Option<MessageCallback>,
    named: HashMap<String, MessageCallback>,
}

impl ListenerRegistry {
    /// Register `callback` for events named `name`, replacing any previous
    /// one.
    pub(crate) fn add(&mut self, name: impl Into<String>, callback: MessageCallback) {
        self.named.insert(name.into(), callback);
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.named.remove(name).is_some()
    }

    pub(crate) fn get(&self, name: &str) -> Option<MessageCallback> {
        self.named.get(name).cloned()
    }

    /// Registered event names, sorted.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.named.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Callbacks for one dispatch: the catch-all first, then the listener
    /// for the event's name.
    pub(crate) fn message_targets(&self, event: Option<&str>) -> Vec<MessageCallback> {
        self.on_message
            .iter()
            .cloned()
            .chain(event.and_then(|name| self.get(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting(counter: &Arc<AtomicUsize>, by: usize) -> MessageCallback {
        let counter = Arc::clone(counter);
        Arc::new(move |_: &MessageEvent| {
            counter.fetch_add(by, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_last_registration_wins() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ListenerRegistry::default();
        registry.add("update", counting(&hits, 1));
        registry.add("update", counting(&hits, 10));

        assert_eq!(registry.names(), vec!["update"]);
        let event = MessageEvent::default();
        for callback in registry.message_targets(Some("update")) {
            callback(&event);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_remove() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ListenerRegistry::default();
        registry.add("a", counting(&hits, 1));
        registry.add("b", counting(&hits, 1));

        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        assert_eq!(registry.names(), vec!["b"]);
        assert!(registry.get("a").is_none());
    }

    #[test]
    fn test_names_are_sorted() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ListenerRegistry::default();
        for name in ["trade", "book", "ticker"] {
            registry.add(name, counting(&hits, 1));
        }
        assert_eq!(registry.names(), vec!["book", "ticker", "trade"]);
    }

    #[test]
    fn test_message_targets() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ListenerRegistry::default();
        assert!(registry.message_targets(Some("trade")).is_empty());

        registry.on_message = Some(counting(&hits, 1));
        registry.add("trade", counting(&hits, 100));

        assert_eq!(registry.message_targets(None).len(), 1);
        assert_eq!(registry.message_targets(Some("book")).len(), 1);
        assert_eq!(registry.message_targets(Some("trade")).len(), 2);
    }
}
