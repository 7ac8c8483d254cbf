//! Site-wide event broadcast.
//!
//! Collaborators (analytics, the mask binder) observe navigation without the
//! orchestrator knowing about them. The bus wraps a tokio broadcast channel;
//! emitting with no subscribers is a no-op, not an error.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::route::Route;

/// Events published on the site bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteEvent {
    /// A navigation completed: content swapped, title applied, history
    /// committed.
    NavigationCompleted { route: Route, title: String },

    /// Fresh content is attached to the document; form enhancements may
    /// rebind their fields.
    ContentReady,
}

/// Broadcast bus for [`SiteEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SiteEvent>,
}

impl EventBus {
    /// Create a bus with the given subscriber backlog capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Returns the number of subscribers that received it.
    pub fn emit(&self, event: SiteEvent) -> usize {
        match self.tx.send(event) {
            Ok(n) => n,
            Err(_) => 0, // nobody listening
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_without_subscribers_is_noop() {
        let bus = EventBus::default();
        assert_eq!(bus.emit(SiteEvent::ContentReady), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_navigation_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let sent = SiteEvent::NavigationCompleted {
            route: Route::new("projetos.html"),
            title: "Projetos - Instituto Esperança".to_string(),
        };
        assert_eq!(bus.emit(sent.clone()), 1);
        assert_eq!(rx.recv().await.unwrap(), sent);
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        assert_eq!(bus.emit(SiteEvent::ContentReady), 2);
        assert_eq!(a.recv().await.unwrap(), SiteEvent::ContentReady);
        assert_eq!(b.recv().await.unwrap(), SiteEvent::ContentReady);
    }

    #[test]
    fn test_event_serializes() {
        let event = SiteEvent::NavigationCompleted { route: Route::new("index.html"), title: "Início".to_string() };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("index.html"));
        assert!(json.contains("Início"));
    }
}
