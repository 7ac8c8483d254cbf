//! Post-swap re-initialization.
//!
//! After new content lands in the primary region, page behaviors that were
//! wired to the old content have to be re-established: the entrance
//! animations are re-armed, the nav highlight moves to the new page, the
//! responsive menu is closed, and a content-ready event is broadcast so
//! collaborators (mask binding, form validation) can re-attach themselves.
//! The orchestrator calls this directly rather than relying on listeners
//! racing a broadcast.

use esperanca_core::{EventBus, Route, SiteEvent};
use tracing::debug;

use crate::dom::LiveDocument;

/// Re-establishes page behaviors over freshly swapped content.
pub trait Reinitializer: Send + Sync {
    fn refresh(&self, doc: &mut LiveDocument, current: &Route);
}

/// The site's standard reinitializer.
pub struct SiteReinitializer {
    events: EventBus,
}

impl SiteReinitializer {
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }
}

impl Reinitializer for SiteReinitializer {
    fn refresh(&self, doc: &mut LiveDocument, current: &Route) {
        doc.rearm_sections();
        doc.set_active_route(current);
        doc.close_menu();
        let listeners = self.events.emit(SiteEvent::ContentReady);
        debug!(route = current.as_str(), listeners, "content re-initialized");
    }
}
