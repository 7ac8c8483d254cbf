//! Link interception.
//!
//! Classifies an activated link into "the navigation layer handles this"
//! versus "let the platform do its default thing". The guard order is
//! fixed: href presence, external schemes, same-page anchors, explicit
//! targets, downloads, and finally the internal allowlist. Only a link
//! that clears every guard becomes an internal navigation.

use esperanca_core::{Route, RouteSet};
use tracing::debug;

/// The attributes of an activated link that decide its handling.
#[derive(Debug, Clone, Default)]
pub struct ClickedLink {
    pub href: Option<String>,
    /// Browsing-context target (`_blank` etc.), if the author set one.
    pub target: Option<String>,
    pub download: bool,
}

impl ClickedLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: Some(href.into()), target: None, download: false }
    }
}

/// Why a link was left to default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    NoHref,
    ExternalScheme,
    Anchor,
    NewContext,
    Download,
    NotEligible,
}

/// Outcome of classifying a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Intercept and navigate internally.
    Navigate(Route),
    /// Default handling; the reason is recorded for diagnostics.
    PassThrough(PassReason),
}

/// Classifies activated links against the internal page allowlist.
#[derive(Debug, Clone)]
pub struct LinkInterceptor {
    routes: RouteSet,
}

impl LinkInterceptor {
    pub fn new(routes: RouteSet) -> Self {
        Self { routes }
    }

    /// Decide how an activated link should be handled.
    pub fn decide(&self, link: &ClickedLink) -> Decision {
        let Some(href) = link.href.as_deref() else {
            return Decision::PassThrough(PassReason::NoHref);
        };
        if href.is_empty() {
            return Decision::PassThrough(PassReason::NoHref);
        }
        // Absolute URLs and non-navigational schemes are never ours, even
        // when the absolute URL happens to point at one of our own pages.
        if href.starts_with("http") || href.starts_with("mailto:") || href.starts_with("tel:") {
            return Decision::PassThrough(PassReason::ExternalScheme);
        }
        if href.starts_with('#') {
            return Decision::PassThrough(PassReason::Anchor);
        }
        if link.target.is_some() {
            return Decision::PassThrough(PassReason::NewContext);
        }
        if link.download {
            return Decision::PassThrough(PassReason::Download);
        }

        match self.routes.resolve(href) {
            Some(route) => Decision::Navigate(route),
            None => {
                debug!(href, "link outside the internal allowlist, passing through");
                Decision::PassThrough(PassReason::NotEligible)
            }
        }
    }
}
