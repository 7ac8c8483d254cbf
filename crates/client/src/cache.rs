//! In-memory page cache.
//!
//! Maps routes to raw markup fetched once per session. Entries are immutable
//! after the first store and are never evicted automatically - the allow-list
//! is small and finite, so unbounded growth is accepted. The only
//! invalidation is an explicit [`PageCache::clear`].

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use esperanca_core::Route;

/// A page captured on first successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPage {
    pub route: Route,
    pub html: String,
}

/// Shared route → markup store.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    inner: Arc<RwLock<HashMap<Route, CachedPage>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cached markup for a route.
    pub async fn get(&self, route: &Route) -> Option<CachedPage> {
        self.inner.read().await.get(route).cloned()
    }

    /// Store markup for a route. The first store wins; a later store for the
    /// same route is ignored, preserving the entry's immutability.
    pub async fn store(&self, route: Route, html: String) {
        let mut map = self.inner.write().await;
        map.entry(route.clone()).or_insert_with(|| {
            tracing::debug!("cached page {}", route);
            CachedPage { route, html }
        });
    }

    pub async fn contains(&self, route: &Route) -> bool {
        self.inner.read().await.contains_key(route)
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        let mut map = self.inner.write().await;
        let dropped = map.len();
        map.clear();
        tracing::info!("page cache cleared ({} entries dropped)", dropped);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
