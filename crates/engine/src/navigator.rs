//! Navigation orchestration.
//!
//! The [`Navigator`] ties the pieces together: link classification, the
//! page cache, retrieval, content extraction, the swap, history commits,
//! and the completion broadcast. Every failure degrades to an explicit
//! [`NavOutcome`] the caller can act on (fall back to a normal page load,
//! ignore the click) instead of leaving the document half-swapped: the
//! history commit and the completion event only happen after a successful
//! swap.

use std::sync::Arc;
use std::time::Duration;

use esperanca_client::{PageCache, PageSource, extract_page};
use esperanca_core::{AppConfig, EventBus, Route, RouteSet, SiteEvent};
use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::dom::LiveDocument;
use crate::history::{History, HistoryState, PopEvent};
use crate::intercept::{ClickedLink, Decision, LinkInterceptor};
use crate::reinit::{Reinitializer, SiteReinitializer};
use crate::swap::{TransitionConfig, swap};

/// How a navigation request concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NavOutcome {
    /// Content swapped, history committed, event broadcast.
    Completed { route: Route, title: String },
    /// The link is not ours; default handling applies.
    NotHandled,
    /// Retrieval failed; the caller should load the route normally.
    Fallback(Route),
    /// The swap itself failed; the document was left untouched.
    SwapFailed,
    /// A history pop arrived without state; only a full reload recovers.
    FullReload,
}

/// Orchestrates in-app navigation over a modeled document.
pub struct Navigator {
    routes: RouteSet,
    interceptor: LinkInterceptor,
    default_title: String,
    transition: TransitionConfig,
    prewarm_delay: Duration,
    source: Arc<dyn PageSource>,
    cache: PageCache,
    doc: LiveDocument,
    history: History,
    events: EventBus,
    reinit: Box<dyn Reinitializer>,
    current: Route,
}

impl Navigator {
    /// Build a navigator over an already-loaded document.
    ///
    /// The current entry is stamped with the starting route so that
    /// returning to it later pops with usable state, and the nav highlight
    /// is applied immediately.
    pub fn new(config: &AppConfig, source: Arc<dyn PageSource>, mut doc: LiveDocument, current: Route) -> Self {
        let routes = config.route_set();
        let events = EventBus::default();
        let reinit: Box<dyn Reinitializer> = Box::new(SiteReinitializer::new(events.clone()));

        let mut history = History::new();
        history.replace(HistoryState::new(current.as_str()));
        doc.set_active_route(&current);

        Self {
            interceptor: LinkInterceptor::new(routes.clone()),
            routes,
            default_title: config.default_title.clone(),
            transition: TransitionConfig { enabled: config.transitions_enabled, duration: config.transition() },
            prewarm_delay: Duration::from_millis(config.prewarm_delay_ms),
            source,
            cache: PageCache::new(),
            doc,
            history,
            events,
            reinit,
            current,
        }
    }

    /// Handle an activated link: classify it, then navigate if it is ours.
    pub async fn handle_click(&mut self, link: &ClickedLink) -> NavOutcome {
        match self.interceptor.decide(link) {
            Decision::Navigate(route) => self.navigate_to(route, true).await,
            Decision::PassThrough(reason) => {
                debug!(?reason, "link passed through to default handling");
                NavOutcome::NotHandled
            }
        }
    }

    /// Navigate to an href, pushing a history entry on success.
    pub async fn navigate(&mut self, href: &str) -> NavOutcome {
        match self.routes.resolve(href) {
            Some(route) => self.navigate_to(route, true).await,
            None => {
                debug!(href, "navigation target outside the allow-list");
                NavOutcome::NotHandled
            }
        }
    }

    /// Handle a history pop: re-render the stored route without touching
    /// the stack, or demand a full reload when the entry carries no state.
    ///
    /// The stored route passes through the same allow-list check as a
    /// clicked link; stale or foreign state is refused rather than swapped.
    pub async fn handle_pop(&mut self, event: &PopEvent) -> NavOutcome {
        match &event.state {
            Some(state) => match self.routes.resolve(&state.route) {
                Some(route) => self.navigate_to(route, false).await,
                None => {
                    warn!(route = %state.route, "history state outside the allow-list, refusing");
                    NavOutcome::NotHandled
                }
            },
            None => {
                warn!("history entry without navigation state, full reload required");
                NavOutcome::FullReload
            }
        }
    }

    async fn navigate_to(&mut self, route: Route, push: bool) -> NavOutcome {
        let html = match self.fetch_cached(&route).await {
            Ok(html) => html,
            Err(err) => {
                warn!(route = route.as_str(), error = %err, "retrieval failed, falling back to a normal load");
                return NavOutcome::Fallback(route);
            }
        };

        let page = extract_page(&html, &self.default_title);
        if let Err(err) = swap(&mut self.doc, &page.content, &page.title, self.transition, self.reinit.as_ref(), &route).await
        {
            warn!(route = route.as_str(), error = %err, "content swap failed");
            return NavOutcome::SwapFailed;
        }

        if push {
            self.history.push(HistoryState::new(route.as_str()));
        } else {
            self.history.replace(HistoryState::new(route.as_str()));
        }
        self.current = route.clone();

        let listeners =
            self.events.emit(SiteEvent::NavigationCompleted { route: route.clone(), title: page.title.clone() });
        info!(route = route.as_str(), title = %page.title, listeners, "navigation completed");

        NavOutcome::Completed { route, title: page.title }
    }

    /// Fetch a page through the cache. Each route hits the network at most
    /// once per session; later requests are served from memory.
    async fn fetch_cached(&self, route: &Route) -> Result<String, esperanca_core::Error> {
        if let Some(cached) = self.cache.get(route).await {
            debug!(route = route.as_str(), "cache hit");
            return Ok(cached.html);
        }
        let html = self.source.fetch_page(route).await?;
        self.cache.store(route.clone(), html.clone()).await;
        Ok(html)
    }

    /// Sequentially warm the cache with every route but the current one.
    ///
    /// Best effort: a failed fetch is logged and skipped, and anything
    /// already cached is left alone. The configured delay runs before each
    /// fetch to keep the loop polite.
    pub async fn prewarm(&self) {
        for route in &self.routes {
            if *route == self.current || self.cache.contains(route).await {
                continue;
            }
            sleep(self.prewarm_delay).await;
            match self.source.fetch_page(route).await {
                Ok(html) => {
                    self.cache.store(route.clone(), html).await;
                    debug!(route = route.as_str(), "pre-warmed");
                }
                Err(err) => debug!(route = route.as_str(), error = %err, "pre-warm fetch failed, skipping"),
            }
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub fn current_route(&self) -> &Route {
        &self.current
    }

    pub fn document(&self) -> &LiveDocument {
        &self.doc
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use esperanca_core::Error;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSite {
        pages: HashMap<&'static str, &'static str>,
        fetches: AtomicUsize,
    }

    impl FakeSite {
        fn new() -> Self {
            let mut pages = HashMap::new();
            pages.insert(
                "index.html",
                r#"<html><head><title>Início - Instituto Esperança</title></head><body>
                <nav><a href="index.html">Início</a><a href="projetos.html">Projetos</a></nav>
                <main><section><h1>Bem-vindo</h1></section></main></body></html>"#,
            );
            pages.insert(
                "projetos.html",
                r#"<html><head><title>Projetos - Instituto Esperança</title></head><body>
                <nav><a href="index.html">Início</a><a href="projetos.html">Projetos</a></nav>
                <main><section><h2>Alfabetização</h2></section><section><h2>Horta</h2></section></main></body></html>"#,
            );
            Self { pages, fetches: AtomicUsize::new(0) }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageSource for FakeSite {
        async fn fetch_page(&self, route: &Route) -> Result<String, Error> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(route.as_str())
                .map(|html| html.to_string())
                .ok_or_else(|| Error::Retrieval(format!("status 404 for {route}")))
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            routes: vec!["index.html".into(), "projetos.html".into(), "cadastro.html".into()],
            transitions_enabled: false,
            prewarm_delay_ms: 0,
            ..AppConfig::default()
        }
    }

    async fn navigator(site: Arc<FakeSite>) -> Navigator {
        let html = site.fetch_page(&Route::new("index.html")).await.unwrap();
        let doc = LiveDocument::from_html(&html, "Instituto Esperança");
        Navigator::new(&config(), site, doc, Route::new("index.html"))
    }

    #[tokio::test]
    async fn test_navigate_swaps_commits_and_broadcasts() {
        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(site).await;
        let mut rx = nav.events().subscribe();

        let outcome = nav.navigate("projetos.html").await;

        assert_eq!(
            outcome,
            NavOutcome::Completed {
                route: Route::new("projetos.html"),
                title: "Projetos - Instituto Esperança".to_string()
            }
        );
        assert_eq!(nav.document().title(), "Projetos - Instituto Esperança");
        assert_eq!(nav.document().sections().len(), 2);
        assert_eq!(nav.document().active_hrefs(), vec!["projetos.html"]);
        assert_eq!(nav.history().len(), 2);
        assert_eq!(nav.current_route().as_str(), "projetos.html");

        assert_eq!(rx.try_recv().unwrap(), SiteEvent::ContentReady);
        assert_eq!(
            rx.try_recv().unwrap(),
            SiteEvent::NavigationCompleted {
                route: Route::new("projetos.html"),
                title: "Projetos - Instituto Esperança".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_each_route_fetched_at_most_once() {
        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(Arc::clone(&site)).await;
        let initial = site.fetch_count();

        nav.navigate("projetos.html").await;
        nav.navigate("index.html").await;
        nav.navigate("projetos.html").await;
        nav.navigate("index.html").await;

        // one fetch for each of the two routes, everything after is cached
        assert_eq!(site.fetch_count() - initial, 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_without_mutating() {
        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(site).await;
        let title_before = nav.document().title().to_string();

        let outcome = nav.navigate("cadastro.html").await;

        assert_eq!(outcome, NavOutcome::Fallback(Route::new("cadastro.html")));
        assert_eq!(nav.document().title(), title_before);
        assert_eq!(nav.history().len(), 1);
        assert_eq!(nav.current_route().as_str(), "index.html");
    }

    #[tokio::test]
    async fn test_unknown_route_not_handled() {
        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(site).await;

        let outcome = nav.navigate("blog.html").await;

        assert_eq!(outcome, NavOutcome::NotHandled);
        assert_eq!(nav.history().len(), 1);
    }

    #[tokio::test]
    async fn test_click_on_external_link_not_handled() {
        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(site).await;

        let outcome = nav.handle_click(&ClickedLink::new("https://viacep.com.br")).await;
        assert_eq!(outcome, NavOutcome::NotHandled);
    }

    #[tokio::test]
    async fn test_pop_with_state_rerenders_without_pushing() {
        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(site).await;
        nav.navigate("projetos.html").await;

        let pop = nav.history_mut().back().unwrap();
        let outcome = nav.handle_pop(&pop).await;

        assert!(matches!(outcome, NavOutcome::Completed { route, .. } if route.as_str() == "index.html"));
        assert_eq!(nav.document().title(), "Início - Instituto Esperança");
        assert_eq!(nav.history().len(), 2);
    }

    #[tokio::test]
    async fn test_pop_with_foreign_state_refused() {
        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(site).await;
        let title_before = nav.document().title().to_string();

        // state survived an allow-list change (or was crafted); never swap it
        let pop = PopEvent { state: Some(HistoryState::new("extra.html")) };
        let outcome = nav.handle_pop(&pop).await;

        assert_eq!(outcome, NavOutcome::NotHandled);
        assert_eq!(nav.document().title(), title_before);
        assert_eq!(nav.current_route().as_str(), "index.html");
    }

    #[tokio::test]
    async fn test_pop_without_state_demands_full_reload() {
        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(site).await;

        let outcome = nav.handle_pop(&PopEvent { state: None }).await;
        assert_eq!(outcome, NavOutcome::FullReload);
    }

    #[tokio::test]
    async fn test_swap_failure_leaves_history_alone() {
        let site = Arc::new(FakeSite::new());
        let doc = LiveDocument::without_main("Quebrado");
        let mut nav = Navigator::new(&config(), site, doc, Route::new("index.html"));

        let outcome = nav.navigate("projetos.html").await;

        assert_eq!(outcome, NavOutcome::SwapFailed);
        assert_eq!(nav.history().len(), 1);
        assert_eq!(nav.current_route().as_str(), "index.html");
    }

    #[tokio::test]
    async fn test_prewarm_fills_cache_and_skips_failures() {
        let site = Arc::new(FakeSite::new());
        let nav = navigator(Arc::clone(&site)).await;
        nav.cache.store(Route::new("index.html"), "cached".to_string()).await;

        nav.prewarm().await;

        // projetos fetched; cadastro 404s and is skipped; index skipped as current
        assert!(nav.cache().contains(&Route::new("projetos.html")).await);
        assert!(!nav.cache().contains(&Route::new("cadastro.html")).await);
    }

    #[tokio::test]
    async fn test_content_ready_rebind_is_idempotent() {
        use esperanca_forms::binder::MaskBinder;

        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(site).await;
        let mut rx = nav.events().subscribe();
        let mut binder = MaskBinder::new();
        let field_ids = ["cpf", "telefone", "cep"];

        nav.navigate("projetos.html").await;
        nav.navigate("index.html").await;

        // every swap announces ContentReady; rebinding on each must not stack
        let mut bound = 0;
        while let Ok(event) = rx.try_recv() {
            if event == SiteEvent::ContentReady {
                bound = binder.bind_defaults(field_ids);
            }
        }
        assert_eq!(bound, 0, "second pass binds nothing new");
        assert_eq!(binder.apply("cpf", "52998224725").as_deref(), Some("529.982.247-25"));
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let site = Arc::new(FakeSite::new());
        let mut nav = navigator(Arc::clone(&site)).await;

        nav.navigate("projetos.html").await;
        let before = site.fetch_count();
        nav.clear_cache().await;
        nav.navigate("projetos.html").await;

        assert_eq!(site.fetch_count(), before + 1);
    }
}
