//! Esperança navigation engine entry point.
//!
//! Loads the layered configuration, fetches the starting page, then drives
//! the navigator through the hrefs given on the command line, printing each
//! outcome as JSON on stdout. After the clicks are handled, the remaining
//! allow-listed pages are pre-warmed into the cache. Logging goes to stderr
//! so stdout stays machine-readable.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use esperanca_client::{FetchClient, FetchConfig, PageSource};
use esperanca_core::{AppConfig, Route};
use esperanca_engine::{ClickedLink, LiveDocument, Navigator};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(base_url = %config.base_url, routes = config.routes.len(), "starting navigation engine");

    let fetch_config =
        FetchConfig { user_agent: config.user_agent.clone(), max_bytes: config.max_bytes, timeout: config.timeout() };
    let source = Arc::new(FetchClient::new(&config.base_url, fetch_config)?);

    let start = config.routes.first().map(|r| Route::new(r.as_str())).context("no routes configured")?;
    let html = source.fetch_page(&start).await.context("failed to load the starting page")?;
    let doc = LiveDocument::from_html(&html, &config.default_title);

    let mut navigator = Navigator::new(&config, source, doc, start);

    for href in std::env::args().skip(1) {
        let outcome = navigator.handle_click(&ClickedLink::new(&href)).await;
        println!("{}", serde_json::to_string(&serde_json::json!({ "href": href, "outcome": outcome }))?);
    }

    tokio::time::sleep(Duration::from_millis(config.prewarm_initial_delay_ms)).await;
    navigator.prewarm().await;
    tracing::info!(cached = navigator.cache().len().await, "pre-warm pass finished");

    Ok(())
}
