//! HTTP page retrieval.
//!
//! ### Contract
//! - One GET per call: no retries, no streaming, no custom headers beyond
//!   Accept. A failure is terminal for that call; the orchestrator decides
//!   the fallback.
//! - Non-success statuses are retrieval failures, never partial results.
//! - Bodies over `max_bytes` are rejected.
//!
//! The [`PageSource`] trait is the seam the orchestrator fetches through, so
//! tests can substitute an in-memory site for the network.

pub mod url;

use async_trait::async_trait;
use reqwest::{Client, Url, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, canonicalize_base, page_url};

use esperanca_core::{Error, Route};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "esperanca/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: "esperanca/0.1".to_string(), max_bytes: 5 * 1024 * 1024, timeout: Duration::from_millis(20000) }
    }
}

/// Source of raw page markup, keyed by route.
///
/// Implemented over HTTP by [`FetchClient`]; tests implement it over an
/// in-memory map.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Retrieve the raw markup for a route.
    async fn fetch_page(&self, route: &Route) -> Result<String, Error>;
}

/// HTTP page fetcher bound to the site's base URL.
pub struct FetchClient {
    http: Client,
    base: Url,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client for the given base URL.
    pub fn new(base_url: &str, config: FetchConfig) -> Result<Self, Error> {
        let base = canonicalize_base(base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Retrieval(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base, config })
    }

    /// The canonical base URL pages are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl PageSource for FetchClient {
    async fn fetch_page(&self, route: &Route) -> Result<String, Error> {
        let start = Instant::now();
        let url = page_url(&self.base, route).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| Error::Retrieval(format!("network error for {}: {}", route, e)))?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::Retrieval(format!("status {} for {}", status.as_u16(), route)));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::PageTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Retrieval(format!("failed to read response for {}: {}", route, e)))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::PageTooLarge(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        tracing::debug!("fetched {} in {}ms ({} bytes)", url, start.elapsed().as_millis(), bytes.len());

        Ok(String::from_utf8_lossy(&bytes).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "esperanca/0.1");
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(20000));
    }

    #[test]
    fn test_fetch_client_new() {
        let client = FetchClient::new("http://localhost:8080", FetchConfig::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_fetch_client_rejects_bad_base() {
        let client = FetchClient::new("ftp://server/site", FetchConfig::default());
        assert!(matches!(client, Err(Error::InvalidUrl(_))));
    }
}
