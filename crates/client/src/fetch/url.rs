//! Base-URL canonicalization and per-route resolution.

use esperanca_core::Route;

/// Error type for URL resolution failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize the site base URL.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Ensure the path ends with `/` so route joins append instead of
///    replacing the final segment
pub fn canonicalize_base(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }

    Ok(parsed)
}

/// Resolve a route's page URL against the canonical base.
pub fn page_url(base: &url::Url, route: &Route) -> Result<url::Url, UrlError> {
    base.join(route.as_str()).map_err(|e| UrlError::InvalidUrl(e.to_string()))
}
