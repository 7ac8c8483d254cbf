//! Unified error types for the Esperança site engine.
//!
//! Every failure path degrades to fallback navigation or a no-op, never to a
//! stuck document, so these errors are signals for the orchestrator rather
//! than conditions surfaced to a user.

/// Unified error type shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure or non-success status while retrieving a page.
    #[error("RETRIEVAL_FAILURE: {0}")]
    Retrieval(String),

    /// Response body exceeded the configured byte cap.
    #[error("PAGE_TOO_LARGE: {0}")]
    PageTooLarge(String),

    /// The live document has no primary content region to swap.
    #[error("TARGET_MISSING: {0}")]
    TargetMissing(String),

    /// Attempted navigation to a route outside the allow-list.
    #[error("ROUTE_NOT_ELIGIBLE: {0}")]
    RouteNotEligible(String),

    /// A history pop event arrived without its expected state payload.
    #[error("HISTORY_STATE_LOST")]
    HistoryStateLost,

    /// Invalid or unresolvable URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Invalid input parameters (e.g., malformed CEP).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The queried CEP is not present in the ViaCEP database.
    #[error("CEP_NOT_FOUND: {0}")]
    CepNotFound(String),
}

impl Error {
    /// Whether the orchestrator recovers from this error by handing the
    /// navigation back to the host browser.
    pub fn falls_back_to_browser(&self) -> bool {
        matches!(self, Error::Retrieval(_) | Error::PageTooLarge(_) | Error::HistoryStateLost)
    }
}
