//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `routes` is empty or contains a name with a path separator
    /// - `base_url` is not an absolute http(s) URL
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `transition_ms` exceeds 10 seconds
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routes.is_empty() {
            return Err(ConfigError::Invalid { field: "routes".into(), reason: "allow-list must not be empty".into() });
        }
        for route in &self.routes {
            if route.is_empty() || route.contains('/') {
                return Err(ConfigError::Invalid {
                    field: "routes".into(),
                    reason: format!("route {route:?} must be a bare page name"),
                });
            }
        }

        match url::Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigError::Invalid {
                    field: "base_url".into(),
                    reason: format!("unsupported scheme: {}", parsed.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid { field: "base_url".into(), reason: e.to_string() });
            }
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.transition_ms > 10_000 {
            return Err(ConfigError::Invalid {
                field: "transition_ms".into(),
                reason: "must not exceed 10 seconds".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        Ok(())
    }
}
