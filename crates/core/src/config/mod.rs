//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (ESPERANCA_*)
//! 2. TOML config file (if ESPERANCA_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::route::RouteSet;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (ESPERANCA_*)
/// 2. TOML config file (if ESPERANCA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL the site is served from.
    ///
    /// Set via ESPERANCA_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Ordered allow-list of pages eligible for in-app navigation.
    ///
    /// Set via ESPERANCA_ROUTES environment variable (comma-separated).
    #[serde(default = "default_routes")]
    pub routes: Vec<String>,

    /// Title applied when a fetched page declares none.
    #[serde(default = "default_title")]
    pub default_title: String,

    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per page.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Whether content swaps use the timed fade transition.
    #[serde(default = "default_true")]
    pub transitions_enabled: bool,

    /// Fade-out duration in milliseconds.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    /// Delay between pre-warm fetches in milliseconds.
    #[serde(default = "default_prewarm_delay_ms")]
    pub prewarm_delay_ms: u64,

    /// Delay before the pre-warm loop starts, in milliseconds.
    #[serde(default = "default_prewarm_initial_delay_ms")]
    pub prewarm_initial_delay_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/".into()
}

fn default_routes() -> Vec<String> {
    ["index.html", "projetos.html", "cadastro.html", "relatorios.html", "sucesso.html"]
        .map(String::from)
        .to_vec()
}

fn default_title() -> String {
    "Instituto Esperança".into()
}

fn default_user_agent() -> String {
    "esperanca/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_true() -> bool {
    true
}

fn default_transition_ms() -> u64 {
    300
}

fn default_prewarm_delay_ms() -> u64 {
    2_000
}

fn default_prewarm_initial_delay_ms() -> u64 {
    3_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            routes: default_routes(),
            default_title: default_title(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            transitions_enabled: true,
            transition_ms: default_transition_ms(),
            prewarm_delay_ms: default_prewarm_delay_ms(),
            prewarm_initial_delay_ms: default_prewarm_initial_delay_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Fade-out duration as Duration.
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Routes as a typed allow-list.
    pub fn route_set(&self) -> RouteSet {
        RouteSet::new(self.routes.iter().cloned())
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `ESPERANCA_`
    /// 2. TOML file from `ESPERANCA_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("ESPERANCA_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("ESPERANCA_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        tracing::debug!(base_url = %config.base_url, routes = config.routes.len(), "configuration loaded");

        Ok(config)
    }
}
