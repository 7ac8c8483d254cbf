//! Core types and shared functionality for the Esperança site engine.
//!
//! This crate provides:
//! - Route identifiers and the allow-list of in-app pages
//! - Unified error types
//! - Configuration structures
//! - The site-wide event bus

pub mod config;
pub mod error;
pub mod events;
pub mod route;

pub use config::AppConfig;
pub use error::Error;
pub use events::{EventBus, SiteEvent};
pub use route::{Route, RouteSet};
