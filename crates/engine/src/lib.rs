//! In-app navigation engine for the Esperança site.
//!
//! Models the live document, the browser history stack, and the navigation
//! state machine that ties fetch → extract → swap → commit together. The
//! whole engine is headless: the document is an explicit value, so every
//! navigation path is exercisable in tests without a browser.

pub mod dom;
pub mod history;
pub mod intercept;
pub mod navigator;
pub mod reinit;
pub mod swap;

pub use dom::LiveDocument;
pub use history::{History, HistoryState, PopEvent};
pub use intercept::{ClickedLink, Decision, LinkInterceptor, PassReason};
pub use navigator::{NavOutcome, Navigator};
pub use reinit::{Reinitializer, SiteReinitializer};
pub use swap::{TransitionConfig, swap};
