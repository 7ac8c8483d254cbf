//! Client code for the Esperança site engine.
//!
//! This crate provides the HTTP page fetcher, the in-memory page cache,
//! content extraction, and the ViaCEP address lookup shared by the engine.

pub mod cache;
pub mod cep;
pub mod extract;
pub mod fetch;

pub use cache::{CachedPage, PageCache};
pub use cep::{CepClient, Endereco};
pub use extract::{NavLink, PageContent, count_sections, extract_main, extract_nav_links, extract_page, extract_title};
pub use fetch::{FetchClient, FetchConfig, PageSource};
