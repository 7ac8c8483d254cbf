//! Primary-content extraction.
//!
//! Pure functions over raw markup: no DOM mutation, no network access,
//! idempotent. Extraction never fails - a page without a `<main>` region
//! degrades to the whole input, and a missing `<title>` falls back to the
//! configured default.

pub mod links;

pub use links::{NavLink, extract_nav_links};

use scraper::{Html, Selector};

/// The swap-ready result of extracting a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Inner HTML of the primary content region, or the whole input when no
    /// region exists.
    pub content: String,
    /// Declared document title, or the default.
    pub title: String,
}

/// Inner HTML of the document's `<main>` element, if it has one.
pub fn extract_main(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("main").expect("invalid selector");
    document.select(&selector).next().map(|main| main.inner_html())
}

/// The document's declared `<title>` text, if it has one.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").expect("invalid selector");
    document
        .select(&selector)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
}

/// Extract the primary content region and title from a full document.
pub fn extract_page(html: &str, default_title: &str) -> PageContent {
    let content = extract_main(html).unwrap_or_else(|| html.to_string());
    let title = extract_title(html).unwrap_or_else(|| default_title.to_string());

    PageContent { content, title }
}

/// Count the animated content sections (`section` and `article` elements)
/// inside a markup fragment.
pub fn count_sections(fragment: &str) -> usize {
    let parsed = Html::parse_fragment(fragment);
    let selector = Selector::parse("section, article").expect("invalid selector");
    parsed.select(&selector).count()
}
