//! Content swap with optional fade transition.
//!
//! Replaces the primary region's content and the document title, scrolls
//! back to the top, and hands the document to the reinitializer. With
//! transitions enabled the region fades out for the configured duration,
//! the content is replaced while hidden, and after a short settle delay
//! the region fades back in. The missing-region check runs before any
//! mutation so a failed swap leaves the document untouched.

use std::time::Duration;

use esperanca_core::{Error, Route};
use tokio::time::sleep;
use tracing::trace;

use crate::dom::LiveDocument;
use crate::reinit::Reinitializer;

/// Pause between attaching new content and fading back in, so entrance
/// animations start from their initial state.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Transition behavior for swaps.
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    pub enabled: bool,
    pub duration: Duration,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self { enabled: true, duration: Duration::from_millis(300) }
    }
}

impl TransitionConfig {
    /// Swap immediately, with no fade and no delays.
    pub fn none() -> Self {
        Self { enabled: false, duration: Duration::ZERO }
    }
}

/// Swap `content` and `title` into the document, then re-initialize.
///
/// # Errors
///
/// `TargetMissing` when the document has no primary region. The document
/// is left exactly as it was.
pub async fn swap(
    doc: &mut LiveDocument,
    content: &str,
    title: &str,
    transition: TransitionConfig,
    reinit: &dyn Reinitializer,
    current: &Route,
) -> Result<(), Error> {
    if !doc.has_main() {
        return Err(Error::TargetMissing("no <main> element in the live document".into()));
    }

    if transition.enabled {
        doc.fade_out();
        sleep(transition.duration).await;
        apply(doc, content, title)?;
        sleep(SETTLE_DELAY).await;
        doc.fade_in();
    } else {
        apply(doc, content, title)?;
    }

    reinit.refresh(doc, current);
    trace!(route = current.as_str(), "content swapped");
    Ok(())
}

fn apply(doc: &mut LiveDocument, content: &str, title: &str) -> Result<(), Error> {
    doc.set_main_content(content)?;
    doc.set_title(title);
    doc.scroll_to_top();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use esperanca_core::EventBus;

    use crate::reinit::SiteReinitializer;

    const PAGE: &str = r#"
        <html><head><title>Início</title></head><body>
        <nav><a href="index.html">Início</a><a href="projetos.html">Projetos</a></nav>
        <main><section></section></main>
        </body></html>
    "#;

    fn reinit() -> SiteReinitializer {
        SiteReinitializer::new(EventBus::default())
    }

    #[tokio::test]
    async fn test_swap_replaces_content_and_title() {
        let mut doc = LiveDocument::from_html(PAGE, "x");
        doc.set_scroll(1200);

        swap(
            &mut doc,
            "<section><h1>Projetos</h1></section>",
            "Projetos - Instituto Esperança",
            TransitionConfig::none(),
            &reinit(),
            &Route::new("projetos.html"),
        )
        .await
        .unwrap();

        assert_eq!(doc.main_html().unwrap(), "<section><h1>Projetos</h1></section>");
        assert_eq!(doc.title(), "Projetos - Instituto Esperança");
        assert_eq!(doc.scroll_y(), 0);
        assert_eq!(doc.active_hrefs(), vec!["projetos.html"]);
    }

    #[tokio::test]
    async fn test_swap_with_transition_ends_faded_in() {
        let mut doc = LiveDocument::from_html(PAGE, "x");
        let transition = TransitionConfig { enabled: true, duration: Duration::from_millis(1) };

        swap(&mut doc, "<p>novo</p>", "Novo", transition, &reinit(), &Route::new("index.html")).await.unwrap();

        assert!(!doc.is_faded_out());
        assert_eq!(doc.main_html().unwrap(), "<p>novo</p>");
    }

    #[tokio::test]
    async fn test_swap_without_main_leaves_document_untouched() {
        let mut doc = LiveDocument::without_main("Antes");

        let err = swap(&mut doc, "<p>novo</p>", "Depois", TransitionConfig::none(), &reinit(), &Route::new("index.html"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::TargetMissing(_)));
        assert_eq!(doc.title(), "Antes");
        assert!(!doc.is_faded_out());
    }
}
