//! Navigation-link harvesting from HTML documents.

use scraper::{Html, Selector};

/// A navigation link as it appears in the document, href unresolved.
///
/// The raw href matters: the interceptor's eligibility rules are written
/// against what the author typed (`#ancora`, `mailto:`, relative page name),
/// not against a resolved URL.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NavLink {
    /// Link text content
    pub text: String,
    /// The href attribute, verbatim
    pub href: String,
}

/// Extract the links inside `<nav>` elements, in document order.
pub fn extract_nav_links(html: &str) -> Vec<NavLink> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("nav a[href]").expect("invalid selector");

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.to_string();
            let text = element.text().collect::<Vec<_>>().join(" ").trim().to_string();
            let text = if text.is_empty() { "[link]".to_string() } else { text };
            Some(NavLink { text, href })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_nav_links_basic() {
        let html = r#"
            <html><body>
                <nav>
                    <a href="index.html">Início</a>
                    <a href="projetos.html">Projetos</a>
                </nav>
            </body></html>
        "#;

        let links = extract_nav_links(html);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], NavLink { text: "Início".to_string(), href: "index.html".to_string() });
        assert_eq!(links[1].href, "projetos.html");
    }

    #[test]
    fn test_extract_nav_links_ignores_links_outside_nav() {
        let html = r#"
            <html><body>
                <nav><a href="index.html">Início</a></nav>
                <main><a href="cadastro.html">Cadastre-se</a></main>
            </body></html>
        "#;

        let links = extract_nav_links(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "index.html");
    }

    #[test]
    fn test_extract_nav_links_keeps_raw_href() {
        let html = r##"<nav><a href="#contato">Contato</a><a href="mailto:oi@esperanca.org.br">Email</a></nav>"##;

        let links = extract_nav_links(html);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "#contato");
        assert_eq!(links[1].href, "mailto:oi@esperanca.org.br");
    }

    #[test]
    fn test_extract_nav_links_empty_text_placeholder() {
        let links = extract_nav_links(r#"<nav><a href="index.html"><img src="logo.png"></a></nav>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "[link]");
    }

    #[test]
    fn test_extract_nav_links_none() {
        assert!(extract_nav_links("<html><body><p>sem nav</p></body></html>").is_empty());
    }
}
