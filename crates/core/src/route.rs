//! Route identifiers and the allow-list of pages eligible for in-app navigation.
//!
//! A route is the final path segment of a page URL (`index.html`,
//! `projetos.html`, ...). Only routes in the configured [`RouteSet`] are ever
//! handled by the navigation layer; every other destination is left to the
//! host browser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An allow-listed page identifier, e.g. `index.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    /// Wrap a page name as a route. No eligibility check is performed here;
    /// membership is the [`RouteSet`]'s concern.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The route for a location path, treating a bare directory (trailing
    /// slash or empty path) as the index page.
    pub fn from_path(path: &str) -> Self {
        let segment = final_segment(path);
        if segment.is_empty() { Self("index.html".to_string()) } else { Self(segment.to_string()) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The final path segment of an href, with any query or fragment removed.
pub fn final_segment(href: &str) -> &str {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.rsplit('/').next().unwrap_or(path)
}

/// Ordered, statically configured set of routes eligible for in-app
/// navigation. Order is preserved because the pre-warm loop iterates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteSet(Vec<Route>);

impl RouteSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Route::new).collect())
    }

    pub fn contains(&self, route: &Route) -> bool {
        self.0.contains(route)
    }

    /// Resolve an href to an eligible route.
    ///
    /// Extracts the final path segment and checks membership; returns `None`
    /// for anything outside the allow-list. The exact-segment rule means a
    /// bare directory href does not resolve - eligibility requires the page
    /// name to appear verbatim.
    pub fn resolve(&self, href: &str) -> Option<Route> {
        let candidate = Route::new(final_segment(href));
        if self.contains(&candidate) { Some(candidate) } else { None }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RouteSet {
        RouteSet::new(["index.html", "projetos.html", "cadastro.html"])
    }

    #[test]
    fn test_final_segment_plain() {
        assert_eq!(final_segment("projetos.html"), "projetos.html");
        assert_eq!(final_segment("/site/projetos.html"), "projetos.html");
    }

    #[test]
    fn test_final_segment_strips_query_and_fragment() {
        assert_eq!(final_segment("cadastro.html?ref=menu"), "cadastro.html");
        assert_eq!(final_segment("cadastro.html#form"), "cadastro.html");
    }

    #[test]
    fn test_final_segment_directory() {
        assert_eq!(final_segment("/site/"), "");
        assert_eq!(final_segment(""), "");
    }

    #[test]
    fn test_route_from_path_empty_is_index() {
        assert_eq!(Route::from_path("/"), Route::new("index.html"));
        assert_eq!(Route::from_path(""), Route::new("index.html"));
        assert_eq!(Route::from_path("/projetos.html"), Route::new("projetos.html"));
    }

    #[test]
    fn test_resolve_member() {
        let set = routes();
        assert_eq!(set.resolve("projetos.html"), Some(Route::new("projetos.html")));
        assert_eq!(set.resolve("/deep/path/projetos.html"), Some(Route::new("projetos.html")));
    }

    #[test]
    fn test_resolve_non_member() {
        let set = routes();
        assert_eq!(set.resolve("admin.html"), None);
        assert_eq!(set.resolve("https://example.com/outra.html"), None);
    }

    #[test]
    fn test_resolve_directory_href_is_not_eligible() {
        // A trailing-slash href has no page name to match against.
        assert_eq!(routes().resolve("/site/"), None);
    }

    #[test]
    fn test_route_set_preserves_order() {
        let set = routes();
        let names: Vec<_> = set.iter().map(Route::as_str).collect();
        assert_eq!(names, vec!["index.html", "projetos.html", "cadastro.html"]);
    }

    #[test]
    fn test_route_serde_transparent() {
        let route = Route::new("index.html");
        assert_eq!(serde_json::to_string(&route).unwrap(), "\"index.html\"");
    }
}
