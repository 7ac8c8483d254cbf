//! Explicit model of the live document.
//!
//! The engine owns a [`LiveDocument`] value instead of reaching into a real
//! DOM: the title, the single primary content region (`<main>`), the nav
//! links with their active markers, the animated content sections, the
//! scroll position, the fade state used by transitions, and the responsive
//! menu. Absence of the primary region is representable (`main: None`)
//! because swapping into such a document is a hard failure.

use esperanca_client::{NavLink, count_sections, extract_main, extract_nav_links, extract_title};
use esperanca_core::{Error, Route, route::final_segment};

/// Per-section animation stagger, mirroring the 0.1s transition-delay step
/// applied to each successive section.
pub const SECTION_STAGGER_MS: u64 = 100;

/// A navigation link and its active-highlight marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkState {
    pub href: String,
    pub text: String,
    pub active: bool,
}

/// An animated content section (`<section>` or `<article>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Whether the entrance animation's visible marker is applied.
    pub visible: bool,
    /// Animation delay for the staggered entrance.
    pub delay_ms: u64,
}

/// The modeled browser document.
#[derive(Debug, Clone)]
pub struct LiveDocument {
    title: String,
    main: Option<String>,
    nav_links: Vec<NavLinkState>,
    sections: Vec<Section>,
    scroll_y: u32,
    faded_out: bool,
    menu_open: bool,
}

impl LiveDocument {
    /// Build the model from a page's full markup.
    pub fn from_html(html: &str, default_title: &str) -> Self {
        let main = extract_main(html);
        let title = extract_title(html).unwrap_or_else(|| default_title.to_string());
        let nav_links = extract_nav_links(html)
            .into_iter()
            .map(|NavLink { text, href }| NavLinkState { href, text, active: false })
            .collect();
        let sections = count_fragment_sections(main.as_deref().unwrap_or(html));

        Self { title, main, nav_links, sections, scroll_y: 0, faded_out: false, menu_open: false }
    }

    /// A document whose primary region is missing, for exercising the
    /// `TargetMissing` path.
    pub fn without_main(title: &str) -> Self {
        Self {
            title: title.to_string(),
            main: None,
            nav_links: Vec::new(),
            sections: Vec::new(),
            scroll_y: 0,
            faded_out: false,
            menu_open: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn has_main(&self) -> bool {
        self.main.is_some()
    }

    /// Inner HTML of the primary region.
    pub fn main_html(&self) -> Option<&str> {
        self.main.as_deref()
    }

    /// Replace the primary region's content and re-derive its sections.
    ///
    /// # Errors
    ///
    /// `TargetMissing` when the document has no primary region; nothing is
    /// mutated in that case.
    pub fn set_main_content(&mut self, content: &str) -> Result<(), Error> {
        if self.main.is_none() {
            return Err(Error::TargetMissing("no <main> element in the live document".into()));
        }
        self.main = Some(content.to_string());
        self.sections = count_fragment_sections(content);
        Ok(())
    }

    pub fn nav_links(&self) -> &[NavLinkState] {
        &self.nav_links
    }

    /// Apply the active marker to exactly the links resolving to `route`.
    pub fn set_active_route(&mut self, route: &Route) {
        for link in &mut self.nav_links {
            let segment = final_segment(&link.href);
            link.active = !segment.is_empty() && segment == route.as_str();
        }
    }

    /// Hrefs currently carrying the active marker.
    pub fn active_hrefs(&self) -> Vec<&str> {
        self.nav_links.iter().filter(|l| l.active).map(|l| l.href.as_str()).collect()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Replay the entrance animations: clear every section's visible marker,
    /// then reapply it with staggered delays.
    pub fn rearm_sections(&mut self) {
        for section in &mut self.sections {
            section.visible = false;
        }
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.delay_ms = i as u64 * SECTION_STAGGER_MS;
            section.visible = true;
        }
    }

    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    pub fn set_scroll(&mut self, y: u32) {
        self.scroll_y = y;
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_y = 0;
    }

    /// Transition state: region visually hidden during a swap.
    pub fn is_faded_out(&self) -> bool {
        self.faded_out
    }

    pub fn fade_out(&mut self) {
        self.faded_out = true;
    }

    pub fn fade_in(&mut self) {
        self.faded_out = false;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

fn count_fragment_sections(fragment: &str) -> Vec<Section> {
    (0..count_sections(fragment)).map(|_| Section { visible: false, delay_ms: 0 }).collect()
}
