use serde::Serialize;

use crate::RequestId;

pub const ACTIVE_LINK_CLASS: &str = "text-blue-700";
pub const INACTIVE_MOBILE_LINK_CLASS: &str = "text-gray-700";
pub const HAMBURGER_ACTIVE_CLASS: &str = "is-active";
pub const MOBILE_NAV_HIDDEN_CLASS: &str = "hidden";
pub const SOURCE_SELECTED_CLASSES: [&str; 3] = ["bg-blue-500", "text-white", "source-selected"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WidgetViewModel {
    pub path: Option<String>,
    pub hamburger_active: bool,
    pub mobile_nav_hidden: bool,
    pub main_nav: Vec<NavLinkView>,
    pub mobile_nav: Vec<NavLinkView>,
    /// `None` when the page has no search input.
    pub search_query: Option<String>,
    pub sources: Vec<SourceButtonView>,
    pub featured_articles_visible: bool,
    pub recent_articles_visible: bool,
    /// Fragment currently shown in `#search-results`; `None` until the first
    /// response arrives.
    pub results_fragment: Option<String>,
    pub pagination_urls: Vec<String>,
    pub pending_request: Option<RequestId>,
    pub alert: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLinkView {
    pub href: String,
    pub active: bool,
}

impl NavLinkView {
    /// Classes the link carries in the main nav.
    pub fn main_classes(&self) -> &'static [&'static str] {
        if self.active {
            &[ACTIVE_LINK_CLASS]
        } else {
            &[]
        }
    }

    /// Mobile links that do not match also get the muted colour.
    pub fn mobile_classes(&self) -> &'static [&'static str] {
        if self.active {
            &[ACTIVE_LINK_CLASS]
        } else {
            &[INACTIVE_MOBILE_LINK_CLASS]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceButtonView {
    pub name: String,
    pub selected: bool,
}

impl SourceButtonView {
    pub fn classes(&self) -> &'static [&'static str] {
        if self.selected {
            &SOURCE_SELECTED_CLASSES
        } else {
            &[]
        }
    }
}

impl WidgetViewModel {
    pub fn active_main_links(&self) -> impl Iterator<Item = &NavLinkView> {
        self.main_nav.iter().filter(|link| link.active)
    }

    pub fn active_mobile_links(&self) -> impl Iterator<Item = &NavLinkView> {
        self.mobile_nav.iter().filter(|link| link.active)
    }

    pub fn selected_sources(&self) -> Vec<&str> {
        self.sources
            .iter()
            .filter(|source| source.selected)
            .map(|source| source.name.as_str())
            .collect()
    }
}
