use crate::query::{self, Origin};
use crate::view_model::{NavLinkView, SourceButtonView, WidgetViewModel};
use crate::{Effect, FetchKind, PageLayout};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
struct NavLink {
    href: String,
    active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceButton {
    name: String,
    selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    kind: FetchKind,
}

/// DOM-resident widget state for one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    origin: Origin,
    layout: PageLayout,
    path: Option<String>,
    hamburger_active: bool,
    mobile_nav_hidden: bool,
    main_nav: Vec<NavLink>,
    mobile_nav: Vec<NavLink>,
    search_query: Option<String>,
    sources: Vec<SourceButton>,
    featured_visible: bool,
    recent_visible: bool,
    results: Option<String>,
    pagination_urls: Vec<String>,
    last_request_id: RequestId,
    in_flight: Option<InFlight>,
    alert: Option<String>,
    dirty: bool,
}

impl WidgetState {
    pub fn new(origin: Origin, layout: PageLayout) -> Self {
        let links = |hrefs: &[String]| {
            hrefs
                .iter()
                .map(|href| NavLink {
                    href: href.clone(),
                    active: false,
                })
                .collect::<Vec<_>>()
        };
        Self {
            origin,
            path: None,
            hamburger_active: false,
            mobile_nav_hidden: layout.mobile_nav_initially_hidden,
            main_nav: links(&layout.main_nav_links),
            mobile_nav: links(&layout.mobile_nav_links),
            search_query: layout.search_input.clone(),
            sources: layout
                .source_buttons
                .iter()
                .map(|name| SourceButton {
                    name: name.clone(),
                    selected: false,
                })
                .collect(),
            featured_visible: layout.has_featured_articles,
            recent_visible: layout.has_recent_articles,
            results: None,
            pagination_urls: layout.pagination_urls.clone(),
            last_request_id: 0,
            in_flight: None,
            alert: None,
            dirty: true,
            layout,
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn view(&self) -> WidgetViewModel {
        let links = |links: &[NavLink]| {
            links
                .iter()
                .map(|link| NavLinkView {
                    href: link.href.clone(),
                    active: link.active,
                })
                .collect()
        };
        WidgetViewModel {
            path: self.path.clone(),
            hamburger_active: self.hamburger_active,
            mobile_nav_hidden: self.mobile_nav_hidden,
            main_nav: links(&self.main_nav),
            mobile_nav: links(&self.mobile_nav),
            search_query: self.search_query.clone(),
            sources: self
                .sources
                .iter()
                .map(|source| SourceButtonView {
                    name: source.name.clone(),
                    selected: source.selected,
                })
                .collect(),
            featured_articles_visible: self.featured_visible,
            recent_articles_visible: self.recent_visible,
            results_fragment: self.results.clone(),
            pagination_urls: self.pagination_urls.clone(),
            pending_request: self.in_flight.map(|f| f.request_id),
            alert: self.alert.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn has_alert(&self) -> bool {
        self.alert.is_some()
    }

    pub(crate) fn highlight_links(&mut self, path: &str) {
        self.path = Some(path.to_string());
        for link in self.main_nav.iter_mut().chain(self.mobile_nav.iter_mut()) {
            link.active = link.href == path;
        }
        self.mark_dirty();
    }

    /// Returns `false` when the hamburger or the panel it opens is missing.
    pub(crate) fn toggle_mobile_nav(&mut self) -> bool {
        if !(self.layout.has_hamburger && self.layout.has_mobile_nav) {
            return false;
        }
        self.hamburger_active = !self.hamburger_active;
        self.mobile_nav_hidden = !self.mobile_nav_hidden;
        self.mark_dirty();
        true
    }

    pub(crate) fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    /// Returns `false` when the page has no search input.
    pub(crate) fn set_search_query(&mut self, text: String) -> bool {
        match self.search_query.as_mut() {
            Some(query) => {
                *query = text;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    pub(crate) fn selected_sources(&self) -> Vec<String> {
        self.sources
            .iter()
            .filter(|source| source.selected)
            .map(|source| source.name.clone())
            .collect()
    }

    /// Makes `name` the only selected source. Returns `false` for an unknown
    /// button.
    pub(crate) fn select_only_source(&mut self, name: &str) -> bool {
        if !self.sources.iter().any(|source| source.name == name) {
            return false;
        }
        for source in &mut self.sources {
            source.selected = source.name == name;
        }
        self.mark_dirty();
        true
    }

    /// Allocates the next request id and records it as the only live request.
    /// The effects cancel whatever was in flight before.
    pub(crate) fn begin_request(&mut self, url: String, kind: FetchKind) -> Vec<Effect> {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        let mut effects = Vec::with_capacity(2);
        if let Some(previous) = self.in_flight.replace(InFlight { request_id, kind }) {
            effects.push(Effect::CancelFetch {
                request_id: previous.request_id,
            });
        }
        effects.push(Effect::Fetch {
            request_id,
            url,
            kind,
        });
        self.mark_dirty();
        effects
    }

    /// Clears the live request if it is `request_id` and returns its kind.
    /// `None` means the id is stale or unknown.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> Option<FetchKind> {
        match self.in_flight {
            Some(live) if live.request_id == request_id => {
                self.in_flight = None;
                self.mark_dirty();
                Some(live.kind)
            }
            _ => None,
        }
    }

    pub(crate) fn clear_featured_and_recent(&mut self) {
        self.featured_visible = false;
        self.recent_visible = false;
        self.mark_dirty();
    }

    /// Returns `false` when the page has no results container.
    pub(crate) fn replace_results(&mut self, html: String, pagination_urls: Vec<String>) -> bool {
        if !self.layout.has_search_results {
            return false;
        }
        self.results = Some(html);
        self.pagination_urls = pagination_urls;
        self.mark_dirty();
        true
    }

    pub(crate) fn raise_alert(&mut self, message: String) {
        self.alert = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn dismiss_alert(&mut self) -> bool {
        let had_alert = self.alert.take().is_some();
        if had_alert {
            self.mark_dirty();
        }
        had_alert
    }

    pub(crate) fn search_url(&self, query: &str, sources: &[String]) -> String {
        query::search_url(&self.origin, query, sources)
    }

    pub(crate) fn pagination_url(&self, path: &str, sources: &[String]) -> String {
        query::pagination_url(&self.origin, path, sources)
    }
}
