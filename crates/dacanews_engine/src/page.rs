use dacanews_core::{PageLayout, WidgetViewModel, MOBILE_NAV_HIDDEN_CLASS};
use ego_tree::{NodeId, NodeRef, Tree};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

pub const HAMBURGER: &str = "#hamburger";
pub const MOBILE_NAV: &str = "#sm-nav";
pub const SEARCH_INPUT: &str = "#dacanews-search";
pub const SEARCH_BUTTON: &str = "#search-icon";
pub const MAIN_NAV_LINKS: &str = "#main-nav a";
pub const MOBILE_NAV_LINKS: &str = "#sm-nav a";
pub const SOURCE_BUTTONS: &str = ".source-button";
pub const FEATURED_ARTICLES: &str = "#featured-articles";
pub const RECENT_ARTICLES: &str = "#recent-articles";
pub const SEARCH_RESULTS: &str = "#search-results";
pub const PAGINATION_TARGETS: &str = "[data-pagination-url]";

const SOURCE_NAME_ATTR: &str = "data-source";
const PAGINATION_ATTR: &str = "data-pagination-url";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpliceError {
    #[error("invalid selector `{css}`: {message}")]
    Selector { css: &'static str, message: String },
    #[error("page has no #search-results container")]
    MissingResultsContainer,
}

fn selector(css: &'static str) -> Result<Selector, SpliceError> {
    Selector::parse(css).map_err(|err| SpliceError::Selector {
        css,
        message: err.to_string(),
    })
}

/// A server-rendered dacanews page the widget is bound to.
#[derive(Debug, Clone)]
pub struct PageDocument {
    html: Html,
    /// Fragment currently inside `#search-results`, once one has been spliced.
    applied_results: Option<String>,
}

impl PageDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            applied_results: None,
        }
    }

    /// Reads the DOM contract out of the page.
    pub fn layout(&self) -> Result<PageLayout, SpliceError> {
        let mobile_nav = self.first(MOBILE_NAV)?;
        Ok(PageLayout {
            has_hamburger: self.first(HAMBURGER)?.is_some(),
            has_mobile_nav: mobile_nav.is_some(),
            mobile_nav_initially_hidden: mobile_nav
                .map(|nav| nav.value().classes().any(|c| c == MOBILE_NAV_HIDDEN_CLASS))
                .unwrap_or(false),
            search_input: self
                .first(SEARCH_INPUT)?
                .map(|input| input.value().attr("value").unwrap_or_default().to_string()),
            has_search_button: self.first(SEARCH_BUTTON)?.is_some(),
            has_featured_articles: self.first(FEATURED_ARTICLES)?.is_some(),
            has_recent_articles: self.first(RECENT_ARTICLES)?.is_some(),
            has_search_results: self.first(SEARCH_RESULTS)?.is_some(),
            main_nav_links: self.hrefs(MAIN_NAV_LINKS)?,
            mobile_nav_links: self.hrefs(MOBILE_NAV_LINKS)?,
            source_buttons: self
                .all(SOURCE_BUTTONS)?
                .into_iter()
                .map(source_name)
                .filter(|name| !name.is_empty())
                .collect(),
            pagination_urls: pagination_urls_in(&self.html)?,
        })
    }

    /// Brings the structural parts of the page in line with the widget view:
    /// drops the featured/recent sections once hidden and puts the current
    /// fragment into the results container.
    pub fn apply_view(&mut self, view: &WidgetViewModel) -> Result<(), SpliceError> {
        if !view.featured_articles_visible {
            self.remove(FEATURED_ARTICLES)?;
        }
        if !view.recent_articles_visible {
            self.remove(RECENT_ARTICLES)?;
        }
        if let Some(fragment) = view.results_fragment.as_deref() {
            if self.applied_results.as_deref() != Some(fragment) {
                self.replace_results(fragment)?;
            }
        }
        Ok(())
    }

    /// Replaces every child of `#search-results` with the nodes of `fragment`.
    pub fn replace_results(&mut self, fragment: &str) -> Result<(), SpliceError> {
        let container = self
            .first(SEARCH_RESULTS)?
            .map(|el| el.id())
            .ok_or(SpliceError::MissingResultsContainer)?;

        let old_children: Vec<NodeId> = self
            .html
            .tree
            .get(container)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default();
        for id in old_children {
            if let Some(mut child) = self.html.tree.get_mut(id) {
                child.detach();
            }
        }

        let parsed = Html::parse_fragment(fragment);
        for node in parsed.root_element().children() {
            graft(&mut self.html.tree, container, node);
        }
        self.compact();
        self.applied_results = Some(fragment.to_string());
        Ok(())
    }

    /// Inner HTML of `#search-results`, if the page has one.
    pub fn results_html(&self) -> Result<Option<String>, SpliceError> {
        Ok(self.first(SEARCH_RESULTS)?.map(|el| el.inner_html()))
    }

    pub fn contains(&self, css: &'static str) -> Result<bool, SpliceError> {
        Ok(self.first(css)?.is_some())
    }

    pub fn html(&self) -> String {
        self.html.html()
    }

    fn remove(&mut self, css: &'static str) -> Result<(), SpliceError> {
        let ids: Vec<NodeId> = self.all(css)?.into_iter().map(|el| el.id()).collect();
        if ids.is_empty() {
            return Ok(());
        }
        for id in ids {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
        self.compact();
        Ok(())
    }

    /// Detached nodes stay in the tree's arena; re-parsing drops them.
    fn compact(&mut self) {
        self.html = Html::parse_document(&self.html.html());
    }

    fn first(&self, css: &'static str) -> Result<Option<ElementRef<'_>>, SpliceError> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).next())
    }

    fn all(&self, css: &'static str) -> Result<Vec<ElementRef<'_>>, SpliceError> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).collect())
    }

    fn hrefs(&self, css: &'static str) -> Result<Vec<String>, SpliceError> {
        Ok(self
            .all(css)?
            .into_iter()
            .map(|a| a.value().attr("href").unwrap_or_default().to_string())
            .collect())
    }
}

/// `data-pagination-url` values inside a results fragment, in document order.
pub fn fragment_pagination_urls(fragment: &str) -> Result<Vec<String>, SpliceError> {
    pagination_urls_in(&Html::parse_fragment(fragment))
}

fn pagination_urls_in(html: &Html) -> Result<Vec<String>, SpliceError> {
    let sel = selector(PAGINATION_TARGETS)?;
    Ok(html
        .select(&sel)
        .filter_map(|el| el.value().attr(PAGINATION_ATTR))
        .map(str::to_string)
        .collect())
}

/// `data-source`, falling back to the button's visible text.
fn source_name(button: ElementRef<'_>) -> String {
    match button.value().attr(SOURCE_NAME_ATTR) {
        Some(name) => name.trim().to_string(),
        None => button.text().collect::<String>().trim().to_string(),
    }
}

fn graft(tree: &mut Tree<Node>, parent: NodeId, source: NodeRef<'_, Node>) {
    let Some(mut parent_node) = tree.get_mut(parent) else {
        return;
    };
    let copied = parent_node.append(source.value().clone()).id();
    for child in source.children() {
        graft(tree, copied, child);
    }
}
