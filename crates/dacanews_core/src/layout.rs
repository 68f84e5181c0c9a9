/// The parts of the page's DOM contract the widget binds to.
///
/// Built once from the server-rendered page; a `false` flag or an empty list
/// means the element is absent and the matching bindings are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLayout {
    /// `#hamburger`
    pub has_hamburger: bool,
    /// `#sm-nav`
    pub has_mobile_nav: bool,
    /// `#sm-nav` carried the `hidden` class when the page was rendered.
    pub mobile_nav_initially_hidden: bool,
    /// `#dacanews-search`, with its initial value.
    pub search_input: Option<String>,
    /// `#search-icon`
    pub has_search_button: bool,
    /// `#featured-articles`
    pub has_featured_articles: bool,
    /// `#recent-articles`
    pub has_recent_articles: bool,
    /// `#search-results`
    pub has_search_results: bool,
    /// `href` of every `#main-nav a`, in document order.
    pub main_nav_links: Vec<String>,
    /// `href` of every `#sm-nav a`, in document order.
    pub mobile_nav_links: Vec<String>,
    /// Source name of every `.source-button`, in document order.
    pub source_buttons: Vec<String>,
    /// `data-pagination-url` values present on the initial page.
    pub pagination_urls: Vec<String>,
}
