use crate::RequestId;

/// Key code the search input treats as a submit.
pub const ENTER_KEY_CODE: u32 = 13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page finished loading at `path` (`document.location.pathname`).
    PageLoaded { path: String },
    /// User clicked `#hamburger`.
    HamburgerClicked,
    /// User edited `#dacanews-search`.
    SearchInputChanged(String),
    /// Key released inside `#dacanews-search`.
    SearchKeyUp { key_code: u32 },
    /// User clicked `#search-icon`.
    SearchClicked,
    /// User clicked the `.source-button` named `name`.
    SourceClicked { name: String },
    /// User clicked an element carrying `data-pagination-url`.
    PaginationClicked { pagination_url: String },
    /// Engine delivered the fragment for a request.
    FragmentLoaded {
        request_id: RequestId,
        html: String,
        pagination_urls: Vec<String>,
    },
    /// Request ended with a non-2xx status or a network error.
    RequestFailed { request_id: RequestId, message: String },
    /// Request was cancelled before completing.
    RequestCancelled { request_id: RequestId },
    /// User closed the pending alert.
    AlertDismissed,
    /// Render tick.
    Tick,
    NoOp,
}
