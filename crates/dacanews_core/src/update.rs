use dacanews_logging::{widget_debug, widget_info, widget_warn};

use crate::msg::ENTER_KEY_CODE;
use crate::{Effect, FetchKind, Msg, WidgetState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WidgetState, msg: Msg) -> (WidgetState, Vec<Effect>) {
    let effects = apply(&mut state, msg);
    (state, effects)
}

pub(crate) fn apply(state: &mut WidgetState, msg: Msg) -> Vec<Effect> {
    // An open alert is modal: user input waits until it is dismissed.
    if state.has_alert() && is_user_input(&msg) {
        widget_debug!("ignoring {:?} while an alert is open", msg);
        return Vec::new();
    }

    match msg {
        Msg::PageLoaded { path } => {
            state.highlight_links(&path);
            Vec::new()
        }
        Msg::HamburgerClicked => {
            if !state.toggle_mobile_nav() {
                widget_debug!("no #hamburger or #sm-nav on this page");
            }
            Vec::new()
        }
        Msg::SearchInputChanged(text) => {
            if !state.set_search_query(text) {
                widget_debug!("no search input on this page");
            }
            Vec::new()
        }
        Msg::SearchKeyUp { key_code } if key_code == ENTER_KEY_CODE => submit_search(state),
        Msg::SearchKeyUp { .. } => Vec::new(),
        Msg::SearchClicked => submit_search(state),
        Msg::SourceClicked { name } => {
            if !state.select_only_source(&name) {
                widget_warn!("no source button named {:?}", name);
                return Vec::new();
            }
            let query = state.search_query().unwrap_or_default().to_string();
            perform_search(state, &query, &[name])
        }
        Msg::PaginationClicked { pagination_url } => {
            let sources = state.selected_sources();
            let url = state.pagination_url(&pagination_url, &sources);
            widget_info!("pagination request url={}", url);
            state.begin_request(url, FetchKind::Pagination)
        }
        Msg::FragmentLoaded {
            request_id,
            html,
            pagination_urls,
        } => {
            let Some(kind) = state.finish_request(request_id) else {
                widget_debug!("dropping stale fragment for request {}", request_id);
                return Vec::new();
            };
            widget_info!(
                "{:?} request {} returned {} bytes",
                kind,
                request_id,
                html.len()
            );
            state.clear_featured_and_recent();
            if state.replace_results(html, pagination_urls) {
                Vec::new()
            } else {
                alert(state, "Cannot show results: #search-results is missing".to_string())
            }
        }
        Msg::RequestFailed {
            request_id,
            message,
        } => {
            if state.finish_request(request_id).is_none() {
                widget_debug!("dropping stale failure for request {}: {}", request_id, message);
                return Vec::new();
            }
            widget_warn!("request {} failed: {}", request_id, message);
            alert(state, message)
        }
        Msg::RequestCancelled { request_id } => {
            // Cancellation is only ever requested for superseded ids, so this
            // normally finds nothing to clear.
            if state.finish_request(request_id).is_some() {
                widget_debug!("live request {} was cancelled", request_id);
            }
            Vec::new()
        }
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    }
}

fn submit_search(state: &mut WidgetState) -> Vec<Effect> {
    let Some(query) = state.search_query().map(str::to_owned) else {
        widget_debug!("no search input on this page");
        return Vec::new();
    };
    let sources = state.selected_sources();
    perform_search(state, &query, &sources)
}

fn perform_search(state: &mut WidgetState, query: &str, sources: &[String]) -> Vec<Effect> {
    if query.is_empty() && sources.is_empty() {
        return Vec::new();
    }
    let url = state.search_url(query, sources);
    widget_info!("search request url={}", url);
    state.begin_request(url, FetchKind::Search)
}

fn alert(state: &mut WidgetState, message: String) -> Vec<Effect> {
    state.raise_alert(message.clone());
    vec![Effect::ShowAlert { message }]
}

fn is_user_input(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::HamburgerClicked
            | Msg::SearchInputChanged(_)
            | Msg::SearchKeyUp { .. }
            | Msg::SearchClicked
            | Msg::SourceClicked { .. }
            | Msg::PaginationClicked { .. }
    )
}
