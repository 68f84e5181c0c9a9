use dacanews_core::{update, Effect, FetchKind, Msg, Origin, PageLayout, SearchWidget, WidgetState};
use pretty_assertions::assert_eq;

fn init_logging() {
    dacanews_logging::initialize_for_tests();
}

fn layout() -> PageLayout {
    PageLayout {
        search_input: Some(String::new()),
        has_search_button: true,
        has_featured_articles: true,
        has_search_results: true,
        source_buttons: vec!["CNN".into()],
        pagination_urls: vec!["/search/?q=&page=2".into()],
        ..PageLayout::default()
    }
}

fn widget() -> SearchWidget {
    SearchWidget::load(Origin::parse("https://dacanews.example").unwrap(), layout(), "/search/")
}

#[test]
fn newer_request_cancels_the_one_in_flight() {
    init_logging();
    let mut widget = widget();
    widget.perform_search("first");
    let effects = widget.perform_search("second");

    assert_eq!(
        effects,
        vec![
            Effect::CancelFetch { request_id: 1 },
            Effect::Fetch {
                request_id: 2,
                url: "https://dacanews.example/search/?q=second".into(),
                kind: FetchKind::Search,
            },
        ]
    );
    assert_eq!(widget.view().pending_request, Some(2));
}

#[test]
fn stale_fragment_never_changes_the_view() {
    init_logging();
    let mut widget = widget();
    widget.perform_search("first");
    widget.perform_search("second");
    widget.consume_dirty();
    let before = widget.view();

    let effects = widget.dispatch(Msg::FragmentLoaded {
        request_id: 1,
        html: "<p>old</p>".into(),
        pagination_urls: Vec::new(),
    });
    assert!(effects.is_empty());
    assert!(!widget.consume_dirty());
    assert_eq!(widget.view(), before);

    widget.dispatch(Msg::FragmentLoaded {
        request_id: 2,
        html: "<p>new</p>".into(),
        pagination_urls: Vec::new(),
    });
    assert_eq!(widget.view().results_fragment.as_deref(), Some("<p>new</p>"));
}

#[test]
fn stale_failure_does_not_alert() {
    init_logging();
    let mut widget = widget();
    widget.perform_search("first");
    widget.perform_search("second");

    let effects = widget.dispatch(Msg::RequestFailed {
        request_id: 1,
        message: "Cannot request x, got 500".into(),
    });
    assert!(effects.is_empty());
    assert_eq!(widget.view().alert, None);
    assert_eq!(widget.view().pending_request, Some(2));
}

#[test]
fn cancelled_superseded_request_is_ignored() {
    init_logging();
    let mut widget = widget();
    widget.perform_search("first");
    widget.perform_search("second");
    assert!(widget.dispatch(Msg::RequestCancelled { request_id: 1 }).is_empty());
    assert_eq!(widget.view().pending_request, Some(2));
}

#[test]
fn pagination_appends_the_selected_source() {
    init_logging();
    let mut widget = widget();
    widget.select_source("CNN");
    widget.dispatch(Msg::FragmentLoaded {
        request_id: 1,
        html: "<a data-pagination-url=\"search/?q=&page=2\">next</a>".into(),
        pagination_urls: vec!["search/?q=&page=2".into()],
    });

    let effects = widget.fetch_page("search/?q=&page=2");
    assert_eq!(
        effects,
        vec![Effect::Fetch {
            request_id: 2,
            url: "https://dacanews.example/search/?q=&page=2&source=CNN".into(),
            kind: FetchKind::Pagination,
        }]
    );
}

#[test]
fn pagination_without_selection_uses_path_verbatim() {
    init_logging();
    let (state, effects) = update(
        WidgetState::new(Origin::parse("https://dacanews.example").unwrap(), layout()),
        Msg::PaginationClicked {
            pagination_url: "/search/?q=&page=2".into(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Fetch {
            request_id: 1,
            url: "https://dacanews.example/search/?q=&page=2".into(),
            kind: FetchKind::Pagination,
        }]
    );

    let (state, _) = update(
        state,
        Msg::FragmentLoaded {
            request_id: 1,
            html: "<ol><li>page two</li></ol>".into(),
            pagination_urls: Vec::new(),
        },
    );
    let view = state.view();
    assert!(!view.featured_articles_visible);
    assert_eq!(view.results_fragment.as_deref(), Some("<ol><li>page two</li></ol>"));
}
