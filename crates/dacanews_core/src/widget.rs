use crate::query::Origin;
use crate::update::apply;
use crate::{Effect, Msg, PageLayout, WidgetState, WidgetViewModel};

/// The search widget bound to one loaded page.
///
/// Owns the page state and exposes the user-facing actions as methods; each
/// returns the effects the host has to run.
#[derive(Debug, Clone)]
pub struct SearchWidget {
    state: WidgetState,
}

impl SearchWidget {
    /// Binds to `layout` and runs the page-load step for `path`.
    pub fn load(origin: Origin, layout: PageLayout, path: &str) -> Self {
        let mut widget = Self {
            state: WidgetState::new(origin, layout),
        };
        widget.dispatch(Msg::PageLoaded {
            path: path.to_string(),
        });
        widget
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        apply(&mut self.state, msg)
    }

    pub fn toggle_mobile_nav(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::HamburgerClicked)
    }

    /// Types `text` into the search box and clicks the search button.
    pub fn perform_search(&mut self, text: &str) -> Vec<Effect> {
        let mut effects = self.dispatch(Msg::SearchInputChanged(text.to_string()));
        effects.extend(self.dispatch(Msg::SearchClicked));
        effects
    }

    pub fn select_source(&mut self, name: &str) -> Vec<Effect> {
        self.dispatch(Msg::SourceClicked {
            name: name.to_string(),
        })
    }

    pub fn fetch_page(&mut self, pagination_url: &str) -> Vec<Effect> {
        self.dispatch(Msg::PaginationClicked {
            pagination_url: pagination_url.to_string(),
        })
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn view(&self) -> WidgetViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }
}
