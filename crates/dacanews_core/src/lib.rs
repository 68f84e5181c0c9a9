//! Dacanews core: pure widget state machine, URL building and view-model helpers.
mod effect;
mod layout;
mod msg;
mod query;
mod state;
mod update;
mod view_model;
mod widget;

pub use effect::{Effect, FetchKind};
pub use layout::PageLayout;
pub use msg::{Msg, ENTER_KEY_CODE};
pub use query::{
    encode_uri, pagination_url, search_url, source_params, Origin, UrlError, SEARCH_PATH,
};
pub use state::{RequestId, WidgetState};
pub use update::update;
pub use view_model::{
    NavLinkView, SourceButtonView, WidgetViewModel, ACTIVE_LINK_CLASS, HAMBURGER_ACTIVE_CLASS,
    INACTIVE_MOBILE_LINK_CLASS, MOBILE_NAV_HIDDEN_CLASS, SOURCE_SELECTED_CLASSES,
};
pub use widget::SearchWidget;
