//! Dacanews engine: HTTP fetching, response decoding and page splicing.
mod decode;
mod engine;
mod fetch;
mod page;
mod render;
mod types;

pub use decode::{decode_html, decode_html_lossy, DecodeError, DecodedHtml};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use page::{
    fragment_pagination_urls, PageDocument, SpliceError, FEATURED_ARTICLES, RECENT_ARTICLES,
    SEARCH_RESULTS,
};
pub use render::{FragmentRenderer, Html2MdRenderer};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, FetchedFragment, RequestId,
};
