use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Characters left untouched by the browser's `encodeURI`.
const ENCODE_URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

pub const SEARCH_PATH: &str = "/search/";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("invalid origin `{input}`: {reason}")]
    InvalidOrigin { input: String, reason: String },
}

/// Scheme, host and port of the page the widget is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin(String);

impl Origin {
    /// Accepts any absolute URL and keeps only its origin, like
    /// `document.location.origin`.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let url = Url::parse(input.trim()).map_err(|err| UrlError::InvalidOrigin {
            input: input.to_string(),
            reason: err.to_string(),
        })?;
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(UrlError::InvalidOrigin {
                input: input.to_string(),
                reason: "url has no host".to_string(),
            });
        }
        Ok(Self(origin.ascii_serialization()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn encode_uri(value: &str) -> String {
    utf8_percent_encode(value, ENCODE_URI).to_string()
}

/// `source=<a>&source=<b>`, or `None` for an empty selection.
pub fn source_params<S: AsRef<str>>(sources: &[S]) -> Option<String> {
    if sources.is_empty() {
        return None;
    }
    let params = sources
        .iter()
        .map(|name| format!("source={}", encode_uri(name.as_ref())))
        .collect::<Vec<_>>();
    Some(params.join("&"))
}

pub fn search_url<S: AsRef<str>>(origin: &Origin, query: &str, sources: &[S]) -> String {
    let mut url = format!("{origin}{SEARCH_PATH}?q={}", encode_uri(query));
    if let Some(params) = source_params(sources) {
        url.push('&');
        url.push_str(&params);
    }
    url
}

/// Joins a server-supplied pagination path onto the origin and appends the
/// source parameters. The path is used verbatim apart from a leading `/`.
pub fn pagination_url<S: AsRef<str>>(origin: &Origin, path: &str, sources: &[S]) -> String {
    let path = path.trim().trim_start_matches('/');
    let mut url = format!("{origin}/{path}");
    if let Some(params) = source_params(sources) {
        url.push(if path.contains('?') { '&' } else { '?' });
        url.push_str(&params);
    }
    url
}
