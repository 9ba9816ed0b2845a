//! Turn search box input into the URL the page should open.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::classify::is_navigable_address;

pub const DEFAULT_ENGINE_URL: &str = "https://duckduckgo.com/?q=";

/// Characters left as-is by `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query the way browsers encode a URI component.
pub fn encode_query(text: &str) -> String {
    utf8_percent_encode(text, QUERY_COMPONENT).to_string()
}

/// Where a search submission leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Input was an address; open it directly.
    Address(String),
    /// Input was a query; open the search engine.
    Search(String),
}

impl Navigation {
    pub fn url(&self) -> &str {
        match self {
            Navigation::Address(url) | Navigation::Search(url) => url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchRouter {
    engine_url: String,
}

impl Default for SearchRouter {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_URL)
    }
}

impl SearchRouter {
    /// `engine_url` is the prefix the encoded query is appended to.
    pub fn new(engine_url: impl Into<String>) -> Self {
        Self {
            engine_url: engine_url.into(),
        }
    }

    /// Route trimmed input to an address or a search.
    pub fn resolve(&self, input: &str) -> Navigation {
        let text = input.trim();

        if is_navigable_address(text) {
            let url = if has_http_scheme(text) {
                text.to_string()
            } else {
                format!("https://{}", text)
            };
            tracing::debug!("Routing {:?} as address", text);
            Navigation::Address(url)
        } else {
            tracing::debug!("Routing {:?} as search", text);
            Navigation::Search(format!("{}{}", self.engine_url, encode_query(text)))
        }
    }
}

fn has_http_scheme(text: &str) -> bool {
    let lower = text
        .get(..8)
        .unwrap_or(text)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
