//! Heuristic address detection for free-text search box input.

use regex::Regex;
use std::sync::LazyLock;

static SCHEME: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)^[a-z]+://").ok());
static DOTTED_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s]+\.[^\s]{2,}$").ok());
static IPV4_SHAPED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").ok());

fn matches(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// Returns true when `text` looks like something to navigate to.
///
/// Accepts any of:
/// - an explicit scheme (`ftp://`, `HTTP://`, ...)
/// - a whitespace-free token with a dot and at least two characters after it
/// - anything starting with `localhost`
/// - a dotted quad of 1-3 digit groups
///
/// False positives such as `file.name.for.something` are accepted.
pub fn is_navigable_address(text: &str) -> bool {
    matches(&SCHEME, text)
        || matches(&DOTTED_TOKEN, text)
        || text.starts_with("localhost")
        || matches(&IPV4_SHAPED, text)
}
