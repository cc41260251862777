//! Path parsing.
//!
//! # Responsibilities
//! - Decompose a raw path or URL into pathname, search and hash
//! - Keep the `?` / `#` prefixes on search and hash only when they are non-empty
//!
//! # Design Decisions
//! - Absolute URLs go through the `url` crate so components match what a browser reports
//! - Everything else splits on the first `#`, then on the first `?`

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// A decomposed navigation target.
///
/// `pathname` never contains `?` or `#`, `search` is empty or starts with `?`,
/// `hash` is empty or starts with `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    /// Reassemble `pathname + search + hash`.
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl FromStr for Location {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_path(s))
    }
}

/// Parse a raw path or absolute URL into a [`Location`].
pub fn parse_path(raw: &str) -> Location {
    match Url::parse(raw) {
        Ok(url) => from_url(&url),
        Err(_) => split_path(raw),
    }
}

fn from_url(url: &Url) -> Location {
    Location {
        pathname: url.path().to_string(),
        search: prefixed('?', url.query().unwrap_or_default()),
        hash: prefixed('#', url.fragment().unwrap_or_default()),
    }
}

fn split_path(raw: &str) -> Location {
    let (rest, hash) = raw.split_once('#').unwrap_or((raw, ""));
    let (pathname, search) = rest.split_once('?').unwrap_or((rest, ""));

    Location {
        pathname: pathname.to_string(),
        search: prefixed('?', search),
        hash: prefixed('#', hash),
    }
}

fn prefixed(prefix: char, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{prefix}{value}")
    }
}
