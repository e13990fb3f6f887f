//! Search queries and the anchors pulled out of result pages.

use serde::{Deserialize, Serialize};

/// A search-engine query, ready to fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Query {
    /// Engine display name (e.g., "Google")
    pub engine: String,

    /// Absolute URL of the first result page
    pub url: String,
}

impl Query {
    pub fn new(engine: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            url: url.into(),
        }
    }
}

/// An `<a>` element found in a fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Visible text of the anchor, all descendant text nodes joined
    pub text: String,

    /// Raw `href` attribute value
    pub href: String,
}

impl Anchor {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }

    /// Whether this anchor is a "Next" pagination link.
    pub fn is_next(&self) -> bool {
        self.text.contains("Next")
    }
}
