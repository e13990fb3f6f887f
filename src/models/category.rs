//! Category rules and classification results.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Name of the synthesized bucket for signature-matching URLs.
pub const NO_CATEGORY: &str = "No Category";

/// A named allow/deny rule applied to canonical URLs.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub name: String,
    pub pattern: Regex,
    pub allowed: bool,
    pub description: String,
}

impl CategoryRule {
    /// Compile a rule from its pattern source.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        allowed: bool,
        description: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|e| AppError::pattern(&name, e))?;
        Ok(Self {
            name,
            pattern,
            allowed,
            description: description.into(),
        })
    }

    /// Shorthand for an allow rule with no description.
    pub fn allow(name: impl Into<String>, pattern: &str) -> Result<Self> {
        Self::new(name, pattern, true, "")
    }

    /// Shorthand for a deny rule with no description.
    pub fn deny(name: impl Into<String>, pattern: &str) -> Result<Self> {
        Self::new(name, pattern, false, "")
    }

    pub fn is_match(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

/// URLs filed under one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryResult {
    pub name: String,
    pub description: String,
    pub urls: Vec<String>,
}

impl CategoryResult {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            urls: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
