// src/pipeline/filter.rs

//! Filtering stage: normalize, classify, render.

use crate::error::Result;
use crate::models::CategoryResult;
use crate::services::{Classifier, ReportRenderer, normalize};

/// Result of filtering a batch of raw links.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Canonical URLs in first-seen order
    pub canonical: Vec<String>,
    pub categories: Vec<CategoryResult>,
    pub rendered: String,
}

/// Normalize `raw`, classify the result and render it.
pub fn run_filter<S: AsRef<str>>(
    raw: &[S],
    classifier: &Classifier,
    renderer: &ReportRenderer,
) -> Result<FilterOutcome> {
    let canonical = normalize(raw);
    let categories = classifier.classify(&canonical);
    let rendered = renderer.render(&categories)?;

    Ok(FilterOutcome {
        canonical,
        categories,
        rendered,
    })
}
