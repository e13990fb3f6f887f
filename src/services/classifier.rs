// src/services/classifier.rs

//! URL classification against ordered allow/deny rules.
//!
//! A URL is dropped if it matches any deny rule. Surviving URLs are filed
//! under every allow rule they match. Surviving URLs that match the vendor
//! signature but no allow rule end up in the trailing "No Category" bucket.

use std::collections::HashSet;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{CategoryResult, CategoryRule, NO_CATEGORY};

/// Default vendor signature seeding "No Category".
pub const DEFAULT_SIGNATURE: &str = r"sendgrid\.net/";

const NO_CATEGORY_DESCRIPTION: &str = "a category for urls with no category";

/// Applies category rules to canonical URLs.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
    signature: Regex,
}

impl Classifier {
    /// Create a classifier using the default vendor signature.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        let signature = Regex::new(DEFAULT_SIGNATURE)
            .map_err(|e| AppError::pattern("signature", e))?;
        Ok(Self::with_signature(rules, signature))
    }

    pub fn with_signature(rules: Vec<CategoryRule>, signature: Regex) -> Self {
        Self { rules, signature }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// URLs matching no deny rule, in input order.
    pub fn deny_pass<'a>(&self, urls: &'a [String]) -> Vec<&'a str> {
        let deny: Vec<&CategoryRule> = self.rules.iter().filter(|r| !r.allowed).collect();
        urls.iter()
            .map(String::as_str)
            .filter(|url| match deny.iter().find(|rule| rule.is_match(url)) {
                Some(rule) => {
                    log::debug!("Denied by '{}': {url}", rule.name);
                    false
                }
                None => true,
            })
            .collect()
    }

    /// File `urls` into categories: allow rules in configured order, then
    /// "No Category".
    pub fn classify(&self, urls: &[String]) -> Vec<CategoryResult> {
        let passed = self.deny_pass(urls);
        log::info!(
            "{} of {} URLs passed the deny rules",
            passed.len(),
            urls.len()
        );

        let mut categories: Vec<CategoryResult> = self
            .rules
            .iter()
            .filter(|r| r.allowed)
            .map(|rule| {
                let mut category = CategoryResult::new(&rule.name, &rule.description);
                category.urls = passed
                    .iter()
                    .filter(|url| rule.is_match(url))
                    .map(|url| url.to_string())
                    .collect();
                category
            })
            .collect();

        let categorized: HashSet<&str> = categories
            .iter()
            .flat_map(|c| c.urls.iter().map(String::as_str))
            .collect();

        let mut no_category = CategoryResult::new(NO_CATEGORY, NO_CATEGORY_DESCRIPTION);
        let mut seen = HashSet::new();
        no_category.urls = passed
            .iter()
            .copied()
            .filter(|url| self.signature.is_match(url))
            .filter(|url| !categorized.contains(url) && seen.insert(*url))
            .map(str::to_string)
            .collect();

        for category in &categories {
            log::info!("Category '{}': {} URLs", category.name, category.urls.len());
        }
        log::info!("Category '{}': {} URLs", NO_CATEGORY, no_category.urls.len());

        categories.push(no_category);
        categories
    }
}
