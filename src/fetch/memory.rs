//! In-memory page fetcher.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::fetch::PageFetcher;
use crate::models::Anchor;

/// Serves canned anchor lists by URL and records every request.
///
/// Unknown URLs fail with a fetch error.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, Vec<Anchor>>,
    visits: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page.
    pub fn with_page(mut self, url: impl Into<String>, anchors: Vec<Anchor>) -> Self {
        self.pages.insert(url.into(), anchors);
        self
    }

    /// URLs requested so far, in request order.
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<Anchor>> {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(url.to_string());
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::fetch(url, "no such page"))
    }
}
