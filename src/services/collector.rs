//! Link collection across result pages.

use std::sync::Arc;

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::CrawlerConfig;
use crate::utils::jitter;

/// Gathers raw `href` values from result pages.
pub struct LinkCollector {
    fetcher: Arc<dyn PageFetcher>,
    jitter_micros: u64,
}

impl LinkCollector {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            jitter_micros: config.jitter_micros,
        }
    }

    /// Collect every anchor `href` from `pages`, or from `fallback` when
    /// there are no pages.
    ///
    /// Failures on individual pages are logged and skipped; a failure on
    /// the fallback page is returned.
    pub async fn collect(&self, pages: &[String], fallback: &str) -> Result<Vec<String>> {
        if pages.is_empty() {
            let anchors = self.fetcher.fetch(fallback).await?;
            return Ok(anchors.into_iter().map(|a| a.href).collect());
        }

        let mut hrefs = Vec::new();
        for (i, page) in pages.iter().enumerate() {
            if i > 0 {
                jitter(self.jitter_micros).await;
            }
            match self.fetcher.fetch(page).await {
                Ok(anchors) => hrefs.extend(anchors.into_iter().map(|a| a.href)),
                Err(e) => log::warn!("Skipping page {page}: {e}"),
            }
        }
        Ok(hrefs)
    }
}
