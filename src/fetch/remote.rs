//! Live page fetcher.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::fetch::{PageCache, PageFetcher};
use crate::models::{Anchor, CrawlerConfig};
use crate::utils::http::{create_async_client, extract_anchors, fetch_body};

/// Fetches pages over HTTP, consulting the disk cache first when enabled.
pub struct HttpFetcher {
    client: Client,
    cache: Option<PageCache>,
}

impl HttpFetcher {
    /// Create a fetcher from crawler settings.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        let cache = config
            .cache_dir
            .as_ref()
            .map(|dir| PageCache::new(dir, config.cache_ttl_secs));
        Ok(Self::with_client(client, cache))
    }

    pub fn with_client(client: Client, cache: Option<PageCache>) -> Self {
        Self { client, cache }
    }

    async fn body(&self, url: &str) -> Result<String> {
        if let Some(cache) = &self.cache {
            match cache.get(url).await {
                Ok(Some(body)) => {
                    log::debug!("Cache hit: {url}");
                    return Ok(body);
                }
                Ok(None) => {}
                Err(e) => log::warn!("Cache read failed for {url}: {e}"),
            }
        }

        let body = fetch_body(&self.client, url).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(url, &body).await {
                log::warn!("Cache write failed for {url}: {e}");
            }
        }
        Ok(body)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<Anchor>> {
        let body = self.body(url).await?;
        Ok(extract_anchors(&body))
    }
}
