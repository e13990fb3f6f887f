// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Anchor, CrawlerConfig};

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page body, treating non-success statuses as errors.
pub async fn fetch_body(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AppError::fetch(url, e))?;
    response.text().await.map_err(|e| AppError::fetch(url, e))
}

/// Extract every `<a href>` from an HTML document, in document order.
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|el| {
            let href = el.value().attr("href")?;
            Some(Anchor::new(el.text().collect::<String>(), href))
        })
        .collect()
}
