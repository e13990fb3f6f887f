// src/services/paginator.rs

//! Search result pagination.
//!
//! Follows every anchor whose text contains "Next", depth-first, and
//! reports the follow-up page URLs in discovery order.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::{Anchor, CrawlerConfig};
use crate::utils::{jitter, resolve};

/// Walks "Next" links from a search result page.
pub struct Paginator {
    fetcher: Arc<dyn PageFetcher>,
    max_pages: usize,
    jitter_micros: u64,
}

impl Paginator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            max_pages: config.max_pages,
            jitter_micros: config.jitter_micros,
        }
    }

    /// Return every page reachable through "Next" links, excluding
    /// `search_url` itself.
    ///
    /// An empty result means the query fits on a single page. Only a
    /// failure to fetch `search_url` is an error; a failing follow-up page
    /// is logged and ends its chain.
    pub async fn paginate(&self, search_url: &str) -> Result<Vec<String>> {
        let first = self.fetcher.fetch(search_url).await?;

        let mut pages = Vec::new();
        let start = resolve(search_url, "").unwrap_or_else(|| search_url.to_string());
        let mut visited = HashSet::from([start]);
        let mut pending = vec![next_links(search_url, &first).into_iter()];

        loop {
            let next = match pending.last_mut() {
                Some(links) => links.next(),
                None => break,
            };
            let Some(url) = next else {
                pending.pop();
                continue;
            };

            if !visited.insert(url.clone()) {
                log::debug!("Skipping already visited page {url}");
                continue;
            }
            if pages.len() >= self.max_pages {
                log::warn!(
                    "Stopping pagination of {search_url} after {} pages",
                    self.max_pages
                );
                break;
            }

            log::debug!("Next page: {url}");
            pages.push(url.clone());

            jitter(self.jitter_micros).await;
            match self.fetcher.fetch(&url).await {
                Ok(anchors) => pending.push(next_links(&url, &anchors).into_iter()),
                Err(e) => log::warn!("Failed to fetch page {url}: {e}"),
            }
        }

        Ok(pages)
    }
}

/// Absolute URLs of the "Next" anchors on a page, in document order.
fn next_links(page_url: &str, anchors: &[Anchor]) -> Vec<String> {
    anchors
        .iter()
        .filter(|a| a.is_next())
        .filter_map(|a| {
            let resolved = resolve(page_url, &a.href);
            if resolved.is_none() {
                log::debug!("Cannot resolve '{}' against {page_url}", a.href);
            }
            resolved
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;

    fn paginator(fetcher: MemoryFetcher) -> (Arc<MemoryFetcher>, Paginator) {
        let fetcher = Arc::new(fetcher);
        let config = CrawlerConfig {
            jitter_micros: 0,
            ..CrawlerConfig::default()
        };
        (Arc::clone(&fetcher), Paginator::new(fetcher, &config))
    }

    #[tokio::test]
    async fn test_single_page_returns_empty() {
        let (_, paginator) = paginator(MemoryFetcher::new().with_page(
            "https://s.com/q",
            vec![Anchor::new("result", "http://a.com/1")],
        ));
        assert!(paginator.paginate("https://s.com/q").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_three_page_chain() {
        let (_, paginator) = paginator(
            MemoryFetcher::new()
                .with_page("https://s.com/q", vec![Anchor::new("Next", "/q?p=2")])
                .with_page("https://s.com/q?p=2", vec![Anchor::new("Next", "/q?p=3")])
                .with_page("https://s.com/q?p=3", vec![Anchor::new("1 2 3", "/q")]),
        );
        assert_eq!(
            paginator.paginate("https://s.com/q").await.unwrap(),
            vec!["https://s.com/q?p=2", "https://s.com/q?p=3"]
        );
    }

    #[tokio::test]
    async fn test_depth_first_order() {
        let (_, paginator) = paginator(
            MemoryFetcher::new()
                .with_page(
                    "https://s.com/q",
                    vec![Anchor::new("Next", "/a"), Anchor::new("Next »", "/b")],
                )
                .with_page("https://s.com/a", vec![Anchor::new("Next", "/a2")])
                .with_page("https://s.com/a2", vec![])
                .with_page("https://s.com/b", vec![]),
        );
        assert_eq!(
            paginator.paginate("https://s.com/q").await.unwrap(),
            vec!["https://s.com/a", "https://s.com/a2", "https://s.com/b"]
        );
    }

    #[tokio::test]
    async fn test_cycle_terminates() {
        let (fetcher, paginator) = paginator(
            MemoryFetcher::new()
                .with_page("https://s.com/1", vec![Anchor::new("Next", "/2")])
                .with_page("https://s.com/2", vec![Anchor::new("Next", "/1")]),
        );
        assert_eq!(
            paginator.paginate("https://s.com/1").await.unwrap(),
            vec!["https://s.com/2"]
        );
        assert_eq!(fetcher.visits().len(), 2);
    }

    #[tokio::test]
    async fn test_link_back_to_first_page_in_other_spelling() {
        let (fetcher, paginator) = paginator(
            MemoryFetcher::new()
                .with_page("https://s.com", vec![Anchor::new("Next", "/p2")])
                .with_page("https://s.com/p2", vec![Anchor::new("Next", "/")]),
        );
        assert_eq!(
            paginator.paginate("https://s.com").await.unwrap(),
            vec!["https://s.com/p2"]
        );
        assert_eq!(fetcher.visits(), vec!["https://s.com", "https://s.com/p2"]);
    }

    #[tokio::test]
    async fn test_max_pages_bound() {
        let mut fetcher = MemoryFetcher::new();
        for i in 0..20 {
            fetcher = fetcher.with_page(
                format!("https://s.com/{i}"),
                vec![Anchor::new("Next", format!("/{}", i + 1))],
            );
        }
        let fetcher = Arc::new(fetcher);
        let config = CrawlerConfig {
            jitter_micros: 0,
            max_pages: 5,
            ..CrawlerConfig::default()
        };
        let paginator = Paginator::new(fetcher, &config);
        assert_eq!(paginator.paginate("https://s.com/0").await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_failed_follow_up_page_ends_chain() {
        let (_, paginator) = paginator(
            MemoryFetcher::new().with_page("https://s.com/q", vec![Anchor::new("Next", "/gone")]),
        );
        assert_eq!(
            paginator.paginate("https://s.com/q").await.unwrap(),
            vec!["https://s.com/gone"]
        );
    }

    #[tokio::test]
    async fn test_first_page_failure_is_error() {
        let (_, paginator) = paginator(MemoryFetcher::new());
        assert!(paginator.paginate("https://s.com/q").await.is_err());
    }

    #[tokio::test]
    async fn test_lowercase_next_is_ignored() {
        let (_, paginator) = paginator(
            MemoryFetcher::new()
                .with_page("https://s.com/q", vec![Anchor::new("next", "/q?p=2")]),
        );
        assert!(paginator.paginate("https://s.com/q").await.unwrap().is_empty());
    }
}
