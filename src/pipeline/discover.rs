// src/pipeline/discover.rs

//! Link discovery across search engines.

use std::sync::Arc;

use futures::{StreamExt, stream};

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::{CrawlerConfig, Query};
use crate::services::{LinkCollector, Paginator};

/// Summary of a discovery run.
#[derive(Debug, Default)]
pub struct DiscoveryOutcome {
    /// Raw hrefs from every engine, concatenated in query order
    pub urls: Vec<String>,
    pub engine_total: usize,
    pub engine_failures: usize,
}

/// Sweep every query and concatenate the raw links they yield.
///
/// Engines run concurrently up to `max_concurrent`; a failing engine is
/// logged and contributes nothing.
pub async fn run_discovery(
    fetcher: Arc<dyn PageFetcher>,
    config: &CrawlerConfig,
    queries: &[Query],
) -> DiscoveryOutcome {
    let concurrency = config.max_concurrent.max(1);

    let results: Vec<_> = stream::iter(queries)
        .map(|query| {
            let fetcher = Arc::clone(&fetcher);
            async move { (query, sweep_engine(fetcher, config, query).await) }
        })
        .buffered(concurrency)
        .collect()
        .await;

    results.into_iter().fold(
        DiscoveryOutcome {
            engine_total: queries.len(),
            ..DiscoveryOutcome::default()
        },
        |mut outcome, (query, result)| {
            match result {
                Ok(urls) if urls.is_empty() => {
                    log::warn!("No URLs gathered from {}", query.engine);
                }
                Ok(urls) => {
                    log::info!("Gathered {} URLs from {}", urls.len(), query.engine);
                    outcome.urls.extend(urls);
                }
                Err(e) => {
                    outcome.engine_failures += 1;
                    log::error!("Sweep of {} failed: {}", query.engine, e);
                }
            }
            outcome
        },
    )
}

/// Paginate one query and collect the links on every page.
pub async fn sweep_engine(
    fetcher: Arc<dyn PageFetcher>,
    config: &CrawlerConfig,
    query: &Query,
) -> Result<Vec<String>> {
    log::info!("Crawling {}", query.engine);

    let pages = Paginator::new(Arc::clone(&fetcher), config)
        .paginate(&query.url)
        .await?;
    log::debug!("{}: {} follow-up pages", query.engine, pages.len());

    LinkCollector::new(fetcher, config)
        .collect(&pages, &query.url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use crate::models::Anchor;

    fn config() -> CrawlerConfig {
        CrawlerConfig {
            jitter_micros: 0,
            ..CrawlerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_sweep_engine_single_page() {
        let fetcher = Arc::new(MemoryFetcher::new().with_page(
            "https://s.com/q",
            vec![Anchor::new("hit", "http://a.com/jack")],
        ));
        let query = Query::new("S", "https://s.com/q");
        let urls = sweep_engine(fetcher.clone(), &config(), &query).await.unwrap();

        assert_eq!(urls, vec!["http://a.com/jack"]);
        assert_eq!(fetcher.visits(), vec!["https://s.com/q", "https://s.com/q"]);
    }

    #[tokio::test]
    async fn test_sweep_engine_paginated_skips_first_page() {
        let fetcher = Arc::new(
            MemoryFetcher::new()
                .with_page(
                    "https://s.com/q",
                    vec![
                        Anchor::new("first", "http://a.com/1"),
                        Anchor::new("Next", "/q2"),
                    ],
                )
                .with_page("https://s.com/q2", vec![Anchor::new("second", "http://a.com/2")]),
        );
        let query = Query::new("S", "https://s.com/q");
        let urls = sweep_engine(fetcher, &config(), &query).await.unwrap();

        assert_eq!(urls, vec!["http://a.com/2"]);
    }

    #[tokio::test]
    async fn test_failing_engine_does_not_abort_others() {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(
            MemoryFetcher::new()
                .with_page("https://b.com/q", vec![Anchor::new("x", "http://b.com/1")])
                .with_page("https://c.com/q", vec![Anchor::new("y", "http://c.com/1")]),
        );
        let queries = vec![
            Query::new("A", "https://a.com/q"),
            Query::new("B", "https://b.com/q"),
            Query::new("C", "https://c.com/q"),
        ];
        let outcome = run_discovery(fetcher, &config(), &queries).await;

        assert_eq!(outcome.engine_total, 3);
        assert_eq!(outcome.engine_failures, 1);
        assert_eq!(outcome.urls, vec!["http://b.com/1", "http://c.com/1"]);
    }
}
