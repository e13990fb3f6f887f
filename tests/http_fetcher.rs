//! HttpFetcher against a local mock server.

use std::sync::Arc;

use linkhound::fetch::{HttpFetcher, PageCache, PageFetcher};
use linkhound::models::{CrawlerConfig, Query};
use linkhound::pipeline::sweep_engine;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><body>{body}</body></html>").into_bytes(),
        "text/html",
    )
}

fn crawler_config(cache_dir: Option<std::path::PathBuf>) -> CrawlerConfig {
    CrawlerConfig {
        jitter_micros: 0,
        timeout_secs: 5,
        cache_dir,
        ..CrawlerConfig::default()
    }
}

#[tokio::test]
async fn extracts_anchors_from_live_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html(
            r#"<a href="http://a.com/jack">A</a><a href="/search?start=10">Next</a>"#,
        ))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&crawler_config(None)).unwrap();
    let anchors = fetcher
        .fetch(&format!("{}/search", server.uri()))
        .await
        .unwrap();

    assert_eq!(anchors.len(), 2);
    assert_eq!(anchors[0].href, "http://a.com/jack");
    assert!(anchors[1].is_next());
}

#[tokio::test]
async fn error_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blocked"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&crawler_config(None)).unwrap();
    let result = fetcher.fetch(&format!("{}/blocked", server.uri())).await;
    assert!(matches!(
        result,
        Err(linkhound::error::AppError::Fetch { .. })
    ));
}

#[tokio::test]
async fn cached_pages_are_not_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html(r#"<a href="http://a.com/jack">A</a>"#))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = HttpFetcher::new(&crawler_config(Some(dir.path().to_path_buf()))).unwrap();
    let url = format!("{}/search", server.uri());

    let first = fetcher.fetch(&url).await.unwrap();
    let second = fetcher.fetch(&url).await.unwrap();
    assert_eq!(first, second);

    let cache = PageCache::new(dir.path(), None);
    assert!(cache.get(&url).await.unwrap().is_some());
}

#[tokio::test]
async fn sweeps_paginated_results_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "10"))
        .respond_with(html(
            r#"<a href="/url?q=http%3A%2F%2Fb.com%2Fjack">B</a><a href="/search?q=jack&amp;start=20">Next</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "20"))
        .respond_with(html(r#"<a href="http://c.com/jack">C</a>"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html(
            r#"<a href="http://a.com/jack">A</a><a href="/search?q=jack&amp;start=10">Next page</a>"#,
        ))
        .mount(&server)
        .await;

    let fetcher: Arc<dyn PageFetcher> =
        Arc::new(HttpFetcher::new(&crawler_config(None)).unwrap());
    let query = Query::new("Mock", format!("{}/search?q=jack", server.uri()));
    let urls = sweep_engine(fetcher, &crawler_config(None), &query)
        .await
        .unwrap();

    assert_eq!(
        urls,
        vec![
            "/url?q=http%3A%2F%2Fb.com%2Fjack",
            "/search?q=jack&start=20",
            "http://c.com/jack",
        ]
    );
}
