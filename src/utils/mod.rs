//! Utility functions and helpers.

pub mod http;

use std::time::Duration;

use rand::Rng;
use url::Url;

/// Resolve a potentially relative URL against the page it was found on.
///
/// Returns `None` when the base is not an absolute URL or the join fails.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    Url::parse(base_url)
        .ok()?
        .join(href)
        .ok()
        .map(|u| u.to_string())
}

/// Sleep for a random duration below `max_micros` microseconds.
pub async fn jitter(max_micros: u64) {
    if max_micros == 0 {
        return;
    }
    let micros = rand::rng().random_range(0..max_micros);
    tokio::time::sleep(Duration::from_micros(micros)).await;
}
