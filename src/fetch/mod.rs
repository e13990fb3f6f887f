//! Page fetching behind a swappable trait.
//!
//! - `HttpFetcher`: reqwest client with an optional on-disk response cache
//! - `MemoryFetcher`: canned pages keyed by URL, for offline runs and tests

pub mod cache;
pub mod memory;
pub mod remote;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Anchor;

pub use cache::PageCache;
pub use memory::MemoryFetcher;
pub use remote::HttpFetcher;

/// Retrieves a document and returns its anchor elements.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return every `<a href>` in document order.
    async fn fetch(&self, url: &str) -> Result<Vec<Anchor>>;
}
