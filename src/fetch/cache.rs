//! On-disk response cache keyed by request URL.
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! └── <sha256(url) as hex>.json   # { url, fetched_at, body }
//! ```
//!
//! Each entry is written to a temporary file and renamed into place, so
//! concurrent writers for the same URL leave one complete entry behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    body: String,
}

/// Filesystem cache of fetched page bodies.
#[derive(Debug, Clone)]
pub struct PageCache {
    root_dir: PathBuf,
    ttl: Option<TimeDelta>,
}

impl PageCache {
    /// Create a cache rooted at `root_dir`. Entries older than `ttl_secs`
    /// are treated as misses; `None` keeps entries forever.
    pub fn new(root_dir: impl Into<PathBuf>, ttl_secs: Option<u64>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ttl: ttl_secs.and_then(|secs| TimeDelta::try_seconds(i64::try_from(secs).ok()?)),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn key(url: &str) -> String {
        hex::encode(Sha256::digest(url.as_bytes()))
    }

    fn path(&self, url: &str) -> PathBuf {
        self.root_dir.join(format!("{}.json", Self::key(url)))
    }

    /// Look up a fresh body for `url`.
    pub async fn get(&self, url: &str) -> Result<Option<String>> {
        let bytes = match tokio::fs::read(self.path(url)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Ignoring corrupt cache entry for {url}: {e}");
                return Ok(None);
            }
        };

        if entry.url != url {
            return Ok(None);
        }
        if let Some(ttl) = self.ttl {
            if Utc::now() - entry.fetched_at > ttl {
                log::debug!("Cache entry for {url} expired");
                return Ok(None);
            }
        }
        Ok(Some(entry.body))
    }

    /// Store `body` as the response for `url`.
    pub async fn put(&self, url: &str, body: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;

        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: Utc::now(),
            body: body.to_string(),
        };
        let bytes = serde_json::to_vec(&entry)?;

        let path = self.path(url);
        let tmp = path.with_extension(format!("{:016x}.tmp", rand::random::<u64>()));
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Remove the cache directory. Returns whether anything was deleted.
    pub async fn clear(&self) -> Result<bool> {
        match tokio::fs::remove_dir_all(&self.root_dir).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path(), None);

        assert_eq!(cache.get("https://a.com/").await.unwrap(), None);
        cache.put("https://a.com/", "<html></html>").await.unwrap();
        assert_eq!(
            cache.get("https://a.com/").await.unwrap().as_deref(),
            Some("<html></html>")
        );
        assert_eq!(cache.get("https://b.com/").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_zero_ttl_expires() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path(), Some(0));
        cache.put("https://a.com/", "body").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert_eq!(cache.get("https://a.com/").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path(), None);
        tokio::fs::write(cache.path("https://a.com/"), b"not json")
            .await
            .unwrap();
        assert_eq!(cache.get("https://a.com/").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path().join("cache"), None);
        assert!(!cache.clear().await.unwrap());
        cache.put("https://a.com/", "body").await.unwrap();
        assert!(cache.clear().await.unwrap());
        assert_eq!(cache.get("https://a.com/").await.unwrap(), None);
    }
}
