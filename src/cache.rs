//! Single-slot cache for the most recent news collection.
//!
//! Only the last aggregation is kept. An entry is valid for the TTL (30
//! minutes by default) and only for the exact set of sources it was built
//! from: the key is a SHA-256 fingerprint of the sorted source list, so
//! reordering sources hits the cache while adding or removing one misses.

use crate::models::NewsItem;
use itertools::Itertools;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Stable fingerprint of a source list, independent of order.
pub fn cache_key<S: AsRef<str>>(sources: &[S]) -> String {
    let joined = sources.iter().map(|s| s.as_ref()).sorted().join("|");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub stored_at: Instant,
    pub items: Vec<NewsItem>,
}

#[derive(Debug)]
pub struct NewsCache {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
}

impl Default for NewsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NewsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Items stored under `key`, if the entry has not expired.
    pub async fn get(&self, key: &str) -> Option<Vec<NewsItem>> {
        let slot = self.slot.read().await;
        let entry = slot.as_ref()?;
        if entry.key != key {
            debug!(cached_key = %entry.key, requested_key = %key, "Cache key mismatch");
            return None;
        }
        let age = entry.stored_at.elapsed();
        if age >= self.ttl {
            debug!(age_secs = age.as_secs(), "Cache entry expired");
            return None;
        }
        Some(entry.items.clone())
    }

    /// Replace whatever is cached with `items` under `key`.
    pub async fn put(&self, key: &str, items: Vec<NewsItem>) {
        let mut slot = self.slot.write().await;
        *slot = Some(CacheEntry {
            key: key.to_string(),
            stored_at: Instant::now(),
            items,
        });
    }

    pub async fn invalidate(&self) {
        self.slot.write().await.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsSource;

    fn items(titles: &[&str]) -> Vec<NewsItem> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| NewsItem {
                title: t.to_string(),
                url: format!("https://a.example.com/{i}"),
                date: "2024.01.01".to_string(),
                raw_date: None,
                source: NewsSource::Naver,
                importance: None,
            })
            .collect()
    }

    #[test]
    fn test_cache_key_ignores_order() {
        let a = cache_key(&["https://b.example.com", "https://a.example.com"]);
        let b = cache_key(&["https://a.example.com", "https://b.example.com"]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_cache_key_changes_with_sources() {
        let a = cache_key(&["https://a.example.com"]);
        let b = cache_key(&["https://a.example.com", "https://b.example.com"]);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_get_returns_stored_items() {
        let cache = NewsCache::default();
        cache.put("k", items(&["first headline"])).await;
        assert_eq!(cache.get("k").await, Some(items(&["first headline"])));
    }

    #[tokio::test]
    async fn test_get_misses_on_other_key() {
        let cache = NewsCache::default();
        cache.put("k", items(&["first headline"])).await;
        assert_eq!(cache.get("other").await, None);
    }

    #[tokio::test]
    async fn test_put_replaces_previous_entry() {
        let cache = NewsCache::default();
        cache.put("k", items(&["first headline"])).await;
        cache.put("k2", items(&["second headline"])).await;
        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.get("k2").await, Some(items(&["second headline"])));
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = NewsCache::new(Duration::from_millis(30));
        cache.put("k", items(&["first headline"])).await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_invalidate_clears_slot() {
        let cache = NewsCache::default();
        cache.put("k", items(&["first headline"])).await;
        cache.invalidate().await;
        assert_eq!(cache.get("k").await, None);
    }
}
