//! Optional per-source revalidation window for the aggregation endpoint.
//!
//! A cached list is served until it is older than the configured TTL. Empty
//! lists are never stored, so an upstream outage is retried on the next
//! request instead of being pinned for the whole window.

use crate::models::NormalizedArticle;
use crate::sources::Source;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug)]
pub struct RevalidationCache {
    ttl: Duration,
    entries: Mutex<HashMap<Source, (Instant, Vec<NormalizedArticle>)>>,
}

impl RevalidationCache {
    /// Returns `None` for a zero TTL, which disables caching.
    pub fn new(ttl: Duration) -> Option<Self> {
        if ttl.is_zero() {
            return None;
        }
        Some(Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        })
    }

    pub async fn get(&self, source: Source) -> Option<Vec<NormalizedArticle>> {
        let entries = self.entries.lock().await;
        let (stored_at, articles) = entries.get(&source)?;
        if stored_at.elapsed() < self.ttl {
            debug!(%source, age_ms = stored_at.elapsed().as_millis() as u64, "Serving cached articles");
            Some(articles.clone())
        } else {
            None
        }
    }

    pub async fn put(&self, source: Source, articles: &[NormalizedArticle]) {
        let mut entries = self.entries.lock().await;
        if articles.is_empty() {
            entries.remove(&source);
        } else {
            entries.insert(source, (Instant::now(), articles.to_vec()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::article;

    #[test]
    fn test_zero_ttl_disables_cache() {
        assert!(RevalidationCache::new(Duration::ZERO).is_none());
        assert!(RevalidationCache::new(Duration::from_secs(600)).is_some());
    }

    #[tokio::test]
    async fn test_cache_hit_within_ttl() {
        let cache = RevalidationCache::new(Duration::from_secs(600)).unwrap();
        cache.put(Source::NewsApi, &[article("A", "a")]).await;

        let hit = cache.get(Source::NewsApi).await.unwrap();
        assert_eq!(hit[0].title, "A");
        assert!(cache.get(Source::NyTimes).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_expires() {
        let cache = RevalidationCache::new(Duration::from_millis(20)).unwrap();
        cache.put(Source::Mediastack, &[article("A", "a")]).await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(cache.get(Source::Mediastack).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_result_is_not_cached() {
        let cache = RevalidationCache::new(Duration::from_secs(600)).unwrap();
        cache.put(Source::NewsApi, &[article("A", "a")]).await;
        cache.put(Source::NewsApi, &[]).await;

        assert!(cache.get(Source::NewsApi).await.is_none());
    }
}
