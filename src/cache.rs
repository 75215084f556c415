use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// Thread-safe TTL cache keyed by string.
///
/// Entries are considered live while `now - stored_at < ttl` and are checked
/// (and dropped) on read. There is no background eviction; callers that hold
/// a cache for long uptimes can invoke `cleanup_expired` to reclaim
/// tombstones.
#[derive(Clone)]
pub struct TtlCache<V> {
    entries: Arc<DashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Look up a live entry, removing it if its TTL has lapsed.
    pub fn get(&self, key: &str) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            let age = Utc::now() - entry.stored_at;
            if age < self.ttl {
                return Some(entry.value().value.clone());
            }
            drop(entry); // release the shard lock before removing
            self.entries.remove(key);
        }
        None
    }

    pub fn set(&self, key: &str, value: V) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Utc::now(),
            },
        );
    }

    /// Drop every entry whose TTL has lapsed.
    pub fn cleanup_expired(&self) {
        let now = Utc::now();
        self.entries.retain(|_, entry| now - entry.stored_at < self.ttl);
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stores_and_retrieves_values() {
        let cache: TtlCache<String> = TtlCache::new(Duration::minutes(5));

        cache.set("AAPL", "quote".to_string());

        assert_eq!(cache.get("AAPL"), Some("quote".to_string()));
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let cache: TtlCache<String> = TtlCache::new(Duration::minutes(5));

        assert_eq!(cache.get("MSFT"), None);
    }

    #[test]
    fn test_expired_entries_are_dropped_on_read() {
        // Zero TTL means every entry is already expired when read back.
        let cache: TtlCache<i32> = TtlCache::new(Duration::zero());

        cache.set("AAPL", 1);

        assert_eq!(cache.get("AAPL"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::minutes(5));

        cache.set("AAPL", 1);
        cache.set("AAPL", 2);

        assert_eq!(cache.get("AAPL"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cleanup_expired_reclaims_tombstones() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::zero());

        cache.set("AAPL", 1);
        cache.set("MSFT", 2);
        assert_eq!(cache.len(), 2);

        cache.cleanup_expired();

        assert!(cache.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::minutes(5));
        let clone = cache.clone();

        cache.set("AAPL", 7);

        assert_eq!(clone.get("AAPL"), Some(7));
    }
}
