//! Time-bounded in-memory cache.
//!
//! A key/value store whose entries expire a fixed TTL after insertion.
//! Expired entries are removed lazily on the read that observes them;
//! there is no background sweep. No capacity bound either: the key space
//! (championship ids) is small, bounded business data.

use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

/// Lazy-eviction TTL cache. Callers that share one across tasks wrap it
/// in a lock; the cache itself holds no interior synchronization.
pub struct TtlCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl: Duration,
}

impl<T> TtlCache<T> {
    /// Create a cache whose entries live for `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Look up `key`, returning `None` when it was never set or when the
    /// entry has outlived the TTL. An expired entry is deleted here.
    pub fn get(&mut self, key: &str) -> Option<&T> {
        self.get_at(key, Instant::now())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&mut self, key: &str, value: T) {
        self.set_at(key, value, Instant::now());
    }

    fn get_at(&mut self, key: &str, now: Instant) -> Option<&T> {
        let expired = match self.entries.get(key) {
            None => return None,
            Some(entry) => now.duration_since(entry.stored_at) > self.ttl,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| &entry.value)
    }

    fn set_at(&mut self, key: &str, value: T, now: Instant) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    /// Number of live-or-expired entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let mut cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("absent"), None);
    }

    #[test]
    fn test_get_within_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();

        cache.set_at("k", 42, t0);
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(59)), Some(&42));
    }

    #[test]
    fn test_get_at_exact_ttl_still_visible() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();

        cache.set_at("k", 7, t0);
        // Boundary: now - stored_at == ttl is not yet expired.
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(60)), Some(&7));
    }

    #[test]
    fn test_expired_entry_absent_and_evicted() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();

        cache.set_at("k", 42, t0);
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(61)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_refreshes_timestamp() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();

        cache.set_at("k", 1, t0);
        cache.set_at("k", 2, t0 + Duration::from_secs(50));

        // Entry was rewritten at t0+50, so it survives past t0+60.
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(100)), Some(&2));
    }

    #[test]
    fn test_eviction_only_touches_read_key() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();

        cache.set_at("old", 1, t0);
        cache.set_at("new", 2, t0 + Duration::from_secs(120));

        assert_eq!(cache.get_at("old", t0 + Duration::from_secs(130)), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_at("new", t0 + Duration::from_secs(130)), Some(&2));
    }
}
