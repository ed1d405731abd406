//! Bounded memoization cache.
//!
//! A small LRU cache with per-entry expiry, used to avoid repeated model calls
//! for unchanged input. This is a cost control, not a correctness mechanism:
//! a miss simply means the call is made again.

use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// An LRU cache whose entries expire after a fixed time-to-live.
///
/// Expired entries are treated as absent; the oldest entry is evicted once
/// capacity is reached.
pub struct BoundedCache<K: Hash + Eq, V> {
    entries: LruCache<K, (V, Instant)>,
    ttl: Duration,
}

impl<K: Hash + Eq, V: Clone> BoundedCache<K, V> {
    /// Create a cache holding at most `capacity` entries, each valid for `ttl`.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap();
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    /// Look up a value, ignoring entries older than the TTL.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some((value, stored_at)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                self.entries.pop(key);
                None
            }
            None => None,
        }
    }

    /// Insert a value, evicting the least recently used entry if full.
    pub fn put(&mut self, key: K, value: V) {
        self.entries.put(key, (value, Instant::now()));
    }

    /// Number of live entries (expired entries may still be counted).
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
    fn test_hit_and_miss() {
        let mut cache: BoundedCache<String, String> =
            BoundedCache::new(8, Duration::from_secs(60));
        assert!(cache.get(&"a".to_string()).is_none());

        cache.put("a".to_string(), "1".to_string());
        assert_eq!(cache.get(&"a".to_string()), Some("1".to_string()));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache: BoundedCache<u32, u32> = BoundedCache::new(2, Duration::from_secs(60));
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);

        assert!(cache.get(&1).is_none());
        assert_eq!(cache.get(&2), Some(20));
        assert_eq!(cache.get(&3), Some(30));
    }

    #[test]
    fn test_ttl_expiry() {
        let mut cache: BoundedCache<u32, u32> = BoundedCache::new(8, Duration::from_millis(10));
        cache.put(1, 10);
        assert_eq!(cache.get(&1), Some(10));

        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get(&1).is_none());
    }

    #[test]
    fn test_recently_used_survives_eviction() {
        let mut cache: BoundedCache<u32, u32> = BoundedCache::new(2, Duration::from_secs(60));
        cache.put(1, 10);
        cache.put(2, 20);
        // Touch 1 so 2 becomes the eviction candidate.
        assert_eq!(cache.get(&1), Some(10));
        cache.put(3, 30);

        assert_eq!(cache.get(&1), Some(10));
        assert!(cache.get(&2).is_none());
    }
}
