//! A generic key-value cache with per-entry time-to-live.
//!
//! Expiry is lazy: `get` removes and skips entries whose deadline has
//! passed, and [`TtlCache::cleanup`] sweeps the rest when a host wants to
//! reclaim memory between requests. The cache carries no lock of its own;
//! multi-threaded callers wrap it in a mutex and serialize access.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// Key-value store whose entries expire after their individual TTL.
///
/// There is no maximum size; unbounded growth is accepted given short TTLs
/// and a bounded key space.
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns a clone of the live value for `key`, if any.
    ///
    /// An expired entry is removed on the way out and reported as absent.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(Instant::now()),
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key`, expiring `ttl` from now. An existing
    /// entry for the key is replaced along with its deadline.
    pub fn set(&mut self, key: K, value: V, ttl: Duration) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Removes the entry for `key`, expired or not.
    pub fn delete(&mut self, key: &K) {
        self.entries.remove(key);
    }

    /// Sweeps every expired entry.
    pub fn cleanup(&mut self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }

    /// Number of entries currently stored, expired ones included until the
    /// next `get` or `cleanup` touches them.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
