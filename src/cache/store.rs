//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::hash::Hash;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CachePolicy, CacheStats, LruTracker, PolicyUpdate, StatsSnapshot};

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
///
/// Expiry is lazy: an expired entry keeps its slot until it is read,
/// invalidated or pushed out by capacity pressure. Policy changes are
/// enforced the same way, on the next `get` (TTL) or `set` (size).
///
/// The store does no locking of its own; see [`SharedCache`](crate::cache::SharedCache)
/// for the concurrent handle.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Current TTL and capacity
    policy: CachePolicy,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries the cache can hold
    /// * `ttl_seconds` - TTL in seconds applied to every entry
    pub fn new(max_size: usize, ttl_seconds: u64) -> Self {
        Self::with_policy(CachePolicy::new(ttl_seconds, max_size))
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            policy,
        }
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// A hit marks the key most recently used. An expired entry is removed
    /// and counted as a miss, same as an absent one.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let ttl = self.policy.ttl();
        let now = Instant::now();

        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_live(ttl, now) {
            let value = entry.value.clone();
            self.lru.touch(key);
            self.stats.record_hit();
            return Some(value);
        }

        self.remove_entry(key);
        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores a value, overwriting any previous entry for the key.
    ///
    /// The entry is stamped with the current time and marked most recently
    /// used. Least recently used entries are then evicted until the store
    /// holds at most `max_size` entries.
    pub fn set(&mut self, key: K, value: V) {
        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value));
        self.evict_to_capacity();
    }

    // == Invalidate ==
    /// Removes an entry by key. Returns whether an entry was present.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.remove_entry(key)
    }

    // == Statistics ==
    /// Returns counters and policy as one consistent snapshot.
    pub fn statistics(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.stats.hits,
            misses: self.stats.misses,
            evictions: self.stats.evictions,
            current_size: self.entries.len(),
            max_size: self.policy.max_size,
            ttl: self.policy.ttl_seconds,
        }
    }

    // == Update Settings ==
    /// Applies a partial policy update.
    ///
    /// Existing entries are not re-checked here.
    pub fn update_settings(&mut self, update: PolicyUpdate) {
        self.policy.apply(update);
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &K) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }

    fn evict_to_capacity(&mut self) {
        while self.entries.len() > self.policy.max_size {
            let Some(evicted) = self.lru.evict_oldest() else {
                break;
            };
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!(
                size = self.entries.len(),
                max_size = self.policy.max_size,
                "Evicted least recently used entry"
            );
        }
    }
}

impl<K, V> Default for CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::with_policy(CachePolicy::default())
    }
}
