//! Shared Cache Handle
//!
//! Thread-safe, cloneable access to a single [`CacheStore`].

use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{CachePolicy, CacheStore, PolicyUpdate, StatsSnapshot};

// == Shared Cache ==
/// Cloneable handle to one cache store.
///
/// Every operation takes the store lock for exactly one store call and
/// releases it before returning. Clones share the same store.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<CacheStore<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Wraps an existing store.
    pub fn new(store: CacheStore<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self::new(CacheStore::with_policy(policy))
    }

    /// See [`CacheStore::get`].
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().await.get(key)
    }

    /// See [`CacheStore::set`].
    pub async fn set(&self, key: K, value: V) {
        self.inner.lock().await.set(key, value);
    }

    /// See [`CacheStore::invalidate`].
    pub async fn invalidate(&self, key: &K) -> bool {
        self.inner.lock().await.invalidate(key)
    }

    /// See [`CacheStore::statistics`].
    pub async fn statistics(&self) -> StatsSnapshot {
        self.inner.lock().await.statistics()
    }

    /// See [`CacheStore::update_settings`].
    pub async fn update_settings(&self, update: PolicyUpdate) {
        self.inner.lock().await.update_settings(update);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_one_store() {
        let cache: SharedCache<String, u32> = SharedCache::new(CacheStore::new(10, 60));
        let other = cache.clone();

        cache.set("a".to_string(), 1).await;

        assert_eq!(other.get(&"a".to_string()).await, Some(1));
        assert_eq!(other.statistics().await.hits, 1);
    }

    #[tokio::test]
    async fn test_update_settings_through_handle() {
        let cache: SharedCache<String, u32> = SharedCache::with_policy(CachePolicy::default());

        cache
            .update_settings(PolicyUpdate {
                ttl: Some(5),
                max_size: Some(1),
            })
            .await;

        let stats = cache.statistics().await;
        assert_eq!(stats.ttl, 5);
        assert_eq!(stats.max_size, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sets_respect_capacity() {
        let cache: SharedCache<u32, u32> = SharedCache::new(CacheStore::new(8, 60));

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache.set(i, i * 2).await;
                    cache.get(&i).await
                })
            })
            .collect();

        for handle in handles {
            let _ = handle.await.expect("Task should not panic");
        }

        assert_eq!(cache.len().await, 8);
        assert_eq!(cache.statistics().await.evictions, 56);
    }

    #[tokio::test]
    async fn test_invalidate_and_empty() {
        let cache: SharedCache<String, u32> = SharedCache::new(CacheStore::new(10, 60));

        cache.set("a".to_string(), 1).await;
        assert!(cache.invalidate(&"a".to_string()).await);
        assert!(!cache.invalidate(&"a".to_string()).await);
        assert!(cache.is_empty().await);
    }
}
