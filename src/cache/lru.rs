//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with a strictly increasing tick:
/// - Smallest tick = Least recently used
/// - Largest tick = Most recently used
///
/// Keys that were never touched again after insertion therefore leave
/// in insertion order.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Tick -> key, ordered oldest first
    order: BTreeMap<u64, K>,
    /// Key -> its current tick
    ticks: HashMap<K, u64>,
    /// Next tick to hand out
    next_tick: u64,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            order: BTreeMap::new(),
            ticks: HashMap::new(),
            next_tick: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// If the key is already tracked its previous position is dropped.
    pub fn touch(&mut self, key: &K) {
        let tick = self.next_tick;
        self.next_tick += 1;

        if let Some(previous) = self.ticks.insert(key.clone(), tick) {
            self.order.remove(&previous);
        }
        self.order.insert(tick, key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &K) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with(keys: &[&str]) -> LruTracker<String> {
        let mut lru = LruTracker::new();
        for key in keys {
            lru.touch(&key.to_string());
        }
        lru
    }

    #[test]
    fn test_lru_new() {
        let mut lru: LruTracker<String> = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_insertion_order_breaks_ties() {
        let mut lru = tracker_with(&["a", "b", "c"]);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.evict_oldest(), Some("a".to_string()));
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = tracker_with(&["a", "b", "c"]);

        lru.touch(&"a".to_string());

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.evict_oldest(), Some("b".to_string()));
    }

    #[test]
    fn test_lru_evict_in_recency_order() {
        let mut lru = tracker_with(&["a", "b", "c"]);

        // front-to-back recency after these: b, c, a
        lru.touch(&"a".to_string());
        lru.touch(&"c".to_string());
        lru.touch(&"b".to_string());

        assert_eq!(lru.evict_oldest(), Some("a".to_string()));
        assert_eq!(lru.evict_oldest(), Some("c".to_string()));
        assert_eq!(lru.evict_oldest(), Some("b".to_string()));
        assert_eq!(lru.evict_oldest(), None);
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = tracker_with(&["a", "b", "c"]);

        lru.remove(&"b".to_string());
        lru.remove(&"missing".to_string());

        assert_eq!(lru.len(), 2);
        assert_eq!(lru.evict_oldest(), Some("a".to_string()));
        assert_eq!(lru.evict_oldest(), Some("c".to_string()));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_remove_oldest_moves_head() {
        let mut lru = tracker_with(&["a", "b"]);

        lru.remove(&"a".to_string());

        assert_eq!(lru.evict_oldest(), Some("b".to_string()));
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = tracker_with(&["k", "k", "k"]);

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest(), Some("k".to_string()));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_non_string_keys() {
        let mut lru = LruTracker::new();
        lru.touch(&1u64);
        lru.touch(&2u64);
        lru.touch(&1u64);

        assert_eq!(lru.evict_oldest(), Some(2));
    }
}
