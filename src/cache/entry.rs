//! Cache Entry Module
//!
//! Defines a stored value together with the instant it was last written.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value and its insertion/refresh time.
///
/// Entries carry no TTL of their own: liveness is always judged against the
/// store's current TTL, so a policy change applies to every existing entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, never mutated after insertion
    pub value: V,
    /// Time of the last `set` for this key
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: V) -> Self {
        Self::with_timestamp(value, Instant::now())
    }

    /// Creates a new entry stamped with an explicit time.
    pub fn with_timestamp(value: V, stored_at: Instant) -> Self {
        Self { value, stored_at }
    }

    // == Is Live ==
    /// Checks whether the entry is still fresh under `ttl`.
    ///
    /// Boundary condition: an entry whose age is exactly `ttl` is expired
    /// (`age < ttl` is required to be live).
    pub fn is_live(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}
