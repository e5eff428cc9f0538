//! Cache Policy Module
//!
//! The runtime-adjustable bounds of a cache store.

use std::time::Duration;

/// Default TTL in seconds
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Default capacity in entries
pub const DEFAULT_MAX_SIZE: usize = 100;

// == Cache Policy ==
/// TTL and capacity currently enforced by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Time-to-live applied uniformly to every entry
    pub ttl_seconds: u64,
    /// Maximum number of entries held after any `set`
    pub max_size: usize,
}

impl CachePolicy {
    pub fn new(ttl_seconds: u64, max_size: usize) -> Self {
        Self {
            ttl_seconds,
            max_size,
        }
    }

    /// TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    // == Apply ==
    /// Applies the fields present in `update`, leaving the others untouched.
    pub fn apply(&mut self, update: PolicyUpdate) {
        if let Some(ttl) = update.ttl {
            self.ttl_seconds = ttl;
        }
        if let Some(max_size) = update.max_size {
            self.max_size = max_size;
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECONDS, DEFAULT_MAX_SIZE)
    }
}

// == Policy Update ==
/// A partial policy change; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyUpdate {
    /// New TTL in seconds
    pub ttl: Option<u64>,
    /// New capacity in entries
    pub max_size: Option<usize>,
}

impl PolicyUpdate {
    pub fn ttl(ttl: u64) -> Self {
        Self {
            ttl: Some(ttl),
            max_size: None,
        }
    }

    pub fn max_size(max_size: usize) -> Self {
        Self {
            ttl: None,
            max_size: Some(max_size),
        }
    }

    /// Returns true when the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.ttl.is_none() && self.max_size.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_default() {
        let policy = CachePolicy::default();
        assert_eq!(policy.ttl_seconds, 300);
        assert_eq!(policy.max_size, 100);
        assert_eq!(policy.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_apply_partial_update() {
        let mut policy = CachePolicy::new(60, 10);

        policy.apply(PolicyUpdate::ttl(5));
        assert_eq!(policy, CachePolicy::new(5, 10));

        policy.apply(PolicyUpdate::max_size(3));
        assert_eq!(policy, CachePolicy::new(5, 3));
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let mut policy = CachePolicy::new(60, 10);
        let update = PolicyUpdate::default();

        assert!(update.is_empty());
        policy.apply(update);
        assert_eq!(policy, CachePolicy::new(60, 10));
    }
}
