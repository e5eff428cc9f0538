//! Upstream Module
//!
//! The slow data source sitting behind the cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::bail;
use serde_json::{json, Value};
use tracing::{info, warn};

// == Slow Upstream ==
/// Simulated expensive upstream API.
///
/// Every fetch sleeps for `delay` before answering. The first
/// `failing_first` fetches fail after the delay, the rest return the payload.
#[derive(Debug)]
pub struct SlowUpstream {
    delay: Duration,
    payload: Value,
    /// Fetches started so far
    fetches: AtomicU64,
    /// Fetches still due to fail
    failures_left: AtomicU64,
}

impl SlowUpstream {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            payload: json!({ "data": "Slow API response" }),
            fetches: AtomicU64::new(0),
            failures_left: AtomicU64::new(0),
        }
    }

    /// Makes the next `count` fetches fail.
    pub fn failing_first(self, count: u64) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    /// Number of fetches started since creation.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    // == Fetch ==
    /// Fetches the content for `key`.
    pub async fn fetch(&self, key: &str) -> anyhow::Result<Value> {
        let call = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        info!(key, call, delay_ms = self.delay.as_millis() as u64, "Fetching from upstream");
        tokio::time::sleep(self.delay).await;

        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            warn!(key, call, "Upstream fetch failed");
            bail!("upstream unavailable");
        }

        Ok(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_delay() {
        let upstream = SlowUpstream::new(Duration::from_secs(2));
        let started = tokio::time::Instant::now();

        let value = upstream.fetch("content").await.unwrap();

        assert_eq!(value, json!({ "data": "Slow API response" }));
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_failing_first_then_recovers() {
        let upstream = SlowUpstream::new(Duration::ZERO).failing_first(2);

        assert!(upstream.fetch("k").await.is_err());
        let err = upstream.fetch("k").await.unwrap_err();
        assert_eq!(err.to_string(), "upstream unavailable");
        assert!(upstream.fetch("k").await.is_ok());
        assert_eq!(upstream.fetch_count(), 3);
    }
}
