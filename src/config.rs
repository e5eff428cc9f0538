//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{CachePolicy, DEFAULT_MAX_SIZE, DEFAULT_TTL_SECONDS};
use crate::upstream::SlowUpstream;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds applied to every cached entry
    pub ttl: u64,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Simulated upstream latency in milliseconds
    pub upstream_delay_ms: u64,
    /// Number of initial upstream fetches that fail
    pub upstream_fail_first: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - TTL in seconds (default: 300)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `UPSTREAM_DELAY_MS` - Upstream latency (default: 2000)
    /// - `UPSTREAM_FAIL_FIRST` - Initial upstream fetches that fail (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl: env_or("CACHE_TTL", defaults.ttl),
            max_size: env_or("CACHE_MAX_SIZE", defaults.max_size),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            upstream_delay_ms: env_or("UPSTREAM_DELAY_MS", defaults.upstream_delay_ms),
            upstream_fail_first: env_or("UPSTREAM_FAIL_FIRST", defaults.upstream_fail_first),
        }
    }

    /// Initial cache policy.
    pub fn policy(&self) -> CachePolicy {
        CachePolicy::new(self.ttl, self.max_size)
    }

    /// Upstream built from the configured delay and failures.
    pub fn upstream(&self) -> SlowUpstream {
        SlowUpstream::new(Duration::from_millis(self.upstream_delay_ms))
            .failing_first(self.upstream_fail_first)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL_SECONDS,
            max_size: DEFAULT_MAX_SIZE,
            server_port: 8000,
            upstream_delay_ms: 2000,
            upstream_fail_first: 0,
        }
    }
}

/// Reads and parses an environment variable, falling back on absence or parse failure.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
