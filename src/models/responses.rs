//! Response DTOs for the cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::StatsSnapshot;

/// Response body for POST /invalidate
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
}

impl InvalidateResponse {
    pub fn new(key: &str) -> Self {
        Self {
            message: format!("Cache for key '{}' invalidated.", key),
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub current_size: usize,
    /// Capacity bound
    pub max_size: usize,
    /// TTL in seconds
    pub ttl: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Upstream fetches started since startup
    pub upstream_fetches: u64,
}

impl StatsResponse {
    /// Combines a cache snapshot with the upstream fetch count
    pub fn new(stats: StatsSnapshot, upstream_fetches: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            current_size: stats.current_size,
            max_size: stats.max_size,
            ttl: stats.ttl,
            hit_rate: stats.hit_rate(),
            upstream_fetches,
        }
    }
}

/// Response body for POST /settings
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub message: String,
    /// Statistics taken right after the update
    pub settings: StatsResponse,
}

impl SettingsResponse {
    pub fn new(settings: StatsResponse) -> Self {
        Self {
            message: "Cache settings updated.".to_string(),
            settings,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
