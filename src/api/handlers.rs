//! API Handlers
//!
//! HTTP request handlers binding the cache operations to endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::{CachePolicy, SharedCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    HealthResponse, InvalidateParams, InvalidateResponse, SettingsRequest, SettingsResponse,
    StatsResponse,
};
use crate::singleflight::Singleflight;
use crate::upstream::SlowUpstream;

/// Key served by GET /content
pub const DEFAULT_CONTENT_KEY: &str = "content";

/// Application state shared across all handlers.
///
/// Built once by the composition root and cloned into every handler; all
/// clones point at the same cache and coordinator.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache<String, Value>,
    /// Stampede protection for cache misses
    pub flight: Singleflight<String, Value>,
    /// Slow data source behind the cache
    pub upstream: Arc<SlowUpstream>,
}

impl AppState {
    /// Creates a new AppState with a fresh cache under `policy`.
    pub fn new(policy: CachePolicy, upstream: SlowUpstream) -> Self {
        let cache = SharedCache::with_policy(policy);
        Self {
            flight: Singleflight::new(cache.clone()),
            cache,
            upstream: Arc::new(upstream),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.policy(), config.upstream())
    }
}

/// Handler for GET /content
pub async fn content_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    fetch_content(&state, DEFAULT_CONTENT_KEY.to_string()).await
}

/// Handler for GET /content/:key
pub async fn content_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>> {
    fetch_content(&state, key).await
}

async fn fetch_content(state: &AppState, key: String) -> Result<Json<Value>> {
    let upstream = Arc::clone(&state.upstream);
    let upstream_key = key.clone();

    let value = state
        .flight
        .fetch(key, move || async move { upstream.fetch(&upstream_key).await })
        .await?;

    Ok(Json(value))
}

/// Handler for POST /invalidate?key=...
///
/// Succeeds whether or not the key was cached.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Query(params): Query<InvalidateParams>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.invalidate(&params.key).await;
    info!(key = %params.key, removed, "Cache key invalidated");

    Json(InvalidateResponse::new(&params.key))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.statistics().await;
    Json(StatsResponse::new(stats, state.upstream.fetch_count()))
}

/// Handler for POST /settings
///
/// Applies the provided fields only; new bounds are enforced lazily.
pub async fn settings_handler(
    State(state): State<AppState>,
    Json(req): Json<SettingsRequest>,
) -> Result<Json<SettingsResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.update_settings(req.into()).await;
    let stats = state.cache.statistics().await;
    info!(ttl = stats.ttl, max_size = stats.max_size, "Cache settings updated");

    Ok(Json(SettingsResponse::new(StatsResponse::new(
        stats,
        state.upstream.fetch_count(),
    ))))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
