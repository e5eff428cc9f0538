//! Smart Cache - an in-process content cache
//!
//! Memoizes a slow upstream with TTL expiry and LRU eviction, and collapses
//! concurrent misses for the same key into a single upstream call.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod singleflight;
pub mod upstream;

pub use api::AppState;
pub use cache::{CachePolicy, CacheStore, PolicyUpdate, SharedCache, StatsSnapshot};
pub use config::Config;
pub use error::{CacheError, ProducerError};
pub use singleflight::Singleflight;
