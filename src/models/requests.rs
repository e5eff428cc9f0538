//! Request DTOs for the cache API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

use crate::cache::PolicyUpdate;

/// Query parameters for POST /invalidate
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateParams {
    /// The cache key to drop
    pub key: String,
}

/// Request body for POST /settings
///
/// Both fields are optional; absent fields keep the current setting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsRequest {
    /// New TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
    /// New capacity in entries
    #[serde(default)]
    pub max_size: Option<usize>,
}

impl SettingsRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.max_size == Some(0) {
            return Some("max_size must be at least 1".to_string());
        }
        None
    }
}

impl From<SettingsRequest> for PolicyUpdate {
    fn from(req: SettingsRequest) -> Self {
        PolicyUpdate {
            ttl: req.ttl,
            max_size: req.max_size,
        }
    }
}
