//! API Module
//!
//! HTTP handlers and routing for the cache REST API.
//!
//! # Endpoints
//! - `GET /content`, `GET /content/:key` - Cached upstream content
//! - `POST /invalidate?key=` - Drop a key
//! - `GET /stats` - Cache statistics
//! - `POST /settings` - Change TTL and/or max size
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
