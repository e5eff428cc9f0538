//! Singleflight Module
//!
//! Per-key coordination of cache-miss production.
//!
//! # Episode lifecycle (per key)
//! `Idle -> Computing -> {Succeeded, Failed} -> Idle`
//!
//! No failed state is remembered: the next miss after a failure starts a
//! fresh episode.

mod coordinator;

pub use coordinator::Singleflight;
