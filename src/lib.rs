//! Bounded Cache - an in-process bounded key/value cache
//!
//! Provides a fixed-capacity cache with LRU eviction and lazy TTL expiry,
//! plus a thin HTTP surface demonstrating the shared usage model.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::BoundedCache;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
