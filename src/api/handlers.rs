//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. The handlers are
//! the cache's "multi-threaded shared" caller: the store itself holds no
//! locks, so every operation goes through the state's RwLock and holds it
//! only for its own bookkeeping.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio::sync::RwLock;

use crate::cache::BoundedCache;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// The concrete cache instantiation served over HTTP.
pub type SharedCache = Arc<RwLock<BoundedCache<String, String>>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache handle
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState wrapping the given cache.
    pub fn new(cache: BoundedCache<String, String>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the configured capacity is zero.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let cache = BoundedCache::new(config.max_entries, config.default_ttl())?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let ttl = req.ttl.map(Duration::from_secs);

    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value, ttl)?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key. A miss (absent or expired)
/// maps to 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a read updates recency and may collect an expired entry
    let mut cache = state.cache.write().await;
    match cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Removes a key from the cache. Always succeeds; the response reports
/// whether the key existed.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.remove(&key);

    Json(DeleteResponse::new(key, removed))
}

/// Handler for POST /clear
///
/// Drops every entry; capacity and default TTL are unchanged.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let cleared = cache.len();
    cache.clear();

    Json(ClearResponse::new(cleared))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse::from_stats(&stats))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(BoundedCache::new(100, Some(Duration::from_secs(300))).unwrap())
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = SetRequest {
            key: "test_key".to_string(),
            value: "test_value".to_string(),
            ttl: None,
        };
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let result = get_handler(State(state.clone()), Path("test_key".to_string())).await;
        assert!(result.is_ok());
        let response = result.unwrap();
        assert_eq!(response.value, "test_value");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler_reports_removal() {
        let state = test_state();

        let req = SetRequest {
            key: "to_delete".to_string(),
            value: "value".to_string(),
            ttl: None,
        };
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        let response = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(response.removed);

        // Deleting again is not an error, just removed = false
        let response = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(!response.removed);

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = test_state();

        for i in 0..3 {
            let req = SetRequest {
                key: format!("key{}", i),
                value: "value".to_string(),
                ttl: None,
            };
            set_handler(State(state.clone()), Json(req)).await.unwrap();
        }

        let response = clear_handler(State(state.clone())).await;
        assert_eq!(response.cleared, 3);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state();

        let req = SetRequest {
            key: "".to_string(), // Empty key is invalid
            value: "value".to_string(),
            ttl: None,
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_set_zero_ttl_rejected() {
        let state = test_state();

        let req = SetRequest {
            key: "key".to_string(),
            value: "value".to_string(),
            ttl: Some(0),
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_from_config_rejects_zero_capacity() {
        let config = crate::config::Config {
            max_entries: 0,
            ..Default::default()
        };
        let result = AppState::from_config(&config);
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }
}
