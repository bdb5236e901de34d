//! TTL Cleanup Task
//!
//! Background sweep that periodically removes expired cache entries.
//! Lazy expiry alone keeps reads correct; the sweep exists so memory held
//! by cold expired entries is reclaimed without waiting for a lookup.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::SharedCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task loops forever, sleeping for `interval` between runs. Each run
/// takes the same write lock as get/set and removes only entries whose
/// deadline has passed; non-expired entries are never touched. One task
/// per cache, so a sweep never runs concurrently with itself.
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during graceful
/// shutdown.
pub fn spawn_cleanup_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{BoundedCache, ManualClock};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn shared_cache(clock: &ManualClock) -> SharedCache {
        let cache = BoundedCache::with_clock(100, None, Arc::new(clock.clone())).unwrap();
        Arc::new(RwLock::new(cache))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let clock = ManualClock::new();
        let cache = shared_cache(&clock);

        {
            let mut guard = cache.write().await;
            guard
                .set(
                    "expire_soon".to_string(),
                    "value".to_string(),
                    Some(Duration::from_secs(1)),
                )
                .unwrap();
        }

        let handle = spawn_cleanup_task(Arc::clone(&cache), Duration::from_millis(10));

        // Push the entry past its deadline, then give the sweep a tick
        clock.advance(Duration::from_secs(2));
        tokio::time::sleep(Duration::from_millis(100)).await;

        {
            let guard = cache.read().await;
            assert!(
                guard.is_empty(),
                "Expired entry should have been swept without a lookup"
            );
            assert_eq!(guard.stats().expirations, 1);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let clock = ManualClock::new();
        let cache = shared_cache(&clock);

        {
            let mut guard = cache.write().await;
            guard
                .set(
                    "long_lived".to_string(),
                    "value".to_string(),
                    Some(Duration::from_secs(3600)),
                )
                .unwrap();
        }

        let handle = spawn_cleanup_task(Arc::clone(&cache), Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(100)).await;

        {
            let mut guard = cache.write().await;
            let result = guard.get(&"long_lived".to_string());
            assert_eq!(result, Some("value".to_string()), "Valid entry should not be removed");
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let clock = ManualClock::new();
        let cache = shared_cache(&clock);

        let handle = spawn_cleanup_task(cache, Duration::from_millis(10));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
