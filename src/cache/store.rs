//! Bounded Cache Module
//!
//! Main cache engine combining HashMap storage with an O(1) recency list
//! and lazy TTL expiration. Keys and values are opaque; readers receive
//! clones, never handles into cache-internal state.
//!
//! The cache holds no locks of its own. Single-threaded callers use it
//! directly; shared callers wrap it in `Arc<RwLock<_>>` (see the api
//! module) and each operation then holds exclusive access only for its
//! own bookkeeping.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, LruList, SystemClock};
use crate::error::{CacheError, Result};

// == Bounded Cache ==
/// In-process key/value store with a fixed capacity, LRU eviction, and
/// optional per-entry TTL.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Recency order, most to least recently used
    lru: LruList<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of live entries, immutable after construction
    capacity: usize,
    /// TTL applied when `set` receives none; None = never expires
    default_ttl: Option<Duration>,
    /// Time source for all expiry decisions
    clock: Arc<dyn Clock>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructors ==
    /// Creates a cache with the given capacity and default TTL, reading
    /// time from the system clock.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `capacity` is zero or `default_ttl` is a
    /// zero duration.
    pub fn new(capacity: usize, default_ttl: Option<Duration>) -> Result<Self> {
        Self::with_clock(capacity, default_ttl, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit time source.
    ///
    /// Tests inject a [`crate::cache::ManualClock`] here to drive expiry
    /// deterministically.
    pub fn with_clock(
        capacity: usize,
        default_ttl: Option<Duration>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be positive".to_string(),
            ));
        }
        if default_ttl == Some(Duration::ZERO) {
            return Err(CacheError::InvalidConfiguration(
                "default TTL must be a positive duration".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruList::new(),
            stats: CacheStats::new(),
            capacity,
            default_ttl,
            clock,
        })
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// A missing key is a miss. An entry past its deadline is removed and
    /// counted as a miss (lazy expiry); a read never returns an expired
    /// value. A live hit refreshes recency and the access timestamp.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            // Lazy expiry: this lookup collects the dead entry
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            trace!("expired entry removed on read");
            return None;
        }

        self.lru.touch(key);
        self.stats.record_hit();
        self.entries.get_mut(key).map(|entry| {
            entry.last_accessed_at = now;
            entry.value.clone()
        })
    }

    // == Set ==
    /// Stores a key-value pair with an optional TTL.
    ///
    /// An existing key is overwritten in place: value replaced, deadline
    /// recomputed from `ttl` (or the default), recency refreshed, nothing
    /// evicted. A new key inserted at capacity first evicts the least
    /// recently used entry, whatever that victim's own TTL state.
    ///
    /// # Errors
    /// `InvalidArgument` if `ttl` is a zero duration.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        if ttl == Some(Duration::ZERO) {
            return Err(CacheError::InvalidArgument(
                "TTL must be a positive duration".to_string(),
            ));
        }

        let now = self.clock.now();
        let effective_ttl = ttl.or(self.default_ttl);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(victim) = self.lru.pop_lru() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!("evicted least recently used entry at capacity");
            }
        }

        self.lru.touch(&key);
        self.entries
            .insert(key, CacheEntry::new(value, now, effective_ttl));
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Remove ==
    /// Removes the entry if present; returns whether it existed.
    pub fn remove(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
            true
        } else {
            false
        }
    }

    // == Contains Key ==
    /// Reports whether a live (non-expired) entry exists under `key`.
    ///
    /// Pure observer: no recency update, and an expired corpse is left for
    /// the next `get` or sweep to collect.
    pub fn contains_key(&self, key: &K) -> bool {
        let now = self.clock.now();
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired(now))
            .unwrap_or(false)
    }

    // == Clear ==
    /// Removes all entries; capacity and default TTL are unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Cleanup Expired ==
    /// Removes every entry whose deadline has passed.
    ///
    /// Returns the number of entries removed. Non-expired entries are
    /// never touched. This is the sweep entry point used by the
    /// background cleanup task.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.lru.remove(&key);
            self.stats.record_expiration();
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    /// Maximum number of live entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Default TTL ==
    /// The TTL applied when `set` receives none.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }
}
