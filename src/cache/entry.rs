//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.
//! All time-dependent methods take the current instant as an argument so
//! expiry stays a pure function of the injected clock.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single stored value plus the metadata needed for TTL and recency.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload; opaque to the cache
    pub value: V,
    /// Instant the value was (last) written
    pub inserted_at: Instant,
    /// Instant the entry was last returned by a read
    pub last_accessed_at: Instant,
    /// Expiry deadline, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry written at `now` with an optional TTL.
    pub fn new(value: V, now: Instant, ttl: Option<Duration>) -> Self {
        Self {
            value,
            inserted_at: now,
            last_accessed_at: now,
            expires_at: ttl.map(|ttl| now + ttl),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// Boundary condition: the entry counts as expired once `now` reaches
    /// the deadline, so a read exactly at the deadline already misses.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Remaining TTL as of `now`, or None if the entry never expires.
    ///
    /// Returns `Some(Duration::ZERO)` once the deadline has passed.
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
