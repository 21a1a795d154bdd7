//! Cache Entry Module
//!
//! Defines a single cached value and the instant it was written.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry: raw bytes plus their write time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Moment the entry was inserted or last overwritten
    pub created_at: Instant,
    /// The stored bytes
    pub value: Vec<u8>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            created_at: Instant::now(),
            value,
        }
    }

    // == Age ==
    /// Returns how long ago the entry was written, as seen from `now`.
    ///
    /// Saturates to zero if `now` is earlier than the write.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `ttl` at `now`.
    ///
    /// Boundary condition: an entry whose age is exactly `ttl` is NOT expired;
    /// it must be strictly older, i.e. `created_at < now - ttl`.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        self.age_at(now) > ttl
    }
}
