//! Cache Store Module
//!
//! Unlocked map of entries plus counters. Callers serialize access; the
//! public [`Cache`](crate::cache::Cache) wraps this in a mutex.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key to entry storage with TTL-based reaping.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and sweep counters
    stats: CacheStats,
    /// Age beyond which a sweep removes an entry
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose sweeps remove entries older than `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Add ==
    /// Stores `value` under `key`, stamped with the current instant.
    ///
    /// An empty key or empty value is ignored. Overwriting an existing key
    /// replaces the value and resets its age.
    ///
    /// Returns whether the value was stored.
    pub fn add(&mut self, key: String, value: Vec<u8>) -> bool {
        if key.is_empty() || value.is_empty() {
            return false;
        }

        self.entries.insert(key, CacheEntry::new(value));
        true
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// Age is not checked here: an entry past its TTL is still returned
    /// until a sweep removes it.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap Expired ==
    /// Removes every entry strictly older than the TTL as seen from `now`.
    ///
    /// Returns the number of entries removed.
    pub fn reap_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired_at(now, ttl));

        let removed = before - self.entries.len();
        self.stats.record_sweep(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == TTL ==
    /// Returns the age beyond which sweeps remove an entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
