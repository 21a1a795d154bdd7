//! Cache Module
//!
//! Provides a mutex-guarded byte cache whose entries are reaped once they
//! outlive the configured TTL.

mod entry;
mod expiring;
mod stats;
mod store;


use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export public types
pub(crate) use entry::CacheEntry;
pub use expiring::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Locks the shared store, recovering the guard if a previous holder panicked.
///
/// Every store operation leaves the map consistent, so a poisoned lock carries
/// no broken state.
pub(crate) fn lock_store(store: &Mutex<CacheStore>) -> MutexGuard<'_, CacheStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
