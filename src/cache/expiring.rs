//! Expiring Cache Module
//!
//! The public cache handle: a shared [`CacheStore`] behind one exclusive lock,
//! plus the reaper task that sweeps it once per TTL.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::cache::{lock_store, CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper_task;

// == Cache ==
/// Thread-safe byte cache with time-based expiry.
///
/// `add`, `get` and every sweep run under the same lock, so they are fully
/// serialized. Share it across threads by reference or through an `Arc`.
///
/// Dropping the cache aborts its reaper task.
#[derive(Debug)]
pub struct Cache {
    /// Entry map shared with the reaper task
    store: Arc<Mutex<CacheStore>>,
    /// Entry lifetime, also the sweep period
    ttl: Duration,
    /// Reaper task, None once stopped
    reaper: Option<JoinHandle<()>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current tokio runtime.
    ///
    /// # Errors
    /// - [`CacheError::InvalidTtl`] if `ttl` is zero or too large to schedule
    /// - [`CacheError::NoRuntime`] if called outside a tokio runtime
    pub fn new(ttl: Duration) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
        Self::with_handle(ttl, &runtime)
    }

    /// Creates an empty cache whose reaper runs on the given runtime.
    ///
    /// Usable from threads that are not themselves inside a runtime.
    pub fn with_handle(ttl: Duration, runtime: &Handle) -> Result<Self> {
        // The reaper's first deadline is now + ttl, which must be representable
        if ttl.is_zero() || tokio::time::Instant::now().checked_add(ttl).is_none() {
            return Err(CacheError::InvalidTtl);
        }

        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let reaper = spawn_reaper_task(runtime, store.clone(), ttl);

        Ok(Self {
            store,
            ttl,
            reaper: Some(reaper),
        })
    }

    /// Creates a cache using the TTL from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.ttl())
    }

    // == Add ==
    /// Stores `value` under `key`, resetting the entry's age.
    ///
    /// An empty key or empty value is silently ignored.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let stored = lock_store(&self.store).add(key.into(), value.into());

        if !stored {
            trace!("Ignoring add with empty key or value");
        }
    }

    // == Get ==
    /// Returns a copy of the bytes stored under `key`.
    ///
    /// Entries are only removed by sweeps, so an entry past its TTL is still
    /// returned until the next sweep runs.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        lock_store(&self.store).get(key)
    }

    // == Reap Now ==
    /// Runs one sweep immediately, returning the number of entries removed.
    pub fn reap_now(&self) -> usize {
        lock_store(&self.store).reap_expired(Instant::now())
    }

    // == TTL ==
    /// Returns the entry lifetime, which is also the sweep period.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the current number of entries, expired-but-unswept ones included.
    pub fn len(&self) -> usize {
        lock_store(&self.store).len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        lock_store(&self.store).is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        lock_store(&self.store).stats()
    }

    // == Reaper Lifecycle ==
    /// Returns true while the reaper task is alive.
    pub fn is_reaper_running(&self) -> bool {
        self.reaper
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Stops periodic sweeps. Stored entries stay readable; nothing expires
    /// afterwards unless [`Cache::reap_now`] is called.
    ///
    /// Returns whether a reaper was running.
    pub fn stop_reaper(&mut self) -> bool {
        match self.reaper.take() {
            Some(handle) => {
                handle.abort();
                debug!("Cache reaper stopped");
                true
            }
            None => false,
        }
    }

    /// Stops the reaper and waits until its task has finished.
    pub async fn shutdown(mut self) {
        let Some(handle) = self.reaper.take() else {
            return;
        };

        handle.abort();
        match handle.await {
            Ok(()) => {}
            Err(err) if err.is_cancelled() => debug!("Cache reaper shut down"),
            Err(err) => warn!("Cache reaper ended abnormally: {}", err),
        }
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        if let Some(handle) = self.reaper.take() {
            handle.abort();
        }
    }
}
