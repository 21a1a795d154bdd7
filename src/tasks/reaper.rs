//! TTL Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::{lock_store, CacheStore};

/// Spawns the task that sweeps `store` every `period`.
///
/// The first sweep runs one full period after spawning. Each sweep holds the
/// store lock for the whole scan, so it never interleaves with a lookup.
///
/// `period` must be non-zero and small enough that `now + period` fits in an
/// `Instant`; [`Cache`](crate::cache::Cache) validates both before calling.
///
/// # Returns
/// A JoinHandle for the spawned task; aborting it stops the sweeps.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
/// let reaper = spawn_reaper_task(&Handle::current(), store.clone(), ttl);
/// // Later:
/// reaper.abort();
/// ```
pub(crate) fn spawn_reaper_task(
    runtime: &Handle,
    store: Arc<Mutex<CacheStore>>,
    period: Duration,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        info!("Starting cache reaper with period of {:?}", period);

        let Some(start) = tokio::time::Instant::now().checked_add(period) else {
            warn!("Cache reaper period {:?} is out of range, not sweeping", period);
            return;
        };
        let mut ticker = tokio::time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let removed = lock_store(&store).reap_expired(Instant::now());

            if removed > 0 {
                info!("Cache reaper: removed {} expired entries", removed);
            } else {
                debug!("Cache reaper: no expired entries found");
            }
        }
    })
}
