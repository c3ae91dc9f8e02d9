//! Expiry Sweep Task
//!
//! Periodically evicts expired entries so keys that are never requested
//! again do not hold memory until shutdown. Lookups already ignore expired
//! entries on their own; the sweep only bounds memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a background task that evicts expired entries every `check_period_secs`.
///
/// The returned handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(ResponseCache::new(100)));
/// let sweep_handle = spawn_sweep_task(cache.clone(), 120);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(
    cache: Arc<RwLock<ResponseCache>>,
    check_period_secs: u64,
) -> JoinHandle<()> {
    let period = Duration::from_secs(check_period_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep with a period of {} seconds",
            period.as_secs()
        );

        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
