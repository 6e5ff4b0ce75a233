//! Periodic autosave and the retrying save path.
//!
//! The autosave task is owned by the boundary layer, not the store: every
//! interval tick it checks the dirty flag, and only a dirty store is
//! serialized and upserted. A failed save leaves the flag set, so the next
//! tick retries. A save in flight is never cancelled by a later edit; the
//! resulting stale overwrite is accepted (last write wins).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use skillscope_core::document::StoreDocument;
use skillscope_core::store::EvaluationStore;

use crate::error::BackendError;
use crate::DocumentBackend;

/// Upsert with bounded retries and exponential backoff.
///
/// Transient errors back off (doubling, capped at one minute) and honor a
/// rate-limit retry-after hint; permanent errors abort immediately.
pub async fn save_with_retry(
    backend: &dyn DocumentBackend,
    document: &StoreDocument,
    max_retries: u32,
    retry_delay: Duration,
) -> anyhow::Result<()> {
    let mut delay = retry_delay;
    let mut last_error = None;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(Duration::from_secs(60));
        }
        match backend.upsert(document).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                if let Some(backend_err) = e.downcast_ref::<BackendError>() {
                    if backend_err.is_permanent() {
                        return Err(e);
                    }
                    if let Some(ms) = backend_err.retry_after_ms() {
                        delay = Duration::from_millis(ms);
                    }
                }
                tracing::warn!("save attempt {} failed: {e:#}", attempt + 1);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown save error")))
}

/// Spawn the recurring autosave task.
///
/// Runs until the returned handle is aborted or dropped by the session
/// teardown. Each tick takes the store lock only long enough to check the
/// flag and clone the document; the upsert itself runs unlocked.
pub fn spawn_autosave(
    store: Arc<Mutex<EvaluationStore>>,
    backend: Arc<dyn DocumentBackend>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it so a fresh session
        // does not save on startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let document = {
                let store = store.lock().unwrap();
                if !store.is_dirty() {
                    continue;
                }
                StoreDocument::from_store(&store)
            };

            match backend.upsert(&document).await {
                Ok(()) => {
                    store.lock().unwrap().mark_saved(Utc::now());
                    tracing::debug!(backend = backend.name(), "autosave completed");
                }
                Err(e) => {
                    // Dirty stays set; the next tick retries.
                    tracing::warn!("autosave failed: {e:#}");
                }
            }
        }
    })
}
