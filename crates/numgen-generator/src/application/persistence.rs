//! Ordered, best-effort persistence of history snapshots.
//!
//! Handlers snapshot the state under its lock and save after releasing it,
//! so saves from overlapping commands can arrive out of order. A snapshot
//! older than the last one written is skipped.

use std::sync::Arc;

use numgen_core::store::HistoryStore;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::state::HistorySnapshot;

/// Writes history snapshots to a store in revision order.
pub struct HistoryPersister {
    store: Arc<dyn HistoryStore>,
    last_written: Mutex<Option<u64>>,
}

impl HistoryPersister {
    /// Wraps `store`.
    #[must_use]
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            last_written: Mutex::new(None),
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn HistoryStore {
        self.store.as_ref()
    }

    /// Saves `snapshot` unless a newer one was already written. Failures are
    /// logged and leave the last written revision unchanged.
    pub async fn persist(&self, snapshot: HistorySnapshot) {
        let mut last_written = self.last_written.lock().await;
        if last_written.is_some_and(|last| last >= snapshot.revision) {
            debug!(revision = snapshot.revision, "skipping stale history snapshot");
            return;
        }

        match self.store.save(&snapshot.entries).await {
            Ok(()) => {
                *last_written = Some(snapshot.revision);
                debug!(
                    revision = snapshot.revision,
                    entries = snapshot.entries.len(),
                    "history persisted"
                );
            }
            Err(e) => warn!(error = %e, "failed to persist history; continuing"),
        }
    }
}

impl std::fmt::Debug for HistoryPersister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryPersister").finish_non_exhaustive()
    }
}
