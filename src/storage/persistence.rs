//! Loading and saving the session snapshot through a [`KeyValueStore`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use imposter_game::Snapshot;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Default key the snapshot is stored under.
pub const STORAGE_KEY: &str = "imposter_game_state_v1";

/// Reads and writes the [`Snapshot`] under a fixed key.
///
/// Storage failures never reach the player: a failed load yields the default
/// snapshot and a failed save is logged and dropped.
///
/// Saves are numbered when requested and applied in that order. A save that
/// reaches the store after a newer one has been written is skipped, so the
/// stored value is always the most recently requested snapshot.
#[derive(Debug, Clone)]
pub struct StatePersistence<S> {
    store: S,
    key: String,
    next_seq: Arc<AtomicU64>,
    written_seq: Arc<Mutex<u64>>,
}

impl<S> StatePersistence<S>
where
    S: KeyValueStore + Clone + 'static,
{
    /// Creates a persistence layer for `key` in `store`.
    #[instrument(skip(store))]
    pub fn new(store: S, key: impl Into<String> + std::fmt::Debug) -> Self {
        Self {
            store,
            key: key.into(),
            next_seq: Arc::new(AtomicU64::new(1)),
            written_seq: Arc::new(Mutex::new(0)),
        }
    }

    /// Loads the stored snapshot, or defaults if it is missing or unreadable.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&self) -> Snapshot {
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => {
                let snapshot = Snapshot::from_json_or_default(&raw);
                info!(players = snapshot.players().len(), "Restored saved state");
                snapshot
            }
            Ok(None) => {
                info!("No saved state, starting fresh");
                Snapshot::default()
            }
            Err(e) => {
                warn!(error = %e, "Could not read saved state, starting fresh");
                Snapshot::default()
            }
        }
    }

    /// Loads the raw stored value without decoding it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be read.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load_raw(&self) -> Result<Option<String>, StorageError> {
        self.store.get(&self.key).await
    }

    /// Writes the snapshot and waits for the result.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store rejects the write.
    #[instrument(skip(self, snapshot), fields(key = %self.key))]
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let value = snapshot.to_json();
        write_in_order(&self.store, &self.key, &self.written_seq, seq, value).await
    }

    /// Writes the snapshot in the background; errors are logged and ignored.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self, snapshot), fields(key = %self.key))]
    pub fn save_detached(&self, snapshot: Snapshot) -> JoinHandle<()> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let store = self.store.clone();
        let key = self.key.clone();
        let written_seq = Arc::clone(&self.written_seq);
        let value = snapshot.to_json();
        tokio::spawn(async move {
            match write_in_order(&store, &key, &written_seq, seq, value).await {
                Ok(()) => debug!(key = %key, seq, "State saved"),
                Err(e) => debug!(key = %key, seq, error = %e, "State save failed, ignoring"),
            }
        })
    }

    /// Deletes the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be updated.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn clear(&self) -> Result<(), StorageError> {
        info!("Clearing saved state");
        self.store.remove(&self.key).await
    }
}

/// Writes `value` unless a save numbered after `seq` already landed.
async fn write_in_order<S: KeyValueStore>(
    store: &S,
    key: &str,
    written_seq: &Mutex<u64>,
    seq: u64,
    value: String,
) -> Result<(), StorageError> {
    let mut written = written_seq.lock().await;
    if *written > seq {
        debug!(seq, newer = *written, "Skipping superseded save");
        return Ok(());
    }
    store.set(key, value).await?;
    *written = seq;
    Ok(())
}
