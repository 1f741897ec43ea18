//! Snapshot persistence adapter over a key-value store.
//!
//! # Responsibility
//! - Write the encoded `TaskStore` under one key.
//! - Read it back, reporting missing, unreadable or corrupt snapshots.
//!
//! # Invariants
//! - A save writes the whole store; there are no partial updates.
//! - A missing key is not an error: it loads as `Ok(None)`.

use crate::repo::kv_repo::{KeyValueStore, KvError};
use crate::store::snapshot::SnapshotError;
use crate::store::task_store::TaskStore;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Key used when none is configured.
pub const DEFAULT_SNAPSHOT_KEY: &str = "tasklist.snapshot";

pub type PersistResult<T> = Result<T, PersistError>;

/// Recoverable persistence failure.
#[derive(Debug)]
pub enum PersistError {
    Snapshot(SnapshotError),
    Kv(KvError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::Kv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Snapshot(err) => Some(err),
            Self::Kv(err) => Some(err),
        }
    }
}

impl From<SnapshotError> for PersistError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<KvError> for PersistError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Saves and loads `TaskStore` snapshots under a fixed key.
pub struct SnapshotRepository<K: KeyValueStore> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> SnapshotRepository<K> {
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_SNAPSHOT_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Encodes and writes the full store.
    pub fn save(&self, store: &TaskStore) -> PersistResult<()> {
        let started_at = Instant::now();
        let result = store
            .serialize()
            .map_err(PersistError::from)
            .and_then(|bytes| {
                self.kv.set(&self.key, &bytes)?;
                Ok(bytes.len())
            });

        match result {
            Ok(bytes) => {
                info!(
                    "event=snapshot_save module=repo status=ok tasks={} bytes={} duration_ms={}",
                    store.len(),
                    bytes,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=snapshot_save module=repo status=error tasks={} error={}",
                    store.len(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Reads and decodes the stored snapshot.
    ///
    /// # Errors
    /// - `Kv` when the backend read fails.
    /// - `Snapshot` when the stored bytes are malformed or break invariants.
    pub fn load(&self) -> PersistResult<Option<TaskStore>> {
        let Some(bytes) = self.kv.get(&self.key)? else {
            info!("event=snapshot_load module=repo status=empty");
            return Ok(None);
        };

        let store = TaskStore::try_deserialize(&bytes)?;
        info!(
            "event=snapshot_load module=repo status=ok tasks={} next_id={:?}",
            store.len(),
            store.next_id()
        );
        Ok(Some(store))
    }
}
