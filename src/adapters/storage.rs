use crate::domain::model::{Snapshot, SnapshotPatch};
use crate::domain::ports::{LoadOutcome, SnapshotGateway};
use crate::utils::error::{LedgerError, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Flat-file gateway over a single pretty-printed JSON document, the same
/// layout the dataset has always been stored in.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotGateway for JsonFileGateway {
    async fn load(&self) -> Result<LoadOutcome> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let snapshot: Snapshot =
                    serde_json::from_slice(&bytes).map_err(|e| LedgerError::CorruptData {
                        path: self.path.display().to_string(),
                        reason: e.to_string(),
                    })?;
                Ok(LoadOutcome::Data(snapshot))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LoadOutcome::Missing),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, patch: &SnapshotPatch) -> Result<()> {
        // Read-modify-write: collections omitted from the patch keep the
        // values already on disk.
        let mut current = self.load().await?.into_snapshot();
        if let Some(products) = &patch.products {
            current.products = products.clone();
        }
        if let Some(sellers) = &patch.sellers {
            current.sellers = sellers.clone();
        }
        if let Some(transactions) = &patch.transactions {
            current.transactions = transactions.clone();
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(&current)?;
        fs::write(&self.path, bytes)?;
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

/// In-memory gateway, used by tests and ephemeral runs. Saves can be made to
/// fail on demand to exercise rollback paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    state: Arc<Mutex<Option<Snapshot>>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: Arc::new(Mutex::new(Some(snapshot))),
            fail_saves: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The currently persisted snapshot, if any save or seed has happened.
    pub async fn stored(&self) -> Option<Snapshot> {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl SnapshotGateway for MemoryGateway {
    async fn load(&self) -> Result<LoadOutcome> {
        match self.state.lock().await.clone() {
            Some(snapshot) => Ok(LoadOutcome::Data(snapshot)),
            None => Ok(LoadOutcome::Missing),
        }
    }

    async fn save(&self, patch: &SnapshotPatch) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(LedgerError::IoError(std::io::Error::other(
                "simulated save failure",
            )));
        }
        let mut state = self.state.lock().await;
        let mut current = state.clone().unwrap_or_default();
        if let Some(products) = &patch.products {
            current.products = products.clone();
        }
        if let Some(sellers) = &patch.sellers {
            current.sellers = sellers.clone();
        }
        if let Some(transactions) = &patch.transactions {
            current.transactions = transactions.clone();
        }
        *state = Some(current);
        Ok(())
    }
}
