use crate::domain::model::{Snapshot, SnapshotPatch};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Outcome of reading the backing store. A store that does not exist yet is
/// not an error, but it is reported distinctly so callers never mistake
/// "no data yet" for "storage broken" (broken storage returns `Err`).
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Data(Snapshot),
    Missing,
}

impl LoadOutcome {
    pub fn into_snapshot(self) -> Snapshot {
        match self {
            LoadOutcome::Data(snapshot) => snapshot,
            LoadOutcome::Missing => Snapshot::default(),
        }
    }
}

/// Persistence gateway for the full dataset. Implementations own the
/// merge-on-write semantics of [`SnapshotPatch`]: collections absent from a
/// patch must retain their previously persisted values.
#[async_trait]
pub trait SnapshotGateway: Send + Sync {
    async fn load(&self) -> Result<LoadOutcome>;
    async fn save(&self, patch: &SnapshotPatch) -> Result<()>;
}
