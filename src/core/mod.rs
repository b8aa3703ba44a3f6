pub mod aggregate;
pub mod report;
pub mod store;

pub use crate::domain::model::{Snapshot, SnapshotPatch};
pub use crate::domain::ports::{LoadOutcome, SnapshotGateway};
pub use crate::utils::error::Result;
