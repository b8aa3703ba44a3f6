pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{Cli, Command};
pub use crate::config::Settings;

pub use crate::adapters::storage::{JsonFileGateway, MemoryGateway};
pub use crate::core::store::{Ledger, LedgerService};
pub use crate::domain::model::{Product, Seller, Snapshot, SnapshotPatch, Transaction, TxKind};
pub use crate::domain::ports::{LoadOutcome, SnapshotGateway};
pub use crate::utils::error::{LedgerError, Result};
