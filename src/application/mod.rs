//! Application layer - the read pipeline between the ledger port and the
//! delivery adapters.

mod snapshot;

pub use snapshot::{SnapshotFetcher, SnapshotOutcome};
