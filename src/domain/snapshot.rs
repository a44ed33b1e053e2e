//! Fully-materialized read of one election's current state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::election::{Candidate, Election};

/// An immutable snapshot of one election plus its candidates.
///
/// Rebuilt from scratch on every poll cycle - snapshots are never diffed or
/// cached across cycles, and carry no version; a slow subscriber simply sees
/// a later snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionSnapshot {
    pub election: Election,
    pub candidates: Vec<Candidate>,
    /// When this snapshot was materialized, serialized as ISO-8601.
    pub last_update: DateTime<Utc>,
}

impl ElectionSnapshot {
    /// Wrap an election and its candidate list, stamped with the current time.
    pub fn new(election: Election, candidates: Vec<Candidate>) -> Self {
        Self {
            election,
            candidates,
            last_update: Utc::now(),
        }
    }

    /// Snapshot of an existing election whose candidate list is still empty.
    pub fn without_candidates(election: Election) -> Self {
        Self::new(election, Vec::new())
    }
}
