//! SnapshotFetcher - one-shot election reads classified for the feed.
//!
//! Both polling paths (the per-subscriber session and the global broadcast
//! cycle) go through `fetch` and branch on the returned [`SnapshotOutcome`].
//! The classification is the load-bearing decision of the whole subsystem:
//! the ledger reports "no candidates yet" through its failure channel, so the
//! fetcher has to separate that benign condition from real faults. The port
//! contract does the separation with a dedicated
//! [`LedgerError::EmptyCollection`] tag; nothing here inspects error text.
//!
//! The fetcher never retries. Callers own the retry cadence through their
//! polling periods.

use std::sync::Arc;

use crate::domain::ElectionSnapshot;
use crate::ports::{LedgerError, LedgerQuery};

/// Classified result of one election read.
#[derive(Debug, Clone)]
pub enum SnapshotOutcome {
    /// Election exists and has candidates.
    Ready(ElectionSnapshot),

    /// Election id is outside `[1, election_count]`. Terminal for a
    /// subscription bound to this id.
    NotFound(u64),

    /// Election exists but has no candidates yet. The snapshot carries the
    /// populated election record and an empty candidate sequence. Benign and
    /// non-terminal - the feed keeps delivering.
    Empty(ElectionSnapshot),

    /// Any other read failure. Non-terminal; logged by callers and retried
    /// on their next poll.
    Transient { election_id: u64, cause: LedgerError },
}

/// Read-only fetcher over the optional ledger collaborator.
///
/// When no collaborator is configured (degraded startup), every fetch yields
/// a `Transient` outcome with a `NotLoaded` cause so pollers idle instead of
/// failing.
#[derive(Clone)]
pub struct SnapshotFetcher {
    ledger: Option<Arc<dyn LedgerQuery>>,
}

impl SnapshotFetcher {
    pub fn new(ledger: Option<Arc<dyn LedgerQuery>>) -> Self {
        Self { ledger }
    }

    /// Whether a ledger collaborator is configured at all.
    pub fn is_loaded(&self) -> bool {
        self.ledger.is_some()
    }

    /// Fetch and classify the current state of one election.
    pub async fn fetch(&self, election_id: u64) -> SnapshotOutcome {
        let Some(ledger) = &self.ledger else {
            return SnapshotOutcome::Transient {
                election_id,
                cause: LedgerError::NotLoaded,
            };
        };

        let count = match ledger.election_count().await {
            Ok(count) => count,
            Err(cause) => {
                return SnapshotOutcome::Transient {
                    election_id,
                    cause,
                }
            }
        };

        if election_id == 0 || election_id > count {
            return SnapshotOutcome::NotFound(election_id);
        }

        let mut election = match ledger.election(election_id).await {
            Ok(election) => election,
            Err(cause) => {
                return SnapshotOutcome::Transient {
                    election_id,
                    cause,
                }
            }
        };

        // Status label is a separate contract read; losing it is not worth
        // failing the snapshot over.
        if election.status.is_none() {
            election.status = ledger.election_status(election_id).await.ok();
        }

        match ledger.election_results(election_id).await {
            Ok(candidates) => SnapshotOutcome::Ready(ElectionSnapshot::new(election, candidates)),
            Err(LedgerError::EmptyCollection) => {
                SnapshotOutcome::Empty(ElectionSnapshot::without_candidates(election))
            }
            Err(cause) => SnapshotOutcome::Transient {
                election_id,
                cause,
            },
        }
    }
}
