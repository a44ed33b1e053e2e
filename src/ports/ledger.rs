//! LedgerQuery port - read-only interface to the voting contract.
//!
//! All election state lives on the ledger; this port is how the rest of the
//! service reads it. Implementations must never mutate contract state.
//!
//! ## Empty candidate lists
//!
//! The deployed contract signals "this election has no candidates yet" by
//! reverting the results read with a numeric-underflow fault - the same
//! generic channel it uses for real faults. Implementations are required to
//! classify that condition at this boundary and return
//! [`LedgerError::EmptyCollection`], so that callers pattern-match a tag
//! instead of sniffing substrings of a failure message.

use async_trait::async_trait;

use crate::domain::{Candidate, Election, NodeStatus};

/// Errors surfaced by ledger reads.
///
/// `EmptyCollection` is benign (an existing election with zero candidates);
/// everything else is a genuine fault. Nothing here is fatal to the service -
/// polling callers log and retry on their own cadence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// No ledger collaborator is configured.
    #[error("ledger client is not loaded")]
    NotLoaded,

    /// A contract-side read of an empty list.
    #[error("empty collection read from contract")]
    EmptyCollection,

    /// The contract rejected the call.
    #[error("contract call reverted: {0}")]
    Reverted(String),

    /// The node could not be reached or returned garbage.
    #[error("ledger transport error: {0}")]
    Transport(String),
}

/// Port for querying election state from the ledger.
///
/// Election ids are 1-based and dense: valid ids are exactly
/// `1..=election_count()`.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Number of elections ever created on the contract.
    async fn election_count(&self) -> Result<u64, LedgerError>;

    /// Read one election record. The `status` field is not populated by this
    /// call; use [`LedgerQuery::election_status`].
    async fn election(&self, id: u64) -> Result<Election, LedgerError>;

    /// Human-readable status label ("Pending", "Active", "Ended", ...).
    async fn election_status(&self, id: u64) -> Result<String, LedgerError>;

    /// Ids of elections currently accepting votes.
    async fn active_elections(&self) -> Result<Vec<u64>, LedgerError>;

    /// All candidates of an election, in contract storage order.
    async fn candidates(&self, election_id: u64) -> Result<Vec<Candidate>, LedgerError>;

    /// Current results of an election, in the order the contract returns
    /// them (not sorted by votes).
    ///
    /// Fails with [`LedgerError::EmptyCollection`] when the election exists
    /// but has no candidates yet.
    async fn election_results(&self, election_id: u64) -> Result<Vec<Candidate>, LedgerError>;

    /// Whether an address holds the admin role.
    async fn is_admin(&self, address: &str) -> Result<bool, LedgerError>;

    /// Whether an address is registered to vote in an election.
    async fn is_voter_eligible(
        &self,
        election_id: u64,
        address: &str,
    ) -> Result<bool, LedgerError>;

    /// Whether an address has already voted in an election.
    async fn has_voter_voted(&self, election_id: u64, address: &str)
        -> Result<bool, LedgerError>;

    /// Connectivity information about the underlying node.
    async fn node_status(&self) -> NodeStatus;
}
