//! TransactionBuilder port - unsigned transaction assembly.
//!
//! This service never holds keys and never signs. Mutating operations are
//! prepared here as unsigned transactions (nonce and gas assigned) and handed
//! back to the wallet-holding client, which signs and broadcasts on its own.

use async_trait::async_trait;
use serde::Serialize;

use super::ledger::LedgerError;

/// A prepared, unsigned contract transaction.
///
/// Serialized camelCase so wallet tooling can consume it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    pub from: String,
    pub to: String,
    pub nonce: u64,
    pub gas: u64,
    /// Gas price in wei.
    pub gas_price: u128,
    pub value: u128,
    /// ABI-encoded call data, 0x-prefixed hex.
    pub data: String,
}

/// Port for preparing the contract's mutating calls.
///
/// Every method reads the sender's current transaction count for the nonce,
/// applies the configured gas parameters, and returns the assembled
/// transaction without signing or broadcasting it.
#[async_trait]
pub trait TransactionBuilder: Send + Sync {
    async fn create_election(
        &self,
        sender: &str,
        name: &str,
        description: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<UnsignedTransaction, LedgerError>;

    async fn add_candidate(
        &self,
        sender: &str,
        election_id: u64,
        name: &str,
        party: &str,
        image_url: &str,
    ) -> Result<UnsignedTransaction, LedgerError>;

    async fn register_voters(
        &self,
        sender: &str,
        election_id: u64,
        voters: &[String],
    ) -> Result<UnsignedTransaction, LedgerError>;

    async fn cast_vote(
        &self,
        sender: &str,
        election_id: u64,
        candidate_id: u64,
    ) -> Result<UnsignedTransaction, LedgerError>;

    async fn add_admin(
        &self,
        sender: &str,
        admin: &str,
    ) -> Result<UnsignedTransaction, LedgerError>;
}
