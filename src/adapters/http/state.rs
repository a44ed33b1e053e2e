//! Shared application state for the REST surface.

use std::sync::Arc;

use crate::application::SnapshotFetcher;
use crate::ports::{LedgerQuery, SignatureVerifier, TransactionBuilder};

use super::error::ApiError;

/// Dependencies every REST handler draws from.
///
/// The ledger and transaction builder are optional: a degraded startup (no
/// collaborator configured) keeps read endpoints answering 503 instead of
/// failing the process.
#[derive(Clone)]
pub struct ApiState {
    pub ledger: Option<Arc<dyn LedgerQuery>>,
    pub tx_builder: Option<Arc<dyn TransactionBuilder>>,
    pub verifier: Arc<dyn SignatureVerifier>,
    pub fetcher: SnapshotFetcher,
    pub contract_address: String,
}

impl ApiState {
    pub fn new(
        ledger: Option<Arc<dyn LedgerQuery>>,
        tx_builder: Option<Arc<dyn TransactionBuilder>>,
        verifier: Arc<dyn SignatureVerifier>,
        contract_address: String,
    ) -> Self {
        let fetcher = SnapshotFetcher::new(ledger.clone());
        Self {
            ledger,
            tx_builder,
            verifier,
            fetcher,
            contract_address,
        }
    }

    /// The ledger collaborator, or 503 when none is configured.
    pub fn ledger(&self) -> Result<&Arc<dyn LedgerQuery>, ApiError> {
        self.ledger
            .as_ref()
            .ok_or_else(|| ApiError::ServiceUnavailable("Ledger client is not loaded".to_string()))
    }

    /// The transaction builder, or 503 when none is configured.
    pub fn tx_builder(&self) -> Result<&Arc<dyn TransactionBuilder>, ApiError> {
        self.tx_builder
            .as_ref()
            .ok_or_else(|| ApiError::ServiceUnavailable("Ledger client is not loaded".to_string()))
    }

    /// Reject non-admin senders with 403.
    pub async fn require_admin(&self, sender: &str, action: &str) -> Result<(), ApiError> {
        let is_admin = self.ledger()?.is_admin(sender).await?;
        if !is_admin {
            return Err(ApiError::Forbidden(format!("Only admins can {action}")));
        }
        Ok(())
    }
}
