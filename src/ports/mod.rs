//! Ports - interfaces for the external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between this
//! service and the outside world. The ledger (smart-contract platform) is the
//! only authoritative store; every port here is a view onto it or a
//! transaction-preparation surface for it. Adapters implement these ports.
//!
//! - `LedgerQuery` - read-only election/candidate/role queries
//! - `TransactionBuilder` - unsigned transaction assembly for client signing
//! - `SignatureVerifier` - wallet-signature login verification

mod auth;
mod ledger;
mod tx_builder;

pub use auth::SignatureVerifier;
pub use ledger::{LedgerError, LedgerQuery};
pub use tx_builder::{TransactionBuilder, UnsignedTransaction};
