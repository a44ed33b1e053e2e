//! In-process collaborators for development and tests.
//!
//! The real voting contract lives on a ledger node reached over RPC; that
//! transport adapter is a deployment concern. These adapters implement the
//! same ports with contract-equivalent observable behavior, including the
//! empty-collection fault on a results read, so the rest of the service runs
//! unchanged against them.

mod auth;
mod ledger;

pub use auth::DevSignatureVerifier;
pub use ledger::InMemoryLedger;
