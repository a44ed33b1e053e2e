//! Domain types - the election records this service reads and redistributes.
//!
//! The ledger owns all authoritative state; these types are immutable views
//! of it, rebuilt fresh on every read. Nothing in this module mutates
//! anything.

mod election;
mod snapshot;

pub use election::{Candidate, Election, NodeStatus, VoterStanding};
pub use snapshot::ElectionSnapshot;
