//! HTTP adapters - the REST surface over the ledger ports.
//!
//! Single-shot request/response plumbing: every handler is one ledger read
//! or one prepared transaction; nothing here holds state between requests.

mod admin;
mod candidates;
mod dto;
mod elections;
mod error;
mod routes;
mod state;
mod voters;

pub use error::ApiError;
pub use routes::api_router;
pub use state::ApiState;
