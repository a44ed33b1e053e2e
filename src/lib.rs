//! Votewatch - ledger-backed election API with live result distribution.
//!
//! The ledger (smart-contract platform) owns all authoritative election
//! state. This crate reads it through ports, redistributes results to
//! WebSocket subscribers in near-real-time, and prepares unsigned
//! transactions for wallet-holding clients to sign themselves.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
