//! Live result distribution over WebSocket.
//!
//! Turns the pull-based ledger query port into a push-based multi-subscriber
//! feed:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    LedgerQuery port                     │
//! └────────────────────────────────────────────────────────┘
//!                │                          │
//!                │ polls (2.5s, per client) │ polls (3s, global)
//!                ▼                          ▼
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │   SubscriptionSession    │  │    ResultsBroadcaster    │
//! │  one per connection,     │  │  one background cycle,   │
//! │  bound to one election   │  │  up to 10 elections      │
//! └──────────────────────────┘  └──────────────────────────┘
//!                │ send(handle, frame)      │ broadcast(frame)
//!                ▼                          ▼
//! ┌────────────────────────────────────────────────────────┐
//! │  ConnectionRegistry - live handles, pruned on failure  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! No path here ever surfaces a hard failure: every outcome becomes a
//! delivered frame or a logged skip, and both loops survive ledger outages
//! indefinitely.
//!
//! # Components
//!
//! - [`messages`] - wire frames sent to subscribers
//! - [`registry`] - connection handle tracking and fan-out
//! - [`session`] - per-subscriber polling loop
//! - [`broadcaster`] - global unaddressed fan-out cycle
//! - [`hub`] - composition root owning the broadcaster lifecycle
//! - [`handler`] - axum WebSocket upgrade endpoint

pub mod broadcaster;
pub mod handler;
pub mod hub;
pub mod messages;
pub mod registry;
pub mod session;

pub use broadcaster::{CycleReport, ResultsBroadcaster};
pub use handler::{results_feed_router, FeedState};
pub use hub::ResultHub;
pub use messages::{BroadcastFrame, ErrorFrame, FeedFrame, ResultsFrame};
pub use registry::{ConnectionRegistry, HandleId};
pub use session::SubscriptionSession;
