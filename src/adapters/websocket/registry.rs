//! Connection registry - the only mutable shared state of the feed.
//!
//! Maps each live subscriber handle to the outbound channel of its socket
//! writer task. A handle present in the map is assumed writable until a send
//! fails, at which point it is removed and never retried; a dropped
//! subscriber must reconnect to resume.
//!
//! # Thread safety
//!
//! Sessions tear down and the broadcaster prunes concurrently on a
//! multi-threaded runtime, so the map is guarded by `tokio::sync::RwLock`.
//! Broadcasts copy the sender list under the read lock and prune failures
//! afterwards, never mutating the map mid-iteration.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::FeedFrame;

/// Opaque identity of one subscriber connection, generated server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandleId(Uuid);

impl HandleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HandleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HandleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracks live subscriber handles and fans frames out to them.
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<HandleId, mpsc::UnboundedSender<FeedFrame>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Admit a handle. Re-registering an existing handle replaces its
    /// channel.
    pub async fn register(&self, handle: HandleId, tx: mpsc::UnboundedSender<FeedFrame>) {
        self.connections.write().await.insert(handle, tx);
    }

    /// Remove a handle. Idempotent; returns whether it was present.
    pub async fn unregister(&self, handle: &HandleId) -> bool {
        self.connections.write().await.remove(handle).is_some()
    }

    /// Whether a handle is still registered.
    pub async fn contains(&self, handle: &HandleId) -> bool {
        self.connections.read().await.contains_key(handle)
    }

    /// Number of live handles.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Attempt a single delivery to one handle.
    ///
    /// On any write failure the handle is unregistered and `false` is
    /// returned - this is the only implicit removal path. An unknown handle
    /// also returns `false` without side effects.
    pub async fn send(&self, handle: &HandleId, frame: FeedFrame) -> bool {
        let tx = match self.connections.read().await.get(handle) {
            Some(tx) => tx.clone(),
            None => return false,
        };

        if tx.send(frame).is_err() {
            tracing::debug!(%handle, "send failed, unregistering connection");
            self.unregister(handle).await;
            return false;
        }
        true
    }

    /// Deliver a frame to every handle registered at call start.
    ///
    /// Each handle gets at most one delivery attempt; failed ones are pruned
    /// after the pass. Returns the number of successful deliveries.
    pub async fn broadcast(&self, frame: &FeedFrame) -> usize {
        // Stable snapshot; the map is not touched while iterating.
        let targets: Vec<(HandleId, mpsc::UnboundedSender<FeedFrame>)> = self
            .connections
            .read()
            .await
            .iter()
            .map(|(handle, tx)| (handle.clone(), tx.clone()))
            .collect();

        let mut delivered = 0;
        let mut failed = Vec::new();
        for (handle, tx) in targets {
            if tx.send(frame.clone()).is_ok() {
                delivered += 1;
            } else {
                failed.push(handle);
            }
        }

        if !failed.is_empty() {
            let mut connections = self.connections.write().await;
            for handle in &failed {
                tracing::debug!(handle = %handle, "broadcast failed, unregistering connection");
                connections.remove(handle);
            }
        }

        delivered
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
