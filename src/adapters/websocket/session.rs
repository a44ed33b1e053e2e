//! SubscriptionSession - the per-connection polling loop.
//!
//! One session per accepted WebSocket, bound to a single election id for its
//! whole life. Every step fetches a fresh snapshot and delivers a
//! personalized frame; the loop ends on transport disconnect, write failure,
//! or a terminal not-found, and unconditionally unregisters its handle on
//! the way out.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::application::{SnapshotFetcher, SnapshotOutcome};

use super::messages::{ErrorFrame, FeedFrame, ResultsFrame};
use super::registry::{ConnectionRegistry, HandleId};

/// Per-subscriber polling session.
pub struct SubscriptionSession {
    registry: Arc<ConnectionRegistry>,
    fetcher: SnapshotFetcher,
    election_id: u64,
    handle: HandleId,
    alive: bool,
}

impl SubscriptionSession {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        fetcher: SnapshotFetcher,
        election_id: u64,
        handle: HandleId,
    ) -> Self {
        Self {
            registry,
            fetcher,
            election_id,
            handle,
            alive: true,
        }
    }

    /// Whether the session would keep polling.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Run one poll iteration. Returns the alive flag.
    ///
    /// - handle no longer registered (pruned by a failed broadcast) → exit
    /// - `Ready` → deliver the full snapshot to this connection only
    /// - `Empty` → deliver a synthesized placeholder; the feed never goes
    ///   silent just because candidates have not been added yet
    /// - `NotFound` → deliver one error frame, then terminate for good
    /// - `Transient` → log and deliver nothing; retried next step
    ///
    /// Any failed delivery flips the session dead.
    pub async fn step(&mut self) -> bool {
        if !self.alive {
            return false;
        }

        if !self.registry.contains(&self.handle).await {
            self.alive = false;
            return false;
        }

        match self.fetcher.fetch(self.election_id).await {
            SnapshotOutcome::Ready(snapshot) => {
                let frame = FeedFrame::Results(ResultsFrame::from_snapshot(snapshot));
                if !self.registry.send(&self.handle, frame).await {
                    self.alive = false;
                }
            }
            SnapshotOutcome::Empty(_) => {
                let frame = FeedFrame::Results(ResultsFrame::placeholder(self.election_id));
                if !self.registry.send(&self.handle, frame).await {
                    self.alive = false;
                }
            }
            SnapshotOutcome::NotFound(id) => {
                // Terminal: a session never recovers from not-found.
                let frame = FeedFrame::Error(ErrorFrame::not_found(id));
                let _ = self.registry.send(&self.handle, frame).await;
                self.alive = false;
            }
            SnapshotOutcome::Transient { election_id, cause } => {
                tracing::debug!(
                    election_id,
                    error = %cause,
                    "transient snapshot failure, skipping delivery"
                );
            }
        }

        self.alive
    }

    /// Run the session until it dies or the transport disconnects.
    ///
    /// `disconnected` flips true when the socket reader observes a close or
    /// transport error; a dropped sender counts as disconnect too. On exit
    /// for any reason the handle is unregistered (idempotent if a failed
    /// send already removed it).
    pub async fn run(mut self, poll_interval: Duration, mut disconnected: watch::Receiver<bool>) {
        while self.step().await {
            tokio::select! {
                changed = disconnected.changed() => {
                    if changed.is_err() || *disconnected.borrow() {
                        break;
                    }
                }
                _ = time::sleep(poll_interval) => {}
            }
        }

        self.registry.unregister(&self.handle).await;
        tracing::debug!(
            handle = %self.handle,
            election_id = self.election_id,
            "subscription session ended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, Election, NodeStatus};
    use crate::ports::{LedgerError, LedgerQuery};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    /// Ledger stub counting fetches; election 1 exists with one candidate,
    /// election results for it optionally fault as an empty collection.
    struct StubLedger {
        count: u64,
        empty: bool,
        fetches: AtomicUsize,
    }

    impl StubLedger {
        fn new(count: u64, empty: bool) -> Self {
            Self {
                count,
                empty,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LedgerQuery for StubLedger {
        async fn election_count(&self) -> Result<u64, LedgerError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.count)
        }

        async fn election(&self, id: u64) -> Result<Election, LedgerError> {
            let mut election = Election::placeholder(id);
            election.name = "Stub".to_string();
            Ok(election)
        }

        async fn election_status(&self, _id: u64) -> Result<String, LedgerError> {
            Ok("Active".to_string())
        }

        async fn active_elections(&self) -> Result<Vec<u64>, LedgerError> {
            Ok(Vec::new())
        }

        async fn candidates(&self, _election_id: u64) -> Result<Vec<Candidate>, LedgerError> {
            self.election_results(_election_id).await
        }

        async fn election_results(&self, _election_id: u64) -> Result<Vec<Candidate>, LedgerError> {
            if self.empty {
                Err(LedgerError::EmptyCollection)
            } else {
                Ok(vec![Candidate {
                    id: 1,
                    name: "A".to_string(),
                    party: "P".to_string(),
                    vote_count: 2,
                    image_url: String::new(),
                }])
            }
        }

        async fn is_admin(&self, _address: &str) -> Result<bool, LedgerError> {
            Ok(false)
        }

        async fn is_voter_eligible(&self, _e: u64, _a: &str) -> Result<bool, LedgerError> {
            Ok(false)
        }

        async fn has_voter_voted(&self, _e: u64, _a: &str) -> Result<bool, LedgerError> {
            Ok(false)
        }

        async fn node_status(&self) -> NodeStatus {
            NodeStatus {
                connected: true,
                chain_id: None,
                block_number: None,
            }
        }
    }

    async fn session_with(
        ledger: Arc<StubLedger>,
        election_id: u64,
    ) -> (
        SubscriptionSession,
        mpsc::UnboundedReceiver<FeedFrame>,
        Arc<ConnectionRegistry>,
        HandleId,
    ) {
        let registry = Arc::new(ConnectionRegistry::new());
        let handle = HandleId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(handle.clone(), tx).await;

        let fetcher = SnapshotFetcher::new(Some(ledger as Arc<dyn LedgerQuery>));
        let session = SubscriptionSession::new(
            registry.clone(),
            fetcher,
            election_id,
            handle.clone(),
        );
        (session, rx, registry, handle)
    }

    #[tokio::test]
    async fn not_found_delivers_one_error_then_terminates() {
        let ledger = Arc::new(StubLedger::new(2, false));
        let (mut session, mut rx, _registry, _handle) = session_with(ledger, 3).await;

        assert!(!session.step().await);

        let frame = rx.try_recv().unwrap();
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["error"], "Election 3 does not exist");
        assert_eq!(json["electionId"], 3);

        // Dead session delivers nothing further.
        assert!(!session.step().await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_election_yields_placeholder_frames_never_errors() {
        let ledger = Arc::new(StubLedger::new(1, true));
        let (mut session, mut rx, _registry, _handle) = session_with(ledger, 1).await;

        for _ in 0..3 {
            assert!(session.step().await);
            let json = serde_json::to_value(&rx.try_recv().unwrap()).unwrap();
            assert_eq!(json["candidates"].as_array().unwrap().len(), 0);
            assert_eq!(json["election"]["name"], "Loading...");
            assert!(json.get("error").is_none());
        }
    }

    #[tokio::test]
    async fn healthy_session_fetches_once_per_step() {
        let ledger = Arc::new(StubLedger::new(1, false));
        let (mut session, mut rx, _registry, _handle) = session_with(ledger.clone(), 1).await;

        let steps = 5;
        for _ in 0..steps {
            assert!(session.step().await);
        }
        assert_eq!(ledger.fetches.load(Ordering::SeqCst), steps);
        for _ in 0..steps {
            assert!(rx.try_recv().is_ok());
        }
    }

    #[tokio::test]
    async fn transient_failure_skips_delivery_but_keeps_session() {
        let (mut session, mut rx, _registry, _handle) = {
            let registry = Arc::new(ConnectionRegistry::new());
            let handle = HandleId::new();
            let (tx, rx) = mpsc::unbounded_channel();
            registry.register(handle.clone(), tx).await;
            // No ledger configured: every fetch is a NotLoaded transient.
            let fetcher = SnapshotFetcher::new(None);
            (
                SubscriptionSession::new(registry.clone(), fetcher, 1, handle.clone()),
                rx,
                registry,
                handle,
            )
        };

        assert!(session.step().await);
        assert!(session.step().await);
        assert!(rx.try_recv().is_err(), "bounded silence on transient errors");
    }

    #[tokio::test]
    async fn removed_handle_ends_session_without_fetching() {
        let ledger = Arc::new(StubLedger::new(1, false));
        let (mut session, _rx, registry, handle) = session_with(ledger.clone(), 1).await;

        registry.unregister(&handle).await;
        assert!(!session.step().await);
        assert_eq!(ledger.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn write_failure_ends_session() {
        let ledger = Arc::new(StubLedger::new(1, false));
        let (mut session, rx, _registry, _handle) = session_with(ledger, 1).await;

        drop(rx);
        assert!(!session.step().await);
        assert!(!session.is_alive());
    }

    #[tokio::test]
    async fn run_unregisters_handle_on_disconnect() {
        let ledger = Arc::new(StubLedger::new(1, false));
        let (session, _rx, registry, handle) = session_with(ledger, 1).await;

        let (disconnect_tx, disconnect_rx) = watch::channel(false);
        let task = tokio::spawn(session.run(Duration::from_millis(10), disconnect_rx));

        disconnect_tx.send(true).unwrap();
        task.await.unwrap();
        assert!(!registry.contains(&handle).await);
    }
}
