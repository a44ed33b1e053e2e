//! ResultsBroadcaster - the global background fan-out cycle.
//!
//! Runs from process start until cancelled. Each cycle reads the election
//! count, fetches a bounded slice of elections, and broadcasts a tagged
//! frame for every readable one to all current subscribers regardless of
//! which election they asked for. Not-found and transient outcomes are
//! silently skipped: the shared channel has no addressed subscriber to hand
//! an error to.
//!
//! One bad cycle never stops the loop - a failed count read (or a missing
//! ledger collaborator) ends the cycle normally and sleeps the longer
//! backoff interval. Cancellation is observed only at the sleep, via the
//! shutdown watch channel.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time;

use crate::application::{SnapshotFetcher, SnapshotOutcome};
use crate::config::ResultsConfig;
use crate::ports::LedgerQuery;

use super::messages::{BroadcastFrame, FeedFrame};
use super::registry::ConnectionRegistry;

/// What one broadcast cycle did. Exposed for tests.
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Election ids addressed this cycle, in order.
    pub touched: Vec<u64>,
    /// Frames actually broadcast (one per readable election).
    pub broadcast: usize,
    /// Whether the cycle ended early on a fault (missing ledger or count
    /// read failure); the loop sleeps the backoff interval instead.
    pub faulted: bool,
}

/// Background fan-out cycle over the ledger and the connection registry.
pub struct ResultsBroadcaster {
    ledger: Option<Arc<dyn LedgerQuery>>,
    fetcher: SnapshotFetcher,
    registry: Arc<ConnectionRegistry>,
    config: ResultsConfig,
}

impl ResultsBroadcaster {
    pub fn new(
        ledger: Option<Arc<dyn LedgerQuery>>,
        registry: Arc<ConnectionRegistry>,
        config: ResultsConfig,
    ) -> Self {
        let fetcher = SnapshotFetcher::new(ledger.clone());
        Self {
            ledger,
            fetcher,
            registry,
            config,
        }
    }

    /// Run the broadcast loop until the shutdown channel flips true.
    ///
    /// The signal is observed cooperatively at the inter-cycle sleep, never
    /// mid-cycle; an in-flight cycle only performs reads and idempotent
    /// broadcasts, so nothing needs rolling back.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("results broadcaster started");
        loop {
            let report = self.cycle_once().await;
            let delay = if report.faulted {
                self.config.backoff_interval()
            } else {
                self.config.broadcast_interval()
            };

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("results broadcaster stopped");
                        return;
                    }
                }
                _ = time::sleep(delay) => {}
            }
        }
    }

    /// Run exactly one broadcast cycle.
    ///
    /// Addresses election ids `1..min(count + 1, bound)` - never more than
    /// the configured bound per cycle, so one cycle's cost stays fixed no
    /// matter how many elections the contract accumulates.
    pub async fn cycle_once(&self) -> CycleReport {
        let mut report = CycleReport::default();

        let Some(ledger) = &self.ledger else {
            report.faulted = true;
            return report;
        };

        let count = match ledger.election_count().await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(error = %e, "broadcast cycle failed to read election count");
                report.faulted = true;
                return report;
            }
        };

        if count == 0 {
            return report;
        }

        for election_id in 1..(count + 1).min(self.config.max_broadcast_elections) {
            report.touched.push(election_id);
            match self.fetcher.fetch(election_id).await {
                SnapshotOutcome::Ready(snapshot) | SnapshotOutcome::Empty(snapshot) => {
                    let frame = FeedFrame::Broadcast(BroadcastFrame::new(election_id, snapshot));
                    let delivered = self.registry.broadcast(&frame).await;
                    report.broadcast += 1;
                    tracing::trace!(election_id, delivered, "broadcast election results");
                }
                SnapshotOutcome::NotFound(id) => {
                    tracing::trace!(election_id = id, "skipping nonexistent election");
                }
                SnapshotOutcome::Transient { election_id, cause } => {
                    tracing::debug!(
                        election_id,
                        error = %cause,
                        "skipping election after transient read failure"
                    );
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::registry::HandleId;
    use crate::domain::{Candidate, Election, NodeStatus};
    use crate::ports::LedgerError;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct StubLedger {
        count: Result<u64, LedgerError>,
    }

    #[async_trait]
    impl LedgerQuery for StubLedger {
        async fn election_count(&self) -> Result<u64, LedgerError> {
            self.count.clone()
        }

        async fn election(&self, id: u64) -> Result<Election, LedgerError> {
            let mut election = Election::placeholder(id);
            election.name = format!("Election {id}");
            Ok(election)
        }

        async fn election_status(&self, _id: u64) -> Result<String, LedgerError> {
            Ok("Active".to_string())
        }

        async fn active_elections(&self) -> Result<Vec<u64>, LedgerError> {
            Ok(Vec::new())
        }

        async fn candidates(&self, _election_id: u64) -> Result<Vec<Candidate>, LedgerError> {
            Ok(Vec::new())
        }

        async fn election_results(&self, election_id: u64) -> Result<Vec<Candidate>, LedgerError> {
            // Odd elections have a candidate, even ones fault empty.
            if election_id % 2 == 1 {
                Ok(vec![Candidate {
                    id: 1,
                    name: "A".to_string(),
                    party: "P".to_string(),
                    vote_count: 1,
                    image_url: String::new(),
                }])
            } else {
                Err(LedgerError::EmptyCollection)
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

    fn broadcaster_with(
        count: Result<u64, LedgerError>,
    ) -> (ResultsBroadcaster, Arc<ConnectionRegistry>) {
        let registry = Arc::new(ConnectionRegistry::new());
        let ledger: Arc<dyn LedgerQuery> = Arc::new(StubLedger { count });
        let broadcaster =
            ResultsBroadcaster::new(Some(ledger), registry.clone(), ResultsConfig::default());
        (broadcaster, registry)
    }

    #[tokio::test]
    async fn cycle_without_ledger_faults_for_backoff() {
        let registry = Arc::new(ConnectionRegistry::new());
        let broadcaster =
            ResultsBroadcaster::new(None, registry, ResultsConfig::default());

        let report = broadcaster.cycle_once().await;
        assert!(report.faulted);
        assert!(report.touched.is_empty());
    }

    #[tokio::test]
    async fn cycle_with_count_failure_faults_for_backoff() {
        let (broadcaster, _registry) =
            broadcaster_with(Err(LedgerError::Transport("node down".to_string())));

        let report = broadcaster.cycle_once().await;
        assert!(report.faulted);
    }

    #[tokio::test]
    async fn cycle_with_zero_elections_skips_delivery() {
        let (broadcaster, _registry) = broadcaster_with(Ok(0));

        let report = broadcaster.cycle_once().await;
        assert!(!report.faulted);
        assert!(report.touched.is_empty());
        assert_eq!(report.broadcast, 0);
    }

    #[tokio::test]
    async fn cycle_caps_at_nine_elections_for_large_counts() {
        let (broadcaster, _registry) = broadcaster_with(Ok(12));

        let report = broadcaster.cycle_once().await;
        assert_eq!(report.touched, (1..=9).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn cycle_touches_all_elections_when_under_bound() {
        let (broadcaster, _registry) = broadcaster_with(Ok(2));

        let report = broadcaster.cycle_once().await;
        assert_eq!(report.touched, vec![1, 2]);
        // Both readable (one populated, one empty) - both broadcast.
        assert_eq!(report.broadcast, 2);
    }

    #[tokio::test]
    async fn cycle_broadcasts_tagged_frames_to_subscribers() {
        let (broadcaster, registry) = broadcaster_with(Ok(1));
        let handle = HandleId::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(handle, tx).await;

        broadcaster.cycle_once().await;

        let json = serde_json::to_value(rx.try_recv().unwrap()).unwrap();
        assert_eq!(json["electionId"], 1);
        assert_eq!(json["results"]["election"]["name"], "Election 1");
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let (broadcaster, _registry) = broadcaster_with(Ok(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move { broadcaster.run(shutdown_rx).await });
        shutdown_tx.send(true).unwrap();

        tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .expect("broadcaster should observe shutdown at its sleep")
            .unwrap();
    }
}
