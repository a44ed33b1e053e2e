//! ResultHub - composition root of the live feed.
//!
//! Owns the connection registry and the broadcaster's lifecycle: the
//! broadcaster task is spawned once at process start and cancelled once at
//! shutdown, cooperatively through a watch channel it observes at its sleep.
//! Subscription sessions are not owned here - each lives inside its own
//! connection handler and dies with it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::SnapshotFetcher;
use crate::config::ResultsConfig;
use crate::ports::LedgerQuery;

use super::broadcaster::ResultsBroadcaster;
use super::registry::ConnectionRegistry;

/// Owner of the feed's shared state and background cycle.
pub struct ResultHub {
    registry: Arc<ConnectionRegistry>,
    ledger: Option<Arc<dyn LedgerQuery>>,
    config: ResultsConfig,
    shutdown_tx: watch::Sender<bool>,
    broadcaster_task: Mutex<Option<JoinHandle<()>>>,
}

impl ResultHub {
    pub fn new(ledger: Option<Arc<dyn LedgerQuery>>, config: ResultsConfig) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
            ledger,
            config,
            shutdown_tx,
            broadcaster_task: Mutex::new(None),
        }
    }

    /// The shared connection registry.
    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        self.registry.clone()
    }

    /// A fetcher over the hub's ledger collaborator.
    pub fn fetcher(&self) -> SnapshotFetcher {
        SnapshotFetcher::new(self.ledger.clone())
    }

    /// Poll period for subscription sessions.
    pub fn session_poll_interval(&self) -> Duration {
        self.config.session_poll_interval()
    }

    /// Spawn the broadcaster task. Calling twice replaces nothing - the
    /// first task keeps running and the call is a no-op.
    pub fn start(&self) {
        let mut slot = self
            .broadcaster_task
            .lock()
            .expect("broadcaster task lock poisoned");
        if slot.is_some() {
            return;
        }

        let broadcaster = ResultsBroadcaster::new(
            self.ledger.clone(),
            self.registry.clone(),
            self.config.clone(),
        );
        let shutdown_rx = self.shutdown_tx.subscribe();
        *slot = Some(tokio::spawn(async move {
            broadcaster.run(shutdown_rx).await;
        }));
    }

    /// Signal shutdown and wait for the broadcaster to observe it.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
        let task = self
            .broadcaster_task
            .lock()
            .expect("broadcaster task lock poisoned")
            .take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_then_shutdown_completes() {
        let hub = ResultHub::new(None, ResultsConfig::default());
        hub.start();

        tokio::time::timeout(Duration::from_secs(1), hub.shutdown())
            .await
            .expect("shutdown should complete promptly");
    }

    #[tokio::test]
    async fn shutdown_without_start_is_a_noop() {
        let hub = ResultHub::new(None, ResultsConfig::default());
        hub.shutdown().await;
    }

    #[tokio::test]
    async fn start_twice_keeps_one_task() {
        let hub = ResultHub::new(None, ResultsConfig::default());
        hub.start();
        hub.start();
        hub.shutdown().await;
        assert!(hub.broadcaster_task.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn fetcher_reports_missing_ledger() {
        let hub = ResultHub::new(None, ResultsConfig::default());
        assert!(!hub.fetcher().is_loaded());
    }
}
