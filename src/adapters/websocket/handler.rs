//! WebSocket upgrade handler for the live results feed.
//!
//! Connection lifecycle:
//! 1. Upgrade `GET /ws/results/:election_id`
//! 2. Register a handle in the connection registry
//! 3. Pump registry frames to the socket (writer task)
//! 4. Watch the socket for close/error (reader task)
//! 5. Run the subscription session until it ends
//! 6. Unregister and tear both tasks down

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};

use super::hub::ResultHub;
use super::messages::FeedFrame;
use super::registry::HandleId;
use super::session::SubscriptionSession;

/// State required for feed handling.
#[derive(Clone)]
pub struct FeedState {
    pub hub: Arc<ResultHub>,
}

impl FeedState {
    pub fn new(hub: Arc<ResultHub>) -> Self {
        Self { hub }
    }
}

/// Handle WebSocket upgrade requests for one election's live results.
///
/// Route: `GET /ws/results/:election_id`
pub async fn ws_results_handler(
    ws: WebSocketUpgrade,
    Path(election_id): Path<u64>,
    State(state): State<FeedState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, election_id, state.hub))
}

/// Drive one subscriber connection for its whole life.
async fn handle_socket(socket: WebSocket, election_id: u64, hub: Arc<ResultHub>) {
    let (mut sink, mut stream) = socket.split();

    let handle = HandleId::new();
    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel::<FeedFrame>();
    hub.registry().register(handle.clone(), frame_tx).await;
    tracing::debug!(handle = %handle, election_id, "results feed connected");

    // Writer: serialize registry frames onto the socket. When a write fails
    // the receiver drops, which makes the next registry send fail and prune
    // the handle.
    let write_task = tokio::spawn(async move {
        while let Some(frame) = frame_rx.recv().await {
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize feed frame");
                    continue;
                }
            };
            if sink.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    // Reader: the only purpose of inbound traffic is disconnect detection.
    let (disconnect_tx, disconnect_rx) = watch::channel(false);
    let read_task = tokio::spawn(async move {
        while let Some(result) = stream.next().await {
            match result {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
        let _ = disconnect_tx.send(true);
    });

    let session = SubscriptionSession::new(
        hub.registry(),
        hub.fetcher(),
        election_id,
        handle.clone(),
    );
    session
        .run(hub.session_poll_interval(), disconnect_rx)
        .await;

    // The session unregisters on exit; this removal is idempotent teardown.
    hub.registry().unregister(&handle).await;
    write_task.abort();
    read_task.abort();
    tracing::debug!(handle = %handle, election_id, "results feed closed");
}

/// Router for the feed endpoint.
pub fn results_feed_router(state: FeedState) -> Router {
    Router::new()
        .route("/ws/results/:election_id", get(ws_results_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResultsConfig;

    #[test]
    fn feed_state_shares_hub() {
        let hub = Arc::new(ResultHub::new(None, ResultsConfig::default()));
        let state = FeedState::new(hub.clone());
        assert!(Arc::ptr_eq(&state.hub, &hub));
    }

    #[tokio::test]
    async fn feed_router_builds() {
        let hub = Arc::new(ResultHub::new(None, ResultsConfig::default()));
        let _router = results_feed_router(FeedState::new(hub));
    }
}
