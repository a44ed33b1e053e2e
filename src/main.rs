//! Votewatch server binary.
//!
//! Startup order matters: configuration, tracing, collaborators, the result
//! hub (which spawns the broadcaster), then the HTTP listener. Shutdown
//! reverses it - the listener drains first, then the hub cancels the
//! broadcaster at its next sleep.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use votewatch::adapters::http::{api_router, ApiState};
use votewatch::adapters::memory::{DevSignatureVerifier, InMemoryLedger};
use votewatch::adapters::websocket::{results_feed_router, FeedState, ResultHub};
use votewatch::config::{AppConfig, LedgerMode};
use votewatch::ports::{LedgerQuery, TransactionBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let (ledger, tx_builder): (
        Option<Arc<dyn LedgerQuery>>,
        Option<Arc<dyn TransactionBuilder>>,
    ) = match config.ledger.mode {
        LedgerMode::Memory => {
            let ledger = Arc::new(InMemoryLedger::new(&config.ledger));
            (Some(ledger.clone()), Some(ledger))
        }
        LedgerMode::Disabled => {
            tracing::warn!("no ledger collaborator configured, feed degrades to idle polling");
            (None, None)
        }
    };

    let hub = Arc::new(ResultHub::new(ledger.clone(), config.results.clone()));
    hub.start();

    let api_state = ApiState::new(
        ledger,
        tx_builder,
        Arc::new(DevSignatureVerifier),
        config.ledger.contract_address.clone(),
    );

    let app = api_router(api_state)
        .merge(results_feed_router(FeedState::new(hub.clone())))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "votewatch listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    hub.shutdown().await;
    tracing::info!("votewatch stopped");
    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
