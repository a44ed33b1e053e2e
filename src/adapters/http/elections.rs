//! Election endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::application::SnapshotOutcome;
use crate::domain::{Election, ElectionSnapshot};
use crate::ports::LedgerError;

use super::dto::{ElectionCreateRequest, PreparedTransactionResponse};
use super::error::ApiError;
use super::state::ApiState;

/// `POST /api/elections` - prepare a createElection transaction (admin only).
pub async fn create_election(
    State(state): State<ApiState>,
    Json(request): Json<ElectionCreateRequest>,
) -> Result<Json<PreparedTransactionResponse>, ApiError> {
    state
        .require_admin(&request.sender_address, "create elections")
        .await?;

    let transaction = state
        .tx_builder()?
        .create_election(
            &request.sender_address,
            &request.name,
            &request.description,
            request.start_time,
            request.end_time,
        )
        .await?;

    Ok(Json(PreparedTransactionResponse::new(transaction)))
}

/// `GET /api/elections` - all elections with status labels.
///
/// Per-id read failures are skipped, not fatal: a half-readable contract
/// still yields the readable elections.
pub async fn list_elections(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Election>>, ApiError> {
    let ledger = match state.ledger() {
        Ok(ledger) => ledger,
        Err(_) => return Ok(Json(Vec::new())),
    };

    let count = ledger.election_count().await?;
    let mut elections = Vec::with_capacity(count as usize);
    for id in 1..=count {
        match ledger.election(id).await {
            Ok(mut election) => {
                election.status = ledger.election_status(id).await.ok();
                elections.push(election);
            }
            Err(e) => {
                tracing::debug!(election_id = id, error = %e, "skipping unreadable election");
            }
        }
    }

    Ok(Json(elections))
}

/// `GET /api/elections/active` - ids of elections currently accepting votes.
pub async fn active_elections(
    State(state): State<ApiState>,
) -> Result<Json<Vec<u64>>, ApiError> {
    Ok(Json(state.ledger()?.active_elections().await?))
}

/// `GET /api/elections/:id` - one election with its status label.
pub async fn get_election(
    Path(election_id): Path<u64>,
    State(state): State<ApiState>,
) -> Result<Json<Election>, ApiError> {
    let ledger = state.ledger()?;

    let count = ledger.election_count().await?;
    if election_id == 0 || election_id > count {
        return Err(ApiError::NotFound(format!(
            "Election {election_id} does not exist"
        )));
    }

    let mut election = ledger.election(election_id).await?;
    election.status = ledger.election_status(election_id).await.ok();
    Ok(Json(election))
}

/// `GET /api/elections/:id/results` - current results snapshot.
///
/// Shares the feed's classification path: an election with no candidates yet
/// answers 200 with an empty candidate list, not an error.
pub async fn election_results(
    Path(election_id): Path<u64>,
    State(state): State<ApiState>,
) -> Result<Json<ElectionSnapshot>, ApiError> {
    match state.fetcher.fetch(election_id).await {
        SnapshotOutcome::Ready(snapshot) | SnapshotOutcome::Empty(snapshot) => Ok(Json(snapshot)),
        SnapshotOutcome::NotFound(id) => Err(ApiError::NotFound(format!(
            "Election {id} does not exist"
        ))),
        SnapshotOutcome::Transient {
            cause: LedgerError::NotLoaded,
            ..
        } => Err(ApiError::ServiceUnavailable(
            "Ledger client is not loaded".to_string(),
        )),
        SnapshotOutcome::Transient { cause, .. } => Err(cause.into()),
    }
}
