//! Candidate endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::domain::Candidate;

use super::dto::{CandidateCreateRequest, PreparedTransactionResponse};
use super::error::ApiError;
use super::state::ApiState;

/// `POST /api/candidates` - prepare an addCandidate transaction (admin only).
pub async fn add_candidate(
    State(state): State<ApiState>,
    Json(request): Json<CandidateCreateRequest>,
) -> Result<Json<PreparedTransactionResponse>, ApiError> {
    state
        .require_admin(&request.sender_address, "add candidates")
        .await?;

    let transaction = state
        .tx_builder()?
        .add_candidate(
            &request.sender_address,
            request.election_id,
            &request.name,
            &request.party,
            &request.image_url,
        )
        .await?;

    Ok(Json(PreparedTransactionResponse::new(transaction)))
}

/// `GET /api/elections/:id/candidates` - all candidates of an election, in
/// contract storage order.
pub async fn list_candidates(
    Path(election_id): Path<u64>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Candidate>>, ApiError> {
    Ok(Json(state.ledger()?.candidates(election_id).await?))
}
