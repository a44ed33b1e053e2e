//! Voter registration, eligibility and voting endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::domain::VoterStanding;

use super::dto::{PreparedTransactionResponse, VoteRequest, VoterRegisterRequest};
use super::error::ApiError;
use super::state::ApiState;

/// `POST /api/voters/register` - prepare a registerMultipleVoters
/// transaction (admin only).
pub async fn register_voters(
    State(state): State<ApiState>,
    Json(request): Json<VoterRegisterRequest>,
) -> Result<Json<PreparedTransactionResponse>, ApiError> {
    state
        .require_admin(&request.sender_address, "register voters")
        .await?;

    if request.voter_addresses.is_empty() {
        return Err(ApiError::BadRequest(
            "No voter addresses provided".to_string(),
        ));
    }

    let transaction = state
        .tx_builder()?
        .register_voters(
            &request.sender_address,
            request.election_id,
            &request.voter_addresses,
        )
        .await?;

    Ok(Json(PreparedTransactionResponse::new(transaction)))
}

/// `GET /api/voters/:election_id/:address/eligible` - a voter's standing.
pub async fn check_eligibility(
    Path((election_id, address)): Path<(u64, String)>,
    State(state): State<ApiState>,
) -> Result<Json<VoterStanding>, ApiError> {
    let ledger = state.ledger()?;
    let eligible = ledger.is_voter_eligible(election_id, &address).await?;
    let has_voted = ledger.has_voter_voted(election_id, &address).await?;
    Ok(Json(VoterStanding::new(eligible, has_voted)))
}

/// `POST /api/vote` - prepare a vote transaction.
///
/// Eligibility and double-vote checks run here as a courtesy; the contract
/// enforces them again when the signed transaction lands.
pub async fn cast_vote(
    State(state): State<ApiState>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<PreparedTransactionResponse>, ApiError> {
    let ledger = state.ledger()?;

    let eligible = ledger
        .is_voter_eligible(request.election_id, &request.sender_address)
        .await?;
    if !eligible {
        return Err(ApiError::Forbidden(
            "You are not eligible to vote in this election".to_string(),
        ));
    }

    let has_voted = ledger
        .has_voter_voted(request.election_id, &request.sender_address)
        .await?;
    if has_voted {
        return Err(ApiError::BadRequest(
            "You have already voted in this election".to_string(),
        ));
    }

    let transaction = state
        .tx_builder()?
        .cast_vote(
            &request.sender_address,
            request.election_id,
            request.candidate_id,
        )
        .await?;

    Ok(Json(PreparedTransactionResponse::new(transaction)))
}
