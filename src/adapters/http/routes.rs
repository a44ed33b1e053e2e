//! REST route table.

use axum::routing::{get, post};
use axum::Router;

use super::state::ApiState;
use super::{admin, candidates, elections, voters};

/// Assemble the REST router over the shared state.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(admin::service_info))
        .route("/api/ledger/status", get(admin::ledger_status))
        .route("/api/auth/login", post(admin::login))
        .route(
            "/api/elections",
            get(elections::list_elections).post(elections::create_election),
        )
        .route("/api/elections/active", get(elections::active_elections))
        .route("/api/elections/:election_id", get(elections::get_election))
        .route(
            "/api/elections/:election_id/results",
            get(elections::election_results),
        )
        .route(
            "/api/elections/:election_id/candidates",
            get(candidates::list_candidates),
        )
        .route("/api/candidates", post(candidates::add_candidate))
        .route("/api/voters/register", post(voters::register_voters))
        .route(
            "/api/voters/:election_id/:address/eligible",
            get(voters::check_eligibility),
        )
        .route("/api/vote", post(voters::cast_vote))
        .route("/api/admin/add", post(admin::add_admin))
        .with_state(state)
}
