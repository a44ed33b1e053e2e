//! Service info, login and admin-role endpoints.

use axum::extract::State;
use axum::Json;

use super::dto::{
    AddAdminRequest, LedgerStatusResponse, LoginRequest, LoginResponse,
    PreparedTransactionResponse, ServiceInfo,
};
use super::error::ApiError;
use super::state::ApiState;

/// `GET /` - service identity and ledger connectivity.
pub async fn service_info(State(state): State<ApiState>) -> Json<ServiceInfo> {
    let connected = match &state.ledger {
        Some(ledger) => ledger.node_status().await.connected,
        None => false,
    };
    Json(ServiceInfo {
        message: "Ledger Voting System API",
        version: env!("CARGO_PKG_VERSION"),
        ledger_connected: connected,
        contract_address: state.contract_address.clone(),
    })
}

/// `GET /api/ledger/status` - node connectivity details.
pub async fn ledger_status(State(state): State<ApiState>) -> Result<Json<LedgerStatusResponse>, ApiError> {
    let node = state.ledger()?.node_status().await;
    Ok(Json(LedgerStatusResponse {
        node,
        contract_address: state.contract_address.clone(),
    }))
}

/// `POST /api/auth/login` - wallet-signature login.
///
/// Proves key possession only; the admin flag is read from the ledger. With
/// no ledger configured the login still succeeds, as a non-admin.
pub async fn login(
    State(state): State<ApiState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let valid = state
        .verifier
        .verify(&request.address, &request.message, &request.signature)
        .await;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid signature".to_string()));
    }

    let is_admin = match &state.ledger {
        Some(ledger) => ledger.is_admin(&request.address).await?,
        None => {
            tracing::warn!("login with no ledger configured, admin check skipped");
            false
        }
    };

    Ok(Json(LoginResponse {
        address: request.address,
        is_admin,
        authenticated: true,
    }))
}

/// `POST /api/admin/add` - prepare an addAdmin transaction (admin only).
pub async fn add_admin(
    State(state): State<ApiState>,
    Json(request): Json<AddAdminRequest>,
) -> Result<Json<PreparedTransactionResponse>, ApiError> {
    state
        .require_admin(&request.sender_address, "add other admins")
        .await?;

    let transaction = state
        .tx_builder()?
        .add_admin(&request.sender_address, &request.admin_address)
        .await?;

    Ok(Json(PreparedTransactionResponse::new(transaction)))
}
