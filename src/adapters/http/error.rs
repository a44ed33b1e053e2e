//! API error type mapped onto HTTP status codes.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::ports::LedgerError;

use super::dto::ErrorResponse;

/// REST API error that implements IntoResponse.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", msg),
        };
        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::NotLoaded => {
                ApiError::ServiceUnavailable("Ledger client is not loaded".to_string())
            }
            // EmptyCollection should be classified by callers; reaching here
            // means a handler forgot, and surfacing it loudly beats hiding it.
            LedgerError::EmptyCollection => {
                ApiError::Internal("unclassified empty collection read".to_string())
            }
            LedgerError::Reverted(msg) => ApiError::Internal(format!("Contract call failed: {msg}")),
            LedgerError::Transport(msg) => {
                ApiError::Internal(format!("Ledger transport failed: {msg}"))
            }
        }
    }
}
