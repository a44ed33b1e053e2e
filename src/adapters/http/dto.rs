//! Wire DTOs for the REST surface, camelCase like the contract tooling
//! expects.

use serde::{Deserialize, Serialize};

use crate::domain::NodeStatus;
use crate::ports::UnsignedTransaction;

// ============================================
// Requests
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub address: String,
    pub signature: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionCreateRequest {
    pub name: String,
    pub description: String,
    pub start_time: i64,
    pub end_time: i64,
    pub sender_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCreateRequest {
    pub election_id: u64,
    pub name: String,
    pub party: String,
    #[serde(default)]
    pub image_url: String,
    pub sender_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterRegisterRequest {
    pub election_id: u64,
    pub voter_addresses: Vec<String>,
    pub sender_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub election_id: u64,
    pub candidate_id: u64,
    pub sender_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAdminRequest {
    pub admin_address: String,
    pub sender_address: String,
}

// ============================================
// Responses
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub address: String,
    pub is_admin: bool,
    pub authenticated: bool,
}

/// A prepared transaction handed back for client-side signing.
#[derive(Debug, Serialize)]
pub struct PreparedTransactionResponse {
    pub transaction: UnsignedTransaction,
    pub message: &'static str,
}

impl PreparedTransactionResponse {
    pub fn new(transaction: UnsignedTransaction) -> Self {
        Self {
            transaction,
            message: "Transaction prepared successfully",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub ledger_connected: bool,
    pub contract_address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStatusResponse {
    #[serde(flatten)]
    pub node: NodeStatus,
    pub contract_address: String,
}

/// JSON error body: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &'static str, message: String) -> Self {
        Self {
            error: ErrorBody { code, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_request_deserializes_camel_case() {
        let json = r#"{"electionId":1,"candidateId":2,"senderAddress":"0xabc"}"#;
        let request: VoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.election_id, 1);
        assert_eq!(request.candidate_id, 2);
    }

    #[test]
    fn candidate_request_defaults_missing_image_url() {
        let json = r#"{"electionId":1,"name":"A","party":"P","senderAddress":"0xabc"}"#;
        let request: CandidateCreateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.image_url, "");
    }

    #[test]
    fn error_response_shape() {
        let body = ErrorResponse::new("NOT_FOUND", "Election 3 does not exist".to_string());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Election 3 does not exist");
    }

    #[test]
    fn ledger_status_flattens_node_fields() {
        let response = LedgerStatusResponse {
            node: NodeStatus {
                connected: true,
                chain_id: Some(1337),
                block_number: Some(9),
            },
            contract_address: "0xcontract".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["connected"], true);
        assert_eq!(json["chainId"], 1337);
        assert_eq!(json["contractAddress"], "0xcontract");
    }
}
