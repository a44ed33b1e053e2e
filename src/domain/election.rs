//! Election and candidate records as read from the ledger contract.

use serde::{Deserialize, Serialize};

/// One election as recorded on the ledger.
///
/// Field order mirrors the contract's `getElection` tuple. The `status`
/// label comes from a separate `getElectionStatus` read and is absent on
/// paths that skip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Election {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Unix seconds.
    pub start_time: i64,
    /// Unix seconds.
    pub end_time: i64,
    pub is_active: bool,
    /// Address of the admin that created the election.
    pub creator: String,
    pub total_votes: u64,
    pub candidate_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Election {
    /// Zeroed placeholder record for an election whose candidate list is not
    /// populated yet. The live feed sends this instead of going silent.
    pub fn placeholder(id: u64) -> Self {
        Self {
            id,
            name: "Loading...".to_string(),
            description: String::new(),
            start_time: 0,
            end_time: 0,
            is_active: false,
            creator: String::new(),
            total_votes: 0,
            candidate_count: 0,
            status: None,
        }
    }
}

/// One candidate within an election.
///
/// Sequences of candidates are kept in the order the ledger returns them;
/// neither polling path sorts by vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: u64,
    pub name: String,
    pub party: String,
    pub vote_count: u64,
    pub image_url: String,
}

/// Connectivity snapshot of the ledger node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub connected: bool,
    pub chain_id: Option<u64>,
    pub block_number: Option<u64>,
}

/// A voter's standing in one election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterStanding {
    pub eligible: bool,
    pub has_voted: bool,
    pub can_vote: bool,
}

impl VoterStanding {
    pub fn new(eligible: bool, has_voted: bool) -> Self {
        Self {
            eligible,
            has_voted,
            can_vote: eligible && !has_voted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn election_serializes_camel_case() {
        let election = Election {
            id: 1,
            name: "Board 2026".to_string(),
            description: "Annual board election".to_string(),
            start_time: 1_700_000_000,
            end_time: 1_700_086_400,
            is_active: true,
            creator: "0xabc".to_string(),
            total_votes: 42,
            candidate_count: 3,
            status: Some("Active".to_string()),
        };

        let json = serde_json::to_string(&election).unwrap();
        assert!(json.contains(r#""startTime":1700000000"#));
        assert!(json.contains(r#""isActive":true"#));
        assert!(json.contains(r#""candidateCount":3"#));
    }

    #[test]
    fn election_status_omitted_when_absent() {
        let election = Election::placeholder(7);
        let json = serde_json::to_string(&election).unwrap();
        assert!(!json.contains("status"));
    }

    #[test]
    fn placeholder_is_zeroed() {
        let election = Election::placeholder(3);
        assert_eq!(election.id, 3);
        assert_eq!(election.name, "Loading...");
        assert_eq!(election.total_votes, 0);
        assert!(!election.is_active);
    }

    #[test]
    fn voter_standing_can_vote_requires_eligible_and_not_voted() {
        assert!(VoterStanding::new(true, false).can_vote);
        assert!(!VoterStanding::new(true, true).can_vote);
        assert!(!VoterStanding::new(false, false).can_vote);
    }
}
