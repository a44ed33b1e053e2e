//! Wire frames for the live results feed.
//!
//! Three shapes reach subscribers:
//!
//! - `{election, candidates, lastUpdate}` - a personalized snapshot
//! - `{error, electionId}` - terminal not-found notice
//! - `{electionId, results}` - global unaddressed broadcast
//!
//! Frames are plain JSON objects (no envelope tag); subscribers distinguish
//! them by their keys, matching the original wire protocol.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Candidate, Election, ElectionSnapshot};

/// Any frame the feed can deliver.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FeedFrame {
    Results(ResultsFrame),
    Error(ErrorFrame),
    Broadcast(BroadcastFrame),
}

/// One election's state as delivered to a subscriber.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsFrame {
    pub election: Election,
    pub candidates: Vec<Candidate>,
    pub last_update: DateTime<Utc>,
    /// Informational note, only present on placeholder frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ResultsFrame {
    /// Frame carrying a materialized snapshot.
    pub fn from_snapshot(snapshot: ElectionSnapshot) -> Self {
        Self {
            election: snapshot.election,
            candidates: snapshot.candidates,
            last_update: snapshot.last_update,
            info: None,
        }
    }

    /// Synthesized frame for an election whose candidates are not registered
    /// yet. The feed sends this instead of going silent or erroring.
    pub fn placeholder(election_id: u64) -> Self {
        Self {
            election: Election::placeholder(election_id),
            candidates: Vec::new(),
            last_update: Utc::now(),
            info: Some("No candidates registered yet".to_string()),
        }
    }
}

/// Terminal error notice for a subscription to a nonexistent election.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorFrame {
    pub error: String,
    pub election_id: u64,
}

impl ErrorFrame {
    pub fn not_found(election_id: u64) -> Self {
        Self {
            error: format!("Election {election_id} does not exist"),
            election_id,
        }
    }
}

/// Unaddressed frame fanned out to every subscriber by the broadcast cycle,
/// tagged with the election it describes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastFrame {
    pub election_id: u64,
    pub results: ResultsFrame,
}

impl BroadcastFrame {
    pub fn new(election_id: u64, snapshot: ElectionSnapshot) -> Self {
        Self {
            election_id,
            results: ResultsFrame::from_snapshot(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_frame_has_no_envelope_tag() {
        let frame = FeedFrame::Results(ResultsFrame::from_snapshot(
            ElectionSnapshot::without_candidates(Election::placeholder(1)),
        ));
        let json = serde_json::to_value(&frame).unwrap();

        assert!(json.get("election").is_some());
        assert!(json.get("lastUpdate").is_some());
        assert!(json.get("type").is_none());
    }

    #[test]
    fn placeholder_frame_carries_info_note_and_empty_candidates() {
        let frame = ResultsFrame::placeholder(4);
        let json = serde_json::to_value(&frame).unwrap();

        assert_eq!(json["election"]["id"], 4);
        assert_eq!(json["election"]["name"], "Loading...");
        assert_eq!(json["candidates"].as_array().unwrap().len(), 0);
        assert_eq!(json["info"], "No candidates registered yet");
    }

    #[test]
    fn error_frame_matches_wire_shape() {
        let frame = FeedFrame::Error(ErrorFrame::not_found(3));
        let json = serde_json::to_value(&frame).unwrap();

        assert_eq!(json["error"], "Election 3 does not exist");
        assert_eq!(json["electionId"], 3);
    }

    #[test]
    fn broadcast_frame_tags_election_id() {
        let snapshot = ElectionSnapshot::without_candidates(Election::placeholder(7));
        let frame = FeedFrame::Broadcast(BroadcastFrame::new(7, snapshot));
        let json = serde_json::to_value(&frame).unwrap();

        assert_eq!(json["electionId"], 7);
        assert!(json["results"]["election"].is_object());
    }

    #[test]
    fn ready_frame_omits_info() {
        let frame = ResultsFrame::from_snapshot(ElectionSnapshot::without_candidates(
            Election::placeholder(1),
        ));
        let json = serde_json::to_value(&frame).unwrap();
        assert!(json.get("info").is_none());
    }
}
