//! In-memory ledger with contract-equivalent behavior.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::config::LedgerConfig;
use crate::domain::{Candidate, Election, NodeStatus};
use crate::ports::{LedgerError, LedgerQuery, TransactionBuilder, UnsignedTransaction};

struct ElectionRecord {
    election: Election,
    candidates: Vec<Candidate>,
    eligible: HashSet<String>,
    voted: HashSet<String>,
}

#[derive(Default)]
struct LedgerState {
    elections: Vec<ElectionRecord>,
    admins: HashSet<String>,
    nonces: HashMap<String, u64>,
}

/// In-process stand-in for the deployed voting contract.
///
/// Mirrors the contract's quirks deliberately: election ids are 1-based and
/// dense, and a results read on an election with no candidates fails with
/// [`LedgerError::EmptyCollection`] the way the contract faults on an empty
/// list.
pub struct InMemoryLedger {
    contract_address: String,
    gas_limit: u64,
    gas_price_wei: u128,
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            contract_address: config.contract_address.clone(),
            gas_limit: config.gas_limit,
            gas_price_wei: config.gas_price_wei(),
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Grant the admin role directly (seeding, not a prepared transaction).
    pub async fn seed_admin(&self, address: &str) {
        self.state
            .write()
            .await
            .admins
            .insert(address.to_lowercase());
    }

    /// Create an election directly. Returns its id.
    pub async fn seed_election(
        &self,
        name: &str,
        description: &str,
        start_time: i64,
        end_time: i64,
        creator: &str,
    ) -> u64 {
        let mut state = self.state.write().await;
        let id = state.elections.len() as u64 + 1;
        state.elections.push(ElectionRecord {
            election: Election {
                id,
                name: name.to_string(),
                description: description.to_string(),
                start_time,
                end_time,
                is_active: true,
                creator: creator.to_string(),
                total_votes: 0,
                candidate_count: 0,
                status: None,
            },
            candidates: Vec::new(),
            eligible: HashSet::new(),
            voted: HashSet::new(),
        });
        id
    }

    /// Add a candidate directly. Returns its id within the election.
    pub async fn seed_candidate(
        &self,
        election_id: u64,
        name: &str,
        party: &str,
        image_url: &str,
    ) -> Result<u64, LedgerError> {
        let mut state = self.state.write().await;
        let record = record_mut(&mut state, election_id)?;
        let id = record.candidates.len() as u64 + 1;
        record.candidates.push(Candidate {
            id,
            name: name.to_string(),
            party: party.to_string(),
            vote_count: 0,
            image_url: image_url.to_string(),
        });
        record.election.candidate_count = record.candidates.len() as u64;
        Ok(id)
    }

    /// Register a voter directly.
    pub async fn seed_voter(&self, election_id: u64, address: &str) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        let record = record_mut(&mut state, election_id)?;
        record.eligible.insert(address.to_lowercase());
        Ok(())
    }

    /// Record a cast vote directly (what a mined vote transaction would do).
    /// Advances the voter's transaction count, so the next prepared
    /// transaction for them carries the following nonce.
    pub async fn record_vote(
        &self,
        election_id: u64,
        candidate_id: u64,
        voter: &str,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        let voter = voter.to_lowercase();
        {
            let record = record_mut(&mut state, election_id)?;
            if !record.eligible.contains(&voter) {
                return Err(LedgerError::Reverted("Voter not eligible".to_string()));
            }
            if record.voted.contains(&voter) {
                return Err(LedgerError::Reverted("Voter already voted".to_string()));
            }
            let candidate = record
                .candidates
                .iter_mut()
                .find(|c| c.id == candidate_id)
                .ok_or_else(|| LedgerError::Reverted("Candidate does not exist".to_string()))?;
            record.voted.insert(voter.clone());
            candidate.vote_count += 1;
            record.election.total_votes += 1;
        }
        *state.nonces.entry(voter).or_insert(0) += 1;
        Ok(())
    }

    async fn prepare(
        &self,
        sender: &str,
        method: &str,
        args: &[String],
    ) -> UnsignedTransaction {
        let nonce = {
            let state = self.state.read().await;
            state.nonces.get(&sender.to_lowercase()).copied().unwrap_or(0)
        };
        UnsignedTransaction {
            from: sender.to_string(),
            to: self.contract_address.clone(),
            nonce,
            gas: self.gas_limit,
            gas_price: self.gas_price_wei,
            value: 0,
            data: encode_call(method, args),
        }
    }
}

fn record_mut(state: &mut LedgerState, election_id: u64) -> Result<&mut ElectionRecord, LedgerError> {
    if election_id == 0 || election_id as usize > state.elections.len() {
        return Err(LedgerError::Reverted("Election does not exist".to_string()));
    }
    Ok(&mut state.elections[election_id as usize - 1])
}

fn record(state: &LedgerState, election_id: u64) -> Result<&ElectionRecord, LedgerError> {
    if election_id == 0 || election_id as usize > state.elections.len() {
        return Err(LedgerError::Reverted("Election does not exist".to_string()));
    }
    Ok(&state.elections[election_id as usize - 1])
}

/// Readable pseudo-calldata. The in-process ledger has no ABI; the encoding
/// exists so prepared transactions carry an inspectable payload with the
/// real wire shape.
fn encode_call(method: &str, args: &[String]) -> String {
    let payload = format!("{method}({})", args.join(","));
    let mut data = String::with_capacity(2 + payload.len() * 2);
    data.push_str("0x");
    for byte in payload.as_bytes() {
        data.push_str(&format!("{byte:02x}"));
    }
    data
}

fn status_label(election: &Election, now: i64) -> String {
    if !election.is_active {
        "Inactive".to_string()
    } else if now < election.start_time {
        "Pending".to_string()
    } else if now <= election.end_time {
        "Active".to_string()
    } else {
        "Ended".to_string()
    }
}

#[async_trait]
impl LedgerQuery for InMemoryLedger {
    async fn election_count(&self) -> Result<u64, LedgerError> {
        Ok(self.state.read().await.elections.len() as u64)
    }

    async fn election(&self, id: u64) -> Result<Election, LedgerError> {
        let state = self.state.read().await;
        Ok(record(&state, id)?.election.clone())
    }

    async fn election_status(&self, id: u64) -> Result<String, LedgerError> {
        let state = self.state.read().await;
        let record = record(&state, id)?;
        Ok(status_label(&record.election, Utc::now().timestamp()))
    }

    async fn active_elections(&self) -> Result<Vec<u64>, LedgerError> {
        let now = Utc::now().timestamp();
        let state = self.state.read().await;
        Ok(state
            .elections
            .iter()
            .filter(|r| status_label(&r.election, now) == "Active")
            .map(|r| r.election.id)
            .collect())
    }

    async fn candidates(&self, election_id: u64) -> Result<Vec<Candidate>, LedgerError> {
        let state = self.state.read().await;
        Ok(record(&state, election_id)?.candidates.clone())
    }

    async fn election_results(&self, election_id: u64) -> Result<Vec<Candidate>, LedgerError> {
        let state = self.state.read().await;
        let record = record(&state, election_id)?;
        // The deployed contract faults on reading an empty list; keep that
        // observable behavior so the classification path stays honest.
        if record.candidates.is_empty() {
            return Err(LedgerError::EmptyCollection);
        }
        Ok(record.candidates.clone())
    }

    async fn is_admin(&self, address: &str) -> Result<bool, LedgerError> {
        Ok(self
            .state
            .read()
            .await
            .admins
            .contains(&address.to_lowercase()))
    }

    async fn is_voter_eligible(
        &self,
        election_id: u64,
        address: &str,
    ) -> Result<bool, LedgerError> {
        let state = self.state.read().await;
        Ok(record(&state, election_id)?
            .eligible
            .contains(&address.to_lowercase()))
    }

    async fn has_voter_voted(
        &self,
        election_id: u64,
        address: &str,
    ) -> Result<bool, LedgerError> {
        let state = self.state.read().await;
        Ok(record(&state, election_id)?
            .voted
            .contains(&address.to_lowercase()))
    }

    async fn node_status(&self) -> NodeStatus {
        NodeStatus {
            connected: true,
            chain_id: Some(1337),
            block_number: Some(self.state.read().await.elections.len() as u64),
        }
    }
}

#[async_trait]
impl TransactionBuilder for InMemoryLedger {
    async fn create_election(
        &self,
        sender: &str,
        name: &str,
        description: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<UnsignedTransaction, LedgerError> {
        Ok(self
            .prepare(
                sender,
                "createElection",
                &[
                    name.to_string(),
                    description.to_string(),
                    start_time.to_string(),
                    end_time.to_string(),
                ],
            )
            .await)
    }

    async fn add_candidate(
        &self,
        sender: &str,
        election_id: u64,
        name: &str,
        party: &str,
        image_url: &str,
    ) -> Result<UnsignedTransaction, LedgerError> {
        Ok(self
            .prepare(
                sender,
                "addCandidate",
                &[
                    election_id.to_string(),
                    name.to_string(),
                    party.to_string(),
                    image_url.to_string(),
                ],
            )
            .await)
    }

    async fn register_voters(
        &self,
        sender: &str,
        election_id: u64,
        voters: &[String],
    ) -> Result<UnsignedTransaction, LedgerError> {
        let mut args = vec![election_id.to_string()];
        args.extend(voters.iter().cloned());
        Ok(self.prepare(sender, "registerMultipleVoters", &args).await)
    }

    async fn cast_vote(
        &self,
        sender: &str,
        election_id: u64,
        candidate_id: u64,
    ) -> Result<UnsignedTransaction, LedgerError> {
        Ok(self
            .prepare(
                sender,
                "vote",
                &[election_id.to_string(), candidate_id.to_string()],
            )
            .await)
    }

    async fn add_admin(
        &self,
        sender: &str,
        admin: &str,
    ) -> Result<UnsignedTransaction, LedgerError> {
        Ok(self.prepare(sender, "addAdmin", &[admin.to_string()]).await)
    }
}
