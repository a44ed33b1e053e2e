//! Live results feed configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Cadences and bounds for the live result distribution subsystem.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsConfig {
    /// Per-subscriber poll period in milliseconds
    #[serde(default = "default_session_poll_ms")]
    pub session_poll_ms: u64,

    /// Sleep between global broadcast cycles in seconds
    #[serde(default = "default_broadcast_interval_secs")]
    pub broadcast_interval_secs: u64,

    /// Longer sleep after a failed cycle or while the ledger is not loaded
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,

    /// Upper bound on elections addressed per broadcast cycle
    #[serde(default = "default_max_broadcast_elections")]
    pub max_broadcast_elections: u64,
}

impl ResultsConfig {
    pub fn session_poll_interval(&self) -> Duration {
        Duration::from_millis(self.session_poll_ms)
    }

    pub fn broadcast_interval(&self) -> Duration {
        Duration::from_secs(self.broadcast_interval_secs)
    }

    pub fn backoff_interval(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }

    /// Validate results configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_poll_ms == 0 || self.broadcast_interval_secs == 0 {
            return Err(ValidationError::InvalidPollInterval);
        }
        if self.max_broadcast_elections == 0 {
            return Err(ValidationError::InvalidBroadcastBound);
        }
        Ok(())
    }
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            session_poll_ms: default_session_poll_ms(),
            broadcast_interval_secs: default_broadcast_interval_secs(),
            backoff_secs: default_backoff_secs(),
            max_broadcast_elections: default_max_broadcast_elections(),
        }
    }
}

fn default_session_poll_ms() -> u64 {
    2_500
}

fn default_broadcast_interval_secs() -> u64 {
    3
}

fn default_backoff_secs() -> u64 {
    5
}

fn default_max_broadcast_elections() -> u64 {
    10
}
