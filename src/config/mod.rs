//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `VOTEWATCH`
//! prefix and `__` (double underscore) separates nested sections.
//!
//! # Example
//!
//! ```no_run
//! use votewatch::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod ledger;
mod results;
mod server;

pub use error::{ConfigError, ValidationError};
pub use ledger::{LedgerConfig, LedgerMode};
pub use results::ResultsConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Ledger collaborator configuration (mode, contract address, gas)
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Live results feed configuration (poll cadences, fan-out bound)
    #[serde(default)]
    pub results: ResultsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present (development), then reads variables
    /// with the `VOTEWATCH` prefix:
    ///
    /// - `VOTEWATCH__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `VOTEWATCH__LEDGER__MODE=disabled` -> `ledger.mode = Disabled`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VOTEWATCH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ledger.validate()?;
        self.results.validate()?;
        Ok(())
    }

    /// Check if running in production environment.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
