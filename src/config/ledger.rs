//! Ledger collaborator configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which ledger collaborator the service runs against.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LedgerMode {
    /// In-process ledger with contract-equivalent behavior (development).
    #[default]
    Memory,
    /// No ledger collaborator; the feed degrades to idle polling.
    Disabled,
}

/// Ledger configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Collaborator selection
    #[serde(default)]
    pub mode: LedgerMode,

    /// Deployed voting contract address
    #[serde(default = "default_contract_address")]
    pub contract_address: String,

    /// Gas limit applied to prepared transactions
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,

    /// Gas price in gwei applied to prepared transactions
    #[serde(default = "default_gas_price_gwei")]
    pub gas_price_gwei: u64,
}

impl LedgerConfig {
    /// Gas price in wei, as carried on prepared transactions.
    pub fn gas_price_wei(&self) -> u128 {
        self.gas_price_gwei as u128 * 1_000_000_000
    }

    /// Validate ledger configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.gas_limit == 0 {
            return Err(ValidationError::InvalidGasLimit);
        }
        if self.gas_price_gwei == 0 {
            return Err(ValidationError::InvalidGasPrice);
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            mode: LedgerMode::default(),
            contract_address: default_contract_address(),
            gas_limit: default_gas_limit(),
            gas_price_gwei: default_gas_price_gwei(),
        }
    }
}

fn default_contract_address() -> String {
    "0x0000000000000000000000000000000000000000".to_string()
}

fn default_gas_limit() -> u64 {
    3_000_000
}

fn default_gas_price_gwei() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.mode, LedgerMode::Memory);
        assert_eq!(config.gas_limit, 3_000_000);
        assert_eq!(config.gas_price_gwei, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gas_price_wei_conversion() {
        let config = LedgerConfig::default();
        assert_eq!(config.gas_price_wei(), 20_000_000_000);
    }

    #[test]
    fn test_validation_rejects_zero_gas() {
        let config = LedgerConfig {
            gas_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LedgerConfig {
            gas_price_gwei: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
