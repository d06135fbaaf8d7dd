use serde::{Deserialize, Serialize};
use thiserror::Error;

use invlog_types::{identity, NetworkDescriptor};

/// Passphrase of the public test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Inventory contract deployed on the test network.
pub const TESTNET_CONTRACT_ID: &str =
    "CAKVDQJ4OEC6KXVDUWIACJV37V6MY3PNASD7V6ASCRVNIET2D5HF5UES";

/// Default RPC endpoint for the test network.
pub const TESTNET_RPC_URL: &str = "https://soroban-testnet.stellar.org";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid contract identifier: {0}")]
    InvalidContractId(String),
}

/// Static network target for one deployment.
///
/// Exactly one of these is active per process; it is supplied as
/// configuration, never discovered at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Human-readable network name
    pub label: String,

    /// Network passphrase the wallet must match
    pub passphrase: String,

    /// StrKey contract identifier (C...)
    pub contract_id: String,

    /// Contract RPC endpoint
    pub rpc_url: String,
}

impl NetworkConfig {
    /// Test-network configuration with the deployed inventory contract.
    pub fn testnet() -> Self {
        Self {
            label: "testnet".to_string(),
            passphrase: TESTNET_PASSPHRASE.to_string(),
            contract_id: TESTNET_CONTRACT_ID.to_string(),
            rpc_url: TESTNET_RPC_URL.to_string(),
        }
    }

    /// Check the contract identifier shape before any call is attempted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !identity::is_contract_id(&self.contract_id) {
            return Err(ConfigError::InvalidContractId(self.contract_id.clone()));
        }
        Ok(())
    }

    /// Descriptor of the network this configuration targets.
    pub fn expected_network(&self) -> NetworkDescriptor {
        NetworkDescriptor::new(&self.passphrase).with_label(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testnet_defaults_are_well_formed() {
        let config = NetworkConfig::testnet();
        config.validate().unwrap();

        let network = config.expected_network();
        assert_eq!(network.passphrase, TESTNET_PASSPHRASE);
        assert_eq!(network.display_name(), "testnet");
    }

    #[test]
    fn malformed_contract_ids_are_refused() {
        let config = NetworkConfig {
            contract_id: "not-a-contract".to_string(),
            ..NetworkConfig::testnet()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvalidContractId("not-a-contract".to_string())
        );
    }
}
