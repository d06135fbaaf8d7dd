use serde::{Deserialize, Serialize};

/// Identity of a ledger network, as configured for a deployment or as
/// reported by the wallet.
///
/// The passphrase is the authoritative discriminator. Once read from the
/// wallet for a connection attempt the descriptor is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// Network passphrase, e.g. "Test SDF Network ; September 2015"
    pub passphrase: String,

    /// Optional human-readable network name, e.g. "TESTNET"
    pub label: Option<String>,
}

impl NetworkDescriptor {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Name used when reporting this network to a user: the label when
    /// present, the passphrase otherwise.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.passphrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_the_label() {
        let net = NetworkDescriptor::new("Test SDF Network ; September 2015");
        assert_eq!(net.display_name(), "Test SDF Network ; September 2015");

        let net = net.with_label("TESTNET");
        assert_eq!(net.display_name(), "TESTNET");
    }
}
