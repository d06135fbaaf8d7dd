use async_trait::async_trait;

use invlog_types::{ConnectionError, Identity, NetworkDescriptor, SignedTx, SigningError, UnsignedTx};

/// Capability surface of the external signing wallet.
///
/// Every operation may suspend indefinitely on user interaction with the
/// wallet (an approval prompt); no timeout is imposed at this layer.
#[async_trait]
pub trait WalletBridge: Send + Sync {
    /// Probe whether the wallet is installed and enabled.
    async fn is_available(&self) -> bool;

    /// Ask the wallet for its active account address.
    async fn request_identity(&self) -> Result<Identity, ConnectionError>;

    /// Ask the wallet which network it is currently on. `None` means the
    /// wallet did not report network details at all.
    async fn current_network(&self) -> Result<Option<NetworkDescriptor>, ConnectionError>;

    /// Sign an assembled transaction envelope for the given network.
    async fn sign(
        &self,
        tx: &UnsignedTx,
        network: &NetworkDescriptor,
    ) -> Result<SignedTx, SigningError>;
}
