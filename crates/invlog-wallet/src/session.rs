use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use invlog_types::{
    ConnectionError, Identity, NetworkDescriptor, SessionError, SignedTx, SigningError, UnsignedTx,
};

use crate::bridge::WalletBridge;
use crate::guard::NetworkGuard;

/// Connection lifecycle of the wallet session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

/// Snapshot of the live wallet session.
///
/// One instance exists per client process. It is created disconnected,
/// only the session manager's transitions mutate it, and it is never
/// persisted.
#[derive(Debug, Clone)]
pub struct WalletSession {
    pub state: SessionState,
    pub address: Option<Identity>,
    pub network: Option<NetworkDescriptor>,
    pub last_error: Option<SessionError>,
}

impl WalletSession {
    fn new() -> Self {
        Self {
            state: SessionState::Disconnected,
            address: None,
            network: None,
            last_error: None,
        }
    }

    /// Status line matching what the UI shows next to the connect button.
    pub fn status_line(&self) -> String {
        match (&self.state, &self.address) {
            (SessionState::Connected, Some(address)) => {
                format!("wallet {} connected", address.short())
            }
            (SessionState::Connecting, _) => "wallet connecting".to_string(),
            (SessionState::Failed, _) => "wallet connect failed".to_string(),
            _ => "wallet not connected".to_string(),
        }
    }
}

/// Environment snapshot captured alongside a connection attempt.
///
/// Side-channel observability only; nothing in the pipeline reads it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    /// Client crate name and version
    pub client: String,

    /// Host platform
    pub platform: String,

    /// Network details the wallet reported, if any
    pub wallet_network: Option<NetworkDescriptor>,

    pub captured_at: DateTime<Utc>,
}

impl Diagnostics {
    fn capture(wallet_network: Option<NetworkDescriptor>) -> Self {
        Self {
            client: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            platform: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
            wallet_network,
            captured_at: Utc::now(),
        }
    }
}

struct Inner {
    session: WalletSession,
    diagnostics: Option<Diagnostics>,
}

/// Owns the connection state machine and hands out the signing
/// capability.
///
/// States move Disconnected -> Connecting -> {Connected | Failed}; a
/// connected or failed session may re-enter Connecting on a new attempt,
/// there is no terminal state. The lock is held across a whole attempt so
/// concurrent `connect` calls serialize instead of interleaving.
pub struct SessionManager {
    bridge: Arc<dyn WalletBridge>,
    expected: NetworkDescriptor,
    inner: Mutex<Inner>,
}

impl SessionManager {
    pub fn new(bridge: Arc<dyn WalletBridge>, expected: NetworkDescriptor) -> Self {
        Self {
            bridge,
            expected,
            inner: Mutex::new(Inner {
                session: WalletSession::new(),
                diagnostics: None,
            }),
        }
    }

    /// Network this deployment targets.
    pub fn expected_network(&self) -> &NetworkDescriptor {
        &self.expected
    }

    /// Run one connection attempt against the wallet.
    ///
    /// Availability, network identity and account access are checked in
    /// that order; the first failure moves the session to Failed and is
    /// returned. A mismatched network never reaches the identity request.
    pub async fn connect(&self) -> Result<Identity, SessionError> {
        let mut inner = self.inner.lock().await;
        inner.session.state = SessionState::Connecting;
        inner.session.last_error = None;
        debug!("starting wallet connection attempt");

        if !self.bridge.is_available().await {
            return Err(Self::fail(&mut inner, ConnectionError::Unavailable.into()));
        }

        let reported = match self.bridge.current_network().await {
            Ok(reported) => reported,
            Err(e) => return Err(Self::fail(&mut inner, e.into())),
        };
        inner.diagnostics = Some(Diagnostics::capture(reported.clone()));

        if let Err(mismatch) = NetworkGuard::verify(&self.expected, reported.as_ref()) {
            return Err(Self::fail(&mut inner, mismatch.into()));
        }

        let address = match self.bridge.request_identity().await {
            Ok(address) => address,
            Err(e) => return Err(Self::fail(&mut inner, e.into())),
        };

        inner.session.state = SessionState::Connected;
        inner.session.address = Some(address.clone());
        inner.session.network = Some(reported.unwrap_or_else(|| self.expected.clone()));
        info!(address = %address.short(), "wallet connected");
        Ok(address)
    }

    fn fail(inner: &mut Inner, error: SessionError) -> SessionError {
        warn!(%error, "wallet connection attempt failed");
        inner.session.state = SessionState::Failed;
        inner.session.address = None;
        inner.session.network = None;
        inner.session.last_error = Some(error.clone());
        error
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.session.state
    }

    /// Current session snapshot.
    pub async fn session(&self) -> WalletSession {
        self.inner.lock().await.session.clone()
    }

    pub async fn diagnostics(&self) -> Option<Diagnostics> {
        self.inner.lock().await.diagnostics.clone()
    }

    /// Signing capability bound to the connected identity and the
    /// confirmed network.
    ///
    /// Fails while not connected; callers must not cache the signer
    /// across reconnects.
    pub async fn signer(&self) -> Result<TransactionSigner, SessionError> {
        let inner = self.inner.lock().await;
        match (&inner.session.state, &inner.session.address) {
            (SessionState::Connected, Some(address)) => Ok(TransactionSigner {
                bridge: Arc::clone(&self.bridge),
                address: address.clone(),
                network: self.expected.clone(),
            }),
            _ => Err(SessionError::NotConnected),
        }
    }
}

/// Signing function produced by a successful connection.
///
/// Carries the identity and the network it was bound to, and is passed
/// into the pipeline explicitly instead of being patched onto a shared
/// client object.
#[derive(Clone)]
pub struct TransactionSigner {
    bridge: Arc<dyn WalletBridge>,
    address: Identity,
    network: NetworkDescriptor,
}

impl TransactionSigner {
    pub fn address(&self) -> &Identity {
        &self.address
    }

    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    pub async fn sign(&self, tx: &UnsignedTx) -> Result<SignedTx, SigningError> {
        debug!(address = %self.address.short(), "requesting wallet signature");
        self.bridge.sign(tx, &self.network).await
    }
}

impl std::fmt::Debug for TransactionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionSigner")
            .field("address", &self.address)
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}
