use serde_json::Value;
use thiserror::Error;

/// Wallet and session establishment failures.
///
/// All of these leave the session retriable; a new `connect` attempt may
/// succeed after the user installs, unlocks or approves the wallet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The signing wallet is not installed or not enabled
    #[error("Wallet is not available")]
    Unavailable,

    /// The user declined the access request
    #[error("Access to the wallet was denied")]
    Denied,

    /// Network-level failure while talking to the wallet
    #[error("Wallet transport error: {0}")]
    Transport(String),
}

/// The wallet's active network differs from the configured target.
///
/// Fatal to the current attempt only; retriable after the user switches
/// networks in the wallet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Wallet is on a different network: {got} (expected {want})")]
pub struct NetworkMismatch {
    /// Network reported by the wallet
    pub got: String,

    /// Network configured for this deployment
    pub want: String,
}

/// Failures surfaced by the connection state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Network mismatch: {0}")]
    Network(#[from] NetworkMismatch),

    /// A signing operation was requested while the session is not connected
    #[error("Wallet session is not connected")]
    NotConnected,
}

/// Precondition failures. A rejected call is never submitted to the
/// network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid address: {0}")]
    InvalidIdentity(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} is not available")]
    Unavailable(String),

    /// The provided deposit does not cover price times duration
    #[error("Deposit too low, minimum required: {minimum}")]
    InsufficientDeposit { minimum: i128 },
}

/// The wallet declined to sign, or returned something unusable.
///
/// Either way nothing was submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    #[error("Signing was rejected by the wallet")]
    Rejected,

    #[error("Wallet returned an unusable signed payload: {0}")]
    Malformed(String),
}

/// Contract call failures.
///
/// A ledger-reported execution failure carries the contract's own error
/// payload untouched; this client never interprets it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Contract execution failed: {0}")]
    ContractExecution(Value),
}

/// One normalized failure from a pipeline execution, tagged with the
/// contract method that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{method}: {kind}")]
pub struct PipelineError {
    /// Contract method the failure belongs to
    pub method: String,

    /// What actually went wrong
    pub kind: PipelineErrorKind,
}

impl PipelineError {
    pub fn new(method: impl Into<String>, kind: impl Into<PipelineErrorKind>) -> Self {
        Self {
            method: method.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineErrorKind {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Signing failed: {0}")]
    Signing(#[from] SigningError),

    #[error("Call failed: {0}")]
    Call(#[from] CallError),
}
