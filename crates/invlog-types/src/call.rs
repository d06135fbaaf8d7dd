use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a contract call only simulates or changes ledger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallKind {
    Read,
    Write,
}

/// One in-flight contract invocation.
///
/// Exists only for the duration of a single pipeline execution and is
/// never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingCall {
    /// Contract method name, e.g. "issue_item"
    pub method: String,

    /// Method arguments as the stub layer expects them
    pub args: Value,

    /// Read or write tag
    pub kind: CallKind,
}

impl PendingCall {
    pub fn read(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
            kind: CallKind::Read,
        }
    }

    pub fn write(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
            kind: CallKind::Write,
        }
    }
}

/// Unsigned transaction envelope produced by assembling a state-changing
/// call. Opaque base64 text as far as this client is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTx(String);

impl UnsignedTx {
    pub fn new(envelope: impl Into<String>) -> Self {
        Self(envelope.into())
    }

    pub fn envelope(&self) -> &str {
        &self.0
    }
}

/// Signed transaction envelope returned by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTx(String);

impl SignedTx {
    pub fn new(envelope: impl Into<String>) -> Self {
        Self(envelope.into())
    }

    pub fn envelope(&self) -> &str {
        &self.0
    }
}
