use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use invlog_types::{CallError, PendingCall, SignedTx, UnsignedTx};

use crate::config::NetworkConfig;

/// Contract-method stub layer as this client consumes it.
///
/// Simulation is idempotent and free of side effects; `send` is not and
/// must only ever run on an envelope the wallet has signed.
#[async_trait]
pub trait ContractRpc: Send + Sync {
    /// Execute a read-only simulation and return the decoded result value.
    async fn simulate(&self, call: &PendingCall) -> Result<Value, CallError>;

    /// Build an unsigned transaction envelope for a state-changing call.
    async fn prepare(&self, call: &PendingCall) -> Result<UnsignedTx, CallError>;

    /// Submit a signed envelope and return the ledger-confirmed result.
    async fn send(&self, tx: &SignedTx) -> Result<Value, CallError>;
}

/// HTTP adapter for a contract RPC service.
pub struct HttpContractRpc {
    client: Client,
    base_url: String,
    contract_id: String,
}

impl HttpContractRpc {
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.rpc_url.trim_end_matches('/').to_string(),
            contract_id: config.contract_id.clone(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, CallError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(e) if status.is_success() => return Err(CallError::Transport(e.to_string())),
            Err(_) => return Err(CallError::Transport(format!("HTTP {status}"))),
        };

        // A ledger-reported failure arrives as an error payload; it is
        // passed through untouched, whatever its shape.
        if let Some(error) = payload.get("error") {
            return Err(CallError::ContractExecution(error.clone()));
        }
        if !status.is_success() {
            return Err(CallError::Transport(format!("HTTP {status}: {payload}")));
        }
        Ok(payload)
    }
}

#[async_trait]
impl ContractRpc for HttpContractRpc {
    async fn simulate(&self, call: &PendingCall) -> Result<Value, CallError> {
        debug!(method = %call.method, "simulating contract call");
        let payload = self
            .post(
                "/simulate",
                json!({
                    "contractId": self.contract_id,
                    "method": call.method,
                    "args": call.args,
                }),
            )
            .await?;
        Ok(payload.get("result").cloned().unwrap_or(Value::Null))
    }

    async fn prepare(&self, call: &PendingCall) -> Result<UnsignedTx, CallError> {
        debug!(method = %call.method, "preparing transaction envelope");
        let payload = self
            .post(
                "/prepare",
                json!({
                    "contractId": self.contract_id,
                    "method": call.method,
                    "args": call.args,
                }),
            )
            .await?;
        let envelope = payload
            .get("transaction")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                CallError::Transport("RPC response is missing the transaction envelope".to_string())
            })?;
        Ok(UnsignedTx::new(envelope))
    }

    async fn send(&self, tx: &SignedTx) -> Result<Value, CallError> {
        debug!("submitting signed transaction");
        let payload = self
            .post("/send", json!({ "transaction": tx.envelope() }))
            .await?;
        Ok(payload.get("result").cloned().unwrap_or(Value::Null))
    }
}
