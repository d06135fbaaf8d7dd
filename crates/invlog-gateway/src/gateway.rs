use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use invlog_types::{
    CallError, Identity, InventoryItem, PendingCall, RentalRecord, SignedTx, UnsignedTx,
};

use crate::rpc::ContractRpc;

/// Typed façade over the contract-method stubs.
///
/// Reads are simulations: repeatable, safe to run concurrently, free of
/// side effects, and never signed. Writes go through `assemble` and
/// `submit` so the pipeline can interpose validation and the wallet
/// signature between the two.
pub struct ContractGateway {
    rpc: Arc<dyn ContractRpc>,
}

impl ContractGateway {
    pub fn new(rpc: Arc<dyn ContractRpc>) -> Self {
        Self { rpc }
    }

    /// Simulate a read-only call and return its raw result value.
    pub async fn read(&self, method: &str, args: Value) -> Result<Value, CallError> {
        self.rpc.simulate(&PendingCall::read(method, args)).await
    }

    /// Build the unsigned envelope for a state-changing call.
    pub async fn assemble(&self, call: &PendingCall) -> Result<UnsignedTx, CallError> {
        self.rpc.prepare(call).await
    }

    /// Submit a signed envelope and return the confirmed result value.
    pub async fn submit(&self, tx: &SignedTx) -> Result<Value, CallError> {
        self.rpc.send(tx).await
    }

    pub async fn get_item(&self, item_id: u64) -> Result<Option<InventoryItem>, CallError> {
        decode(self.read("get_item", json!({ "item_id": item_id })).await?)
    }

    pub async fn get_rental(&self, rental_id: u64) -> Result<Option<RentalRecord>, CallError> {
        decode(
            self.read("get_rental", json!({ "rental_id": rental_id }))
                .await?,
        )
    }

    pub async fn get_item_count(&self) -> Result<u64, CallError> {
        decode(self.read("get_item_count", json!({})).await?)
    }

    pub async fn get_rental_count(&self) -> Result<u64, CallError> {
        decode(self.read("get_rental_count", json!({})).await?)
    }

    /// Rental ids recorded against an item.
    pub async fn get_item_rentals(&self, item_id: u64) -> Result<Vec<u64>, CallError> {
        decode(
            self.read("get_item_rentals", json!({ "item_id": item_id }))
                .await?,
        )
    }

    /// Rental ids recorded against a user.
    pub async fn get_user_rentals(&self, user: &Identity) -> Result<Vec<u64>, CallError> {
        decode(self.read("get_user_rentals", json!({ "user": user })).await?)
    }

    pub async fn is_overdue(&self, rental_id: u64) -> Result<bool, CallError> {
        decode(
            self.read("is_overdue", json!({ "rental_id": rental_id }))
                .await?,
        )
    }
}

/// Decode a simulated result into its read model. A payload that does not
/// fit the model is a transport-level failure, not a contract one.
fn decode<T: DeserializeOwned>(value: Value) -> Result<T, CallError> {
    serde_json::from_value(value)
        .map_err(|e| CallError::Transport(format!("invalid result payload: {e}")))
}
