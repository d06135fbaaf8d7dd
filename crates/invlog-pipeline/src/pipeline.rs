use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use invlog_gateway::ContractGateway;
use invlog_types::{
    AddItemRequest, AvailabilityRequest, IssueRequest, PendingCall, PipelineError,
    PipelineErrorKind, ReturnRequest, ValidationError,
};
use invlog_wallet::SessionManager;

use crate::validate;

/// Ledger-confirmed outcome of one state-changing call, tagged with the
/// method that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedResult {
    pub method: String,
    pub value: Value,
}

/// Drives a state-changing call through validation, assembly, signing
/// and submission.
///
/// The pipeline is the single aggregation point for failures: whatever
/// step breaks, the caller sees one `PipelineError` carrying the method
/// name. Two concurrent executions are not coordinated with each other;
/// nothing here mutates local state beyond the session's own machine.
pub struct SubmissionPipeline {
    session: Arc<SessionManager>,
    gateway: Arc<ContractGateway>,
}

impl SubmissionPipeline {
    pub fn new(session: Arc<SessionManager>, gateway: Arc<ContractGateway>) -> Self {
        Self { session, gateway }
    }

    /// Execute one write call end to end.
    ///
    /// The order is fixed: precondition rules (when the method carries
    /// any), session check, assemble, sign, submit. A rejected rule or a
    /// disconnected session stops the flow before anything is assembled.
    pub async fn execute(
        &self,
        call: PendingCall,
        requires_validation: bool,
    ) -> Result<NormalizedResult, PipelineError> {
        let method = call.method.clone();

        if requires_validation {
            self.validate(&call)
                .await
                .map_err(|kind| PipelineError::new(&method, kind))?;
        }

        let signer = self
            .session
            .signer()
            .await
            .map_err(|e| PipelineError::new(&method, PipelineErrorKind::Session(e)))?;

        let unsigned = self
            .gateway
            .assemble(&call)
            .await
            .map_err(|e| PipelineError::new(&method, PipelineErrorKind::Call(e)))?;

        let signed = signer
            .sign(&unsigned)
            .await
            .map_err(|e| PipelineError::new(&method, PipelineErrorKind::Signing(e)))?;

        let value = self
            .gateway
            .submit(&signed)
            .await
            .map_err(|e| PipelineError::new(&method, PipelineErrorKind::Call(e)))?;

        info!(method = %method, "submission confirmed");
        Ok(NormalizedResult { method, value })
    }

    /// Run the rule set registered for the method, fetching whatever
    /// snapshots the rules need. Methods without rules pass through.
    async fn validate(&self, call: &PendingCall) -> Result<(), PipelineErrorKind> {
        match call.method.as_str() {
            "issue_item" => {
                let req: IssueRequest = decode_args(call)?;
                validate::check_issue_request(&req).map_err(PipelineErrorKind::Validation)?;
                debug!(item_id = req.item_id, "fetching item snapshot for validation");
                let item = self
                    .gateway
                    .get_item(req.item_id)
                    .await
                    .map_err(PipelineErrorKind::Call)?;
                validate::check_issue_against_item(&req, item.as_ref())
                    .map_err(PipelineErrorKind::Validation)?;
            }
            "return_item" => {
                let req: ReturnRequest = decode_args(call)?;
                validate::check_return_request(&req).map_err(PipelineErrorKind::Validation)?;
                debug!(rental_id = req.rental_id, "fetching rental snapshot for validation");
                let rental = self
                    .gateway
                    .get_rental(req.rental_id)
                    .await
                    .map_err(PipelineErrorKind::Call)?;
                validate::check_return_against_rental(&req, rental.as_ref())
                    .map_err(PipelineErrorKind::Validation)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// List a new item. No client-side rule set; the contract authorizes
    /// the owner itself.
    pub async fn add_item(&self, req: &AddItemRequest) -> Result<NormalizedResult, PipelineError> {
        self.execute(write_call("add_item", req)?, false).await
    }

    /// Rent an item. Runs the full issuance rule set against a fresh
    /// item snapshot before anything is signed.
    pub async fn issue_item(&self, req: &IssueRequest) -> Result<NormalizedResult, PipelineError> {
        self.execute(write_call("issue_item", req)?, true).await
    }

    /// Return a rented item.
    pub async fn return_item(
        &self,
        req: &ReturnRequest,
    ) -> Result<NormalizedResult, PipelineError> {
        self.execute(write_call("return_item", req)?, true).await
    }

    /// Owner-only availability toggle.
    pub async fn update_item_availability(
        &self,
        req: &AvailabilityRequest,
    ) -> Result<NormalizedResult, PipelineError> {
        self.execute(write_call("update_item_availability", req)?, false)
            .await
    }
}

fn write_call<T: Serialize>(method: &str, req: &T) -> Result<PendingCall, PipelineError> {
    let args = serde_json::to_value(req).map_err(|e| {
        PipelineError::new(
            method,
            PipelineErrorKind::Validation(ValidationError::InvalidQuantity(format!(
                "unencodable request: {e}"
            ))),
        )
    })?;
    Ok(PendingCall::write(method, args))
}

fn decode_args<T: serde::de::DeserializeOwned>(call: &PendingCall) -> Result<T, PipelineErrorKind> {
    serde_json::from_value(call.args.clone()).map_err(|e| {
        PipelineErrorKind::Validation(ValidationError::InvalidQuantity(format!(
            "malformed {} arguments: {e}",
            call.method
        )))
    })
}
