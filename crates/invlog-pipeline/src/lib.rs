/*!
 * Submission pipeline for the inventory rental client.
 *
 * A state-changing call runs through a fixed sequence: precondition
 * rules against freshly simulated state, session check, assembly,
 * wallet signature, submission. Whatever step fails, the caller gets
 * one normalized error tagged with the contract method.
 *
 * ```rust,no_run
 * use std::sync::Arc;
 *
 * use invlog_gateway::{ContractGateway, HttpContractRpc, NetworkConfig};
 * use invlog_pipeline::SubmissionPipeline;
 * use invlog_types::IssueRequest;
 * use invlog_wallet::{AgentWallet, SessionManager};
 *
 * async fn example() -> Result<(), Box<dyn std::error::Error>> {
 *     let config = NetworkConfig::testnet();
 *     let session = Arc::new(SessionManager::new(
 *         Arc::new(AgentWallet::new("http://localhost:7070")),
 *         config.expected_network(),
 *     ));
 *     let gateway = Arc::new(ContractGateway::new(Arc::new(HttpContractRpc::new(&config))));
 *
 *     session.connect().await?;
 *     let pipeline = SubmissionPipeline::new(session, gateway);
 *     let confirmed = pipeline
 *         .issue_item(&IssueRequest {
 *             renter: "G...".to_string(),
 *             item_id: 3,
 *             rental_days: 5,
 *             deposit_amount: 50_000_000,
 *         })
 *         .await?;
 *     println!("{}", confirmed.value);
 *     Ok(())
 * }
 * ```
 */

pub mod pipeline;
pub mod validate;

pub use pipeline::{NormalizedResult, SubmissionPipeline};
