/*!
 * Typed gateway over the inventory contract's method stubs.
 *
 * Reads are simulations and never sign anything; writes are split into
 * assemble and submit so the pipeline can interpose validation and the
 * wallet signature between the two.
 */

pub mod config;
pub mod gateway;
pub mod rpc;

pub use config::{ConfigError, NetworkConfig};
pub use gateway::ContractGateway;
pub use rpc::{ContractRpc, HttpContractRpc};
