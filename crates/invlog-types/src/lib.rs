/*!
 * Inventory Rental Client Types
 *
 * Shared data model, identifiers, exact-integer amounts and the error
 * taxonomy used across the wallet, gateway and pipeline crates.
 */

pub mod amount;
pub mod call;
pub mod error;
pub mod identity;
pub mod model;
pub mod network;

pub use call::{CallKind, PendingCall, SignedTx, UnsignedTx};
pub use error::{
    CallError, ConnectionError, NetworkMismatch, PipelineError, PipelineErrorKind, SessionError,
    SigningError, ValidationError,
};
pub use identity::Identity;
pub use model::{
    AddItemRequest, AvailabilityRequest, InventoryItem, IssueRequest, RentalRecord, ReturnRequest,
};
pub use network::NetworkDescriptor;
