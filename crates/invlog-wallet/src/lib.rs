/*!
 * Wallet capability bridge, network guard and connection state machine
 * for the inventory rental client.
 *
 * The signing wallet is always injected as an explicit `WalletBridge`
 * dependency so it can be substituted with a test double; nothing here
 * reaches for ambient global state.
 */

pub mod agent;
pub mod bridge;
pub mod guard;
pub mod session;

pub use agent::AgentWallet;
pub use bridge::WalletBridge;
pub use guard::NetworkGuard;
pub use session::{Diagnostics, SessionManager, SessionState, TransactionSigner, WalletSession};
