use tracing::debug;

use invlog_types::{NetworkDescriptor, NetworkMismatch};

/// Verifies that the wallet's active network matches the deployment
/// target before any signing is allowed.
pub struct NetworkGuard;

impl NetworkGuard {
    /// Compare the configured network against the wallet-reported one.
    ///
    /// A wallet that reports no network details at all passes and its own
    /// default applies. A reported passphrase that differs from the
    /// expected one never passes.
    pub fn verify(
        expected: &NetworkDescriptor,
        actual: Option<&NetworkDescriptor>,
    ) -> Result<(), NetworkMismatch> {
        match actual {
            Some(reported) if reported.passphrase != expected.passphrase => Err(NetworkMismatch {
                got: reported.display_name().to_string(),
                want: expected.display_name().to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                debug!("wallet reported no network details, deferring to its default");
                Ok(())
            }
        }
    }
}
