use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use invlog_types::{ConnectionError, Identity, NetworkDescriptor, SignedTx, SigningError, UnsignedTx};

use crate::bridge::WalletBridge;

/// HTTP adapter for an external signing agent.
///
/// The agent plays the role of the browser signing extension: it holds
/// the keys, shows the approval prompts and reports its active network.
/// The agent returns errors in several shapes (a bare string, an object
/// carrying a message); all of them are translated into the typed
/// taxonomy here, at this single adaptation point, so nothing downstream
/// ever inspects a raw agent response.
#[derive(Debug, Clone)]
pub struct AgentWallet {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    connected: bool,
}

#[derive(Debug, Deserialize)]
struct AddressResponse {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NetworkResponse {
    #[serde(default)]
    network: Option<String>,
    #[serde(default, rename = "networkPassphrase")]
    network_passphrase: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(default, rename = "signedTxXdr")]
    signed_tx_xdr: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

impl AgentWallet {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Flatten the agent's error field, which may be a bare string or an
/// object carrying a message, into one printable reason.
fn error_reason(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

fn connection_transport(err: reqwest::Error) -> ConnectionError {
    if err.is_connect() {
        // Nothing is listening where the agent should be
        ConnectionError::Unavailable
    } else {
        ConnectionError::Transport(err.to_string())
    }
}

#[async_trait]
impl WalletBridge for AgentWallet {
    async fn is_available(&self) -> bool {
        // Any failure here reads as "not installed", mirroring the
        // extension availability probe
        match self.client.get(self.url("/status")).send().await {
            Ok(response) => response
                .json::<StatusResponse>()
                .await
                .map(|status| status.connected)
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn request_identity(&self) -> Result<Identity, ConnectionError> {
        let response = self
            .client
            .post(self.url("/access"))
            .send()
            .await
            .map_err(connection_transport)?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
            return Err(ConnectionError::Denied);
        }
        if !status.is_success() {
            return Err(ConnectionError::Transport(format!(
                "HTTP {status} from signing agent"
            )));
        }

        let body: AddressResponse = response
            .json()
            .await
            .map_err(|e| ConnectionError::Transport(e.to_string()))?;

        if let Some(error) = &body.error {
            debug!(reason = %error_reason(error), "wallet access request refused");
            return Err(ConnectionError::Denied);
        }
        let address = body.address.ok_or_else(|| {
            ConnectionError::Transport("signing agent did not return an address".to_string())
        })?;
        Identity::parse(&address)
            .map_err(|e| ConnectionError::Transport(format!("signing agent returned {e}")))
    }

    async fn current_network(&self) -> Result<Option<NetworkDescriptor>, ConnectionError> {
        let response = self
            .client
            .get(self.url("/network"))
            .send()
            .await
            .map_err(connection_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectionError::Transport(format!(
                "HTTP {status} from signing agent"
            )));
        }

        let body: NetworkResponse = response
            .json()
            .await
            .map_err(|e| ConnectionError::Transport(e.to_string()))?;

        if let Some(error) = &body.error {
            return Err(ConnectionError::Transport(error_reason(error)));
        }

        Ok(body.network_passphrase.map(|passphrase| {
            let descriptor = NetworkDescriptor::new(passphrase);
            match body.network {
                Some(label) => descriptor.with_label(label),
                None => descriptor,
            }
        }))
    }

    async fn sign(
        &self,
        tx: &UnsignedTx,
        network: &NetworkDescriptor,
    ) -> Result<SignedTx, SigningError> {
        let response = self
            .client
            .post(self.url("/sign"))
            .json(&json!({
                "transaction": tx.envelope(),
                "networkPassphrase": network.passphrase,
            }))
            .send()
            .await
            .map_err(|e| SigningError::Malformed(format!("signing transport failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(SigningError::Rejected);
        }
        if !status.is_success() {
            return Err(SigningError::Malformed(format!(
                "HTTP {status} from signing agent"
            )));
        }

        let body: SignResponse = response
            .json()
            .await
            .map_err(|e| SigningError::Malformed(e.to_string()))?;

        if let Some(error) = &body.error {
            let reason = error_reason(error);
            let lowered = reason.to_lowercase();
            if lowered.contains("reject") || lowered.contains("declin") {
                return Err(SigningError::Rejected);
            }
            return Err(SigningError::Malformed(reason));
        }

        let envelope = body.signed_tx_xdr.ok_or_else(|| {
            SigningError::Malformed("wallet did not return a signed envelope".to_string())
        })?;
        if envelope.is_empty() || BASE64.decode(&envelope).is_err() {
            return Err(SigningError::Malformed(
                "signed envelope is not valid base64".to_string(),
            ));
        }
        Ok(SignedTx::new(envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TESTNET: &str = "Test SDF Network ; September 2015";

    fn valid_address() -> String {
        format!("G{}", "A".repeat(55))
    }

    #[tokio::test]
    async fn availability_follows_the_status_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());

        let up = server
            .mock("GET", "/status")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"connected": true}"#)
            .create_async()
            .await;
        assert!(wallet.is_available().await);
        up.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_agent_reads_as_unavailable() {
        // Port is valid but nothing is listening there
        let wallet = AgentWallet::new("http://127.0.0.1:9");
        assert!(!wallet.is_available().await);
    }

    #[tokio::test]
    async fn access_returns_the_parsed_identity() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());

        let _m = server
            .mock("POST", "/access")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"address": "{}"}}"#, valid_address()))
            .create_async()
            .await;

        let identity = wallet.request_identity().await.unwrap();
        assert_eq!(identity.as_str(), valid_address());
    }

    #[tokio::test]
    async fn refused_access_maps_to_denied_for_every_error_shape() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());

        // Bare string error
        let string_shape = server
            .mock("POST", "/access")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "User declined access"}"#)
            .create_async()
            .await;
        assert_eq!(
            wallet.request_identity().await.unwrap_err(),
            ConnectionError::Denied
        );
        string_shape.remove_async().await;

        // Object error carrying a message
        let _object_shape = server
            .mock("POST", "/access")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "User declined access", "code": -4}}"#)
            .create_async()
            .await;
        assert_eq!(
            wallet.request_identity().await.unwrap_err(),
            ConnectionError::Denied
        );
    }

    #[tokio::test]
    async fn forbidden_status_maps_to_denied() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());

        let _m = server
            .mock("POST", "/access")
            .with_status(403)
            .create_async()
            .await;
        assert_eq!(
            wallet.request_identity().await.unwrap_err(),
            ConnectionError::Denied
        );
    }

    #[tokio::test]
    async fn garbled_address_is_a_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());

        let _m = server
            .mock("POST", "/access")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"address": "not-an-address"}"#)
            .create_async()
            .await;
        assert!(matches!(
            wallet.request_identity().await.unwrap_err(),
            ConnectionError::Transport(_)
        ));
    }

    #[tokio::test]
    async fn network_details_decode_into_a_descriptor() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());

        let _m = server
            .mock("GET", "/network")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"network": "TESTNET", "networkPassphrase": "{TESTNET}"}}"#
            ))
            .create_async()
            .await;

        let network = wallet.current_network().await.unwrap().unwrap();
        assert_eq!(network.passphrase, TESTNET);
        assert_eq!(network.label.as_deref(), Some("TESTNET"));
    }

    #[tokio::test]
    async fn omitted_network_details_come_back_as_none() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());

        let _m = server
            .mock("GET", "/network")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        assert_eq!(wallet.current_network().await.unwrap(), None);
    }

    #[tokio::test]
    async fn signing_round_trip_checks_the_envelope() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());
        let network = NetworkDescriptor::new(TESTNET);

        let _m = server
            .mock("POST", "/sign")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"signedTxXdr": "AAAAEg=="}"#)
            .create_async()
            .await;

        let signed = wallet
            .sign(&UnsignedTx::new("AAAABg=="), &network)
            .await
            .unwrap();
        assert_eq!(signed.envelope(), "AAAAEg==");
    }

    #[tokio::test]
    async fn declined_signature_maps_to_rejected() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());
        let network = NetworkDescriptor::new(TESTNET);

        let _m = server
            .mock("POST", "/sign")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "Transaction rejected by user"}}"#)
            .create_async()
            .await;

        assert_eq!(
            wallet.sign(&UnsignedTx::new("AAAABg=="), &network).await,
            Err(SigningError::Rejected)
        );
    }

    #[tokio::test]
    async fn missing_or_garbled_envelopes_are_malformed() {
        let mut server = mockito::Server::new_async().await;
        let wallet = AgentWallet::new(server.url());
        let network = NetworkDescriptor::new(TESTNET);

        let missing = server
            .mock("POST", "/sign")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;
        assert!(matches!(
            wallet
                .sign(&UnsignedTx::new("AAAABg=="), &network)
                .await
                .unwrap_err(),
            SigningError::Malformed(_)
        ));
        missing.remove_async().await;

        let _garbled = server
            .mock("POST", "/sign")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"signedTxXdr": "%%% not base64 %%%"}"#)
            .create_async()
            .await;
        assert!(matches!(
            wallet
                .sign(&UnsignedTx::new("AAAABg=="), &network)
                .await
                .unwrap_err(),
            SigningError::Malformed(_)
        ));
    }
}
