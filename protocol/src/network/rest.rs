//! HTTP client for a node's light-client REST routes.
//!
//! One GET for account state and one POST for broadcasting. Both return the
//! node's JSON body whatever the status code, because nodes report
//! rejected transactions as JSON with a 4xx/5xx status and callers want to
//! see the reason. Only a body that is not JSON at all is an error.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{NodeApi, NodeResponse};
use crate::config::{ChainFlavor, ClientConfig};
use crate::error::{Result, SignerError};
use crate::transaction::SignedEnvelope;

/// `reqwest`-backed [`NodeApi`].
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    flavor: ChainFlavor,
}

impl RestClient {
    /// Build a client for the node described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SignerError::Network(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(http, config.url(), config.chain_flavor()))
    }

    /// Use an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: &str, flavor: ChainFlavor) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            flavor,
        }
    }

    pub fn flavor(&self) -> ChainFlavor {
        self.flavor
    }

    pub fn accounts_url(&self, address: &str) -> String {
        format!("{}{}", self.base_url, self.flavor.accounts_path(address))
    }

    pub fn broadcast_url(&self) -> String {
        format!("{}{}", self.base_url, self.flavor.broadcast_path())
    }

    async fn read_json(response: reqwest::Response) -> Result<NodeResponse> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| SignerError::Network(format!("failed to read response body: {}", e)))?;
        let body: Value = serde_json::from_slice(&body).map_err(|e| {
            SignerError::Serialization(format!("node returned a non-JSON body (HTTP {}): {}", status, e))
        })?;
        Ok(NodeResponse { status, body })
    }
}

#[async_trait]
impl NodeApi for RestClient {
    async fn accounts(&self, address: &str) -> Result<NodeResponse> {
        let url = self.accounts_url(address);
        tracing::debug!(%url, flavor = %self.flavor, "fetching account");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SignerError::Network(format!("account lookup failed: {}", e)))?;
        Self::read_json(response).await
    }

    async fn broadcast(&self, envelope: &SignedEnvelope) -> Result<NodeResponse> {
        let url = self.broadcast_url();
        tracing::debug!(%url, mode = %envelope.mode, "broadcasting transaction");

        let response = self
            .http
            .post(&url)
            .json(envelope)
            .send()
            .await
            .map_err(|e| SignerError::Network(format!("broadcast failed: {}", e)))?;
        let node_response = Self::read_json(response).await?;

        if !node_response.is_success() {
            tracing::warn!(status = node_response.status, "node rejected broadcast");
        }
        Ok(node_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str, chain_id: &str) -> RestClient {
        let config = ClientConfig::builder(url, chain_id).build().unwrap();
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn irishub_routes() {
        let rest = client("http://localhost:1317", "irishub-1");
        assert_eq!(rest.flavor(), ChainFlavor::IrisHub);
        assert_eq!(
            rest.accounts_url("iaa1xyz"),
            "http://localhost:1317/bank/accounts/iaa1xyz"
        );
        assert_eq!(rest.broadcast_url(), "http://localhost:1317/tx/broadcast");
    }

    #[test]
    fn standard_routes() {
        let rest = client("http://localhost:1317/", "cosmoshub-4");
        assert_eq!(rest.flavor(), ChainFlavor::Standard);
        assert_eq!(
            rest.accounts_url("cosmos1xyz"),
            "http://localhost:1317/auth/accounts/cosmos1xyz"
        );
        assert_eq!(rest.broadcast_url(), "http://localhost:1317/txs");
    }

    #[test]
    fn explicit_flavor_wins() {
        let rest = RestClient::with_client(Client::new(), "http://node/", ChainFlavor::IrisHub);
        assert_eq!(rest.broadcast_url(), "http://node/tx/broadcast");
    }

    #[tokio::test]
    async fn unreachable_node_is_a_network_error() {
        // Port 9 (discard) on localhost is closed on any sane test host.
        let rest = client("http://127.0.0.1:9", "cosmoshub-4");
        let result = rest.accounts("cosmos1xyz").await;
        assert!(matches!(result, Err(SignerError::Network(_))));
    }
}
