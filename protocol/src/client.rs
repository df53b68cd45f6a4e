//! # Client Facade
//!
//! [`Cosmos`] bundles a [`ClientConfig`] with a node connection so callers
//! can go from mnemonic to broadcast without threading the prefix, key type
//! and validation mode through every call.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::identity::{derive_address, derive_identity, Address, Did};
use crate::network::{NodeApi, NodeResponse, RestClient};
use crate::transaction::{sign_std_msg, BroadcastMode, SignOptions, SignedEnvelope, StdSignMsg};

/// A configured signer for one chain.
///
/// # Example
///
/// ```
/// use cosmos_sign::{ClientConfig, Cosmos};
/// use cosmos_sign::transaction::BroadcastMode;
/// use serde_json::json;
///
/// let config = ClientConfig::builder("http://localhost:1317", "cosmoshub-4").build().unwrap();
/// let cosmos = Cosmos::new(config).unwrap();
///
/// let did = cosmos.identity("correct horse battery staple", false).unwrap();
/// let msg = cosmos.new_std_msg(json!({
///     "msgs": [], "fee": {}, "memo": "", "account_number": "1", "sequence": "1"
/// }));
/// let envelope = cosmos.sign(&msg, &did, BroadcastMode::Sync).unwrap();
/// assert_eq!(envelope.tx.signatures.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Cosmos<N = RestClient> {
    config: ClientConfig,
    node: N,
}

impl Cosmos<RestClient> {
    /// Build a client that talks to `config.url()` over HTTP.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let node = RestClient::new(&config)?;
        tracing::debug!(
            url = %config.url(),
            chain_id = %config.chain_id(),
            flavor = %config.chain_flavor(),
            "cosmos client ready"
        );
        Ok(Self { config, node })
    }
}

impl<N: NodeApi> Cosmos<N> {
    /// Build a client over any [`NodeApi`] implementation.
    pub fn with_node(config: ClientConfig, node: N) -> Self {
        Self { config, node }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    /// Derive the identity for `mnemonic`.
    pub fn identity(&self, mnemonic: &str, checksum: bool) -> Result<Did> {
        derive_identity(mnemonic, checksum)
    }

    /// Derive the account address for `mnemonic` under the configured
    /// prefix.
    pub fn address(&self, mnemonic: &str, checksum: bool) -> Result<Address> {
        let did = derive_identity(mnemonic, checksum)?;
        self.address_of(&did)
    }

    pub fn address_of(&self, did: &Did) -> Result<Address> {
        derive_address(did, self.config.bech32_prefix())
    }

    pub fn new_std_msg(&self, json: Value) -> StdSignMsg {
        StdSignMsg::new(json)
    }

    /// Signing options taken from the config.
    pub fn sign_options(&self) -> SignOptions {
        SignOptions {
            pub_key_type: self.config.pub_key_type().to_string(),
            validation: self.config.validation(),
        }
    }

    /// Sign `msg` with `did`, honouring the configured key type and
    /// validation mode.
    pub fn sign(&self, msg: &StdSignMsg, did: &Did, mode: BroadcastMode) -> Result<SignedEnvelope> {
        sign_std_msg(msg, did, mode, &self.sign_options())
    }

    /// Look up the account record for `address`.
    pub async fn accounts(&self, address: &str) -> Result<NodeResponse> {
        self.node.accounts(address).await
    }

    /// Submit a signed envelope.
    pub async fn broadcast(&self, envelope: &SignedEnvelope) -> Result<NodeResponse> {
        let response = self.node.broadcast(envelope).await?;
        tracing::info!(
            status = response.status,
            mode = %envelope.mode,
            "broadcast complete"
        );
        Ok(response)
    }
}
