//! # Network Module
//!
//! Talking to a node. The signer itself is offline; this is the optional
//! last hop that looks up account numbers and submits envelopes.
//!
//! ```text
//! mod.rs   NodeApi trait and NodeResponse
//! rest.rs  RestClient: reqwest over the node's REST routes
//! ```
//!
//! Route layout depends on the chain (see [`ChainFlavor`](crate::config::ChainFlavor))
//! and is fixed when the client is built. There are no retries. A request
//! either completes within the configured timeout or fails with
//! [`SignerError::Network`](crate::error::SignerError::Network).

pub mod rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::transaction::SignedEnvelope;

pub use rest::RestClient;

/// A node's answer: HTTP status plus its parsed JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResponse {
    pub status: u16,
    pub body: Value,
}

impl NodeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The two node operations the client needs.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// GET the account record for `address`.
    async fn accounts(&self, address: &str) -> Result<NodeResponse>;

    /// POST a signed envelope to the broadcast route.
    async fn broadcast(&self, envelope: &SignedEnvelope) -> Result<NodeResponse>;
}
