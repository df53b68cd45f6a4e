//! The signed-transaction envelope submitted to a node's broadcast route.
//!
//! Field order on the wire is fixed by struct declaration order:
//!
//! ```text
//! {"tx":{"msg":..,"fee":..,"signatures":[{"account_number":..,"sequence":..,
//!   "signature":..,"pub_key":{"type":..,"value":..}}],"memo":..},"mode":..}
//! ```
//!
//! Transaction fields that were absent from the source object are left out
//! rather than written as `null`. A field that is present with a `null`
//! value stays present, through both serialization and deserialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, SignerError};

/// How long the node holds the HTTP request before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    /// Wait for the transaction to be committed in a block.
    Block,
    /// Wait for the mempool check only.
    #[default]
    Sync,
    /// Return immediately.
    Async,
}

impl BroadcastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }
}

impl fmt::Display for BroadcastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BroadcastMode {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "block" => Ok(Self::Block),
            "sync" => Ok(Self::Sync),
            "async" => Ok(Self::Async),
            other => Err(SignerError::InvalidConfiguration(format!(
                "unknown broadcast mode '{}', expected block, sync or async",
                other
            ))),
        }
    }
}

/// Public key descriptor, `{"type": .., "value": base64}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub value: String,
}

/// One entry of `tx.signatures`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxSignature {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_number: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence: Option<Value>,
    /// base64 of the 64-byte Ed25519 signature.
    pub signature: String,
    pub pub_key: PubKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tx {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub msg: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub fee: Option<Value>,
    pub signatures: Vec<TxSignature>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub memo: Option<Value>,
}

/// `Some` for any value that appears in the input, `null` included.
/// Missing fields fall back to `None` through `#[serde(default)]`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// What gets POSTed to the broadcast route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    pub tx: Tx,
    pub mode: BroadcastMode,
}

impl SignedEnvelope {
    /// Compact JSON in wire field order.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The first (and in practice only) signature block.
    pub fn primary_signature(&self) -> Option<&TxSignature> {
        self.tx.signatures.first()
    }
}

/// Assemble an envelope from a transaction object and its signature.
///
/// `msgs`, `fee`, `memo`, `account_number` and `sequence` are copied from
/// `tx` when present. A non-object `tx` contributes nothing. This is pure
/// assembly; nothing is validated or signed here.
pub fn build_envelope(
    tx: &Value,
    signature_base64: String,
    pub_key: PubKey,
    mode: BroadcastMode,
) -> SignedEnvelope {
    let field = |name: &str| tx.get(name).cloned();
    SignedEnvelope {
        tx: Tx {
            msg: field("msgs"),
            fee: field("fee"),
            signatures: vec![TxSignature {
                account_number: field("account_number"),
                sequence: field("sequence"),
                signature: signature_base64,
                pub_key,
            }],
            memo: field("memo"),
        },
        mode,
    }
}
