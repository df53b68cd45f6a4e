//! Error types for the signer.
//!
//! Every fallible public operation in this crate returns a [`SignerError`].
//! Lower-level modules keep their own narrow enums ([`KeyError`],
//! [`SignatureError`]) and convert into this one at the boundary.
//!
//! No variant ever carries key material. Mnemonics are not echoed back
//! either, only a description of what was wrong with them.

use thiserror::Error;

use crate::crypto::keys::KeyError;
use crate::crypto::signatures::SignatureError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SignerError>;

/// Errors that can occur while deriving identities, signing, or talking to
/// a node.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The mnemonic was empty or failed the wordlist checksum.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// A required client setting is missing or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The bech32 human-readable prefix is empty or not a valid HRP.
    #[error("invalid bech32 prefix: {0:?}")]
    InvalidPrefix(String),

    /// Malformed base58, bech32 or base64 input.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Strict validation found a transaction without a required field.
    #[error("transaction is missing required field '{0}'")]
    MissingField(&'static str),

    /// Strict validation found a transaction that is not a JSON object.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Key material could not be parsed or does not match.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// A signature could not be parsed or did not verify.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The HTTP request to the node failed before a response was parsed.
    #[error("network error: {0}")]
    Network(String),
}

impl From<serde_json::Error> for SignerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
