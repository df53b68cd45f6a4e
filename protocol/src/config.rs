//! # Client Configuration & Constants
//!
//! Every magic string the signer depends on lives here: the bech32 prefix,
//! the public-key type literal the node expects, the reserved derivation
//! path. The per-chain ones are fields on [`ClientConfig`] with the Cosmos
//! Hub values as defaults.
//!
//! A [`ClientConfig`] is validated once, in [`ClientConfigBuilder::build`],
//! and is immutable afterwards. If you need a different prefix, build a
//! different config.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use bech32::Hrp;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignerError};

// ---------------------------------------------------------------------------
// Ledger Conventions
// ---------------------------------------------------------------------------

/// Bech32 human-readable prefix for Cosmos Hub account addresses.
pub const DEFAULT_BECH32_PREFIX: &str = "cosmos";

/// BIP-44 path for the Cosmos coin type (118). Kept in the config for
/// compatibility with HD wallets; the seed-hashing derivation ignores it.
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/118'/0'/0/0";

/// Amino type tag for Ed25519 public keys on Tendermint-based chains.
pub const DEFAULT_PUB_KEY_TYPE: &str = "tendermint/PubKeyEd25519";

/// Chain-id fragment that identifies IRISnet networks, which serve the
/// older REST routes.
pub const IRISHUB_CHAIN_MARKER: &str = "irishub";

/// How long a REST call may take before the client gives up. The library
/// never retries; callers own that policy.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519, via ed25519-dalek.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Seed length in bytes. The seed is a SHA-256 digest, so 32.
pub const SEED_LENGTH: usize = 32;

/// Ed25519 secret key length in bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. The envelope carries exactly this many bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Number of leading public-key bytes that make up the DID identifier.
pub const DID_IDENTIFIER_LENGTH: usize = 16;

/// Number of leading SHA-256 bytes that make up an account address.
pub const ADDRESS_HASH_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// ChainFlavor
// ---------------------------------------------------------------------------

/// REST route layout served by the target node.
///
/// IRISnet kept the pre-`auth` module routes; everything else uses the
/// standard Cosmos SDK light-client routes. The flavor is decided once when
/// the config is built instead of sniffing the chain id on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFlavor {
    /// `/bank/accounts/{address}` and `/tx/broadcast`.
    IrisHub,
    /// `/auth/accounts/{address}` and `/txs`.
    Standard,
}

impl ChainFlavor {
    /// Infers the flavor from a chain id.
    pub fn from_chain_id(chain_id: &str) -> Self {
        if chain_id.contains(IRISHUB_CHAIN_MARKER) {
            Self::IrisHub
        } else {
            Self::Standard
        }
    }

    /// Path of the account lookup route for `address`.
    pub fn accounts_path(&self, address: &str) -> String {
        match self {
            Self::IrisHub => format!("/bank/accounts/{}", address),
            Self::Standard => format!("/auth/accounts/{}", address),
        }
    }

    /// Path of the broadcast route.
    pub fn broadcast_path(&self) -> &'static str {
        match self {
            Self::IrisHub => "/tx/broadcast",
            Self::Standard => "/txs",
        }
    }
}

impl fmt::Display for ChainFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IrisHub => write!(f, "irishub"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationMode
// ---------------------------------------------------------------------------

/// How the signer treats transactions that lack required fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Copy whatever fields exist into the envelope; absent ones are left
    /// out. The node will reject the result if it cares.
    #[default]
    Lenient,
    /// Refuse to sign unless `msgs`, `fee`, `account_number` and `sequence`
    /// are all present.
    Strict,
}

impl FromStr for ValidationMode {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(SignerError::InvalidConfiguration(format!(
                "unknown validation mode '{}', expected 'lenient' or 'strict'",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Validated, immutable settings for a [`crate::Cosmos`] client.
///
/// # Examples
///
/// ```
/// use cosmos_sign::config::{ChainFlavor, ClientConfig};
///
/// let config = ClientConfig::builder("https://lcd.irishub.example", "irishub-1")
///     .bech32_prefix("iaa")
///     .build()
///     .unwrap();
/// assert_eq!(config.chain_flavor(), ChainFlavor::IrisHub);
/// assert_eq!(config.bech32_prefix(), "iaa");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    url: String,
    chain_id: String,
    bech32_prefix: String,
    derivation_path: String,
    pub_key_type: String,
    chain_flavor: ChainFlavor,
    validation: ValidationMode,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Starts a builder for the node at `url` serving `chain_id`.
    pub fn builder(url: impl Into<String>, chain_id: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            url: url.into(),
            chain_id: chain_id.into(),
            bech32_prefix: None,
            derivation_path: None,
            pub_key_type: None,
            chain_flavor: None,
            validation: ValidationMode::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Base URL of the node's REST endpoint, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn bech32_prefix(&self) -> &str {
        &self.bech32_prefix
    }

    /// Reserved BIP-32 path. Not used by the seed-hashing derivation.
    pub fn derivation_path(&self) -> &str {
        &self.derivation_path
    }

    /// Literal placed in `pub_key.type` of every signature block.
    pub fn pub_key_type(&self) -> &str {
        &self.pub_key_type
    }

    pub fn chain_flavor(&self) -> ChainFlavor {
        self.chain_flavor
    }

    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Builder for [`ClientConfig`]. All checks run in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    url: String,
    chain_id: String,
    bech32_prefix: Option<String>,
    derivation_path: Option<String>,
    pub_key_type: Option<String>,
    chain_flavor: Option<ChainFlavor>,
    validation: ValidationMode,
    request_timeout: Duration,
}

impl ClientConfigBuilder {
    pub fn bech32_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bech32_prefix = Some(prefix.into());
        self
    }

    pub fn derivation_path(mut self, path: impl Into<String>) -> Self {
        self.derivation_path = Some(path.into());
        self
    }

    pub fn pub_key_type(mut self, key_type: impl Into<String>) -> Self {
        self.pub_key_type = Some(key_type.into());
        self
    }

    /// Overrides the flavor inferred from the chain id.
    pub fn chain_flavor(mut self, flavor: ChainFlavor) -> Self {
        self.chain_flavor = Some(flavor);
        self
    }

    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validates every field and produces the immutable config.
    ///
    /// Fails with [`SignerError::InvalidConfiguration`] for an empty URL,
    /// chain id, key type or timeout, or a malformed derivation path, and
    /// with [`SignerError::InvalidPrefix`] for a prefix that is not a valid
    /// bech32 HRP.
    pub fn build(self) -> Result<ClientConfig> {
        let url = self.url.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(SignerError::InvalidConfiguration(
                "url was not set or invalid".into(),
            ));
        }

        let chain_id = self.chain_id.trim().to_string();
        if chain_id.is_empty() {
            return Err(SignerError::InvalidConfiguration(
                "chain id was not set or invalid".into(),
            ));
        }

        let bech32_prefix = self
            .bech32_prefix
            .unwrap_or_else(|| DEFAULT_BECH32_PREFIX.to_string());
        validate_prefix(&bech32_prefix)?;

        let derivation_path = self
            .derivation_path
            .unwrap_or_else(|| DEFAULT_DERIVATION_PATH.to_string());
        if !is_valid_derivation_path(&derivation_path) {
            return Err(SignerError::InvalidConfiguration(format!(
                "derivation path '{}' is not a BIP-32 path",
                derivation_path
            )));
        }

        let pub_key_type = self
            .pub_key_type
            .unwrap_or_else(|| DEFAULT_PUB_KEY_TYPE.to_string());
        if pub_key_type.trim().is_empty() {
            return Err(SignerError::InvalidConfiguration(
                "public key type was not set or invalid".into(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(SignerError::InvalidConfiguration(
                "request timeout must be greater than zero".into(),
            ));
        }

        let chain_flavor = self
            .chain_flavor
            .unwrap_or_else(|| ChainFlavor::from_chain_id(&chain_id));

        Ok(ClientConfig {
            url,
            chain_id,
            bech32_prefix,
            derivation_path,
            pub_key_type,
            chain_flavor,
            validation: self.validation,
            request_timeout: self.request_timeout,
        })
    }
}

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

/// Checks that `prefix` is usable as a bech32 human-readable part.
pub fn validate_prefix(prefix: &str) -> Result<Hrp> {
    if prefix.is_empty() {
        return Err(SignerError::InvalidPrefix(prefix.to_string()));
    }
    Hrp::parse(prefix).map_err(|_| SignerError::InvalidPrefix(prefix.to_string()))
}

/// Returns `true` for paths of the form `m/44'/118'/0'/0/0`: an `m` root
/// followed by one or more numeric components, each optionally hardened
/// with `'` or `h`, and each below 2^31.
pub fn is_valid_derivation_path(path: &str) -> bool {
    let mut parts = path.split('/');
    if parts.next() != Some("m") {
        return false;
    }
    let mut depth = 0usize;
    for part in parts {
        let index = part
            .strip_suffix('\'')
            .or_else(|| part.strip_suffix('h'))
            .unwrap_or(part);
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match index.parse::<u32>() {
            Ok(i) if i < (1 << 31) => {}
            _ => return false,
        }
        depth += 1;
    }
    depth > 0
}
