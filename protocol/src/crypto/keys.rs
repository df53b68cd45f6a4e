//! # Key Management
//!
//! Ed25519 keypairs for signing identities.
//!
//! Every identity the signer derives is, underneath, one Ed25519 keypair
//! expanded from a 32-byte seed (RFC 8032). This module owns that keypair
//! and its text encodings: base58 for the DID-style `verifyKey`, base64 for
//! the `pub_key.value` field the node expects.
//!
//! ## Security considerations
//!
//! - The signing key is zeroized on drop (ed25519-dalek's `zeroize` feature).
//! - Exported secret bytes come back wrapped in [`Zeroizing`], so the copy
//!   is wiped too.
//! - Key bytes are never logged, and `Debug` only ever prints the public half.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{SIGNATURE_LENGTH, SIGNING_KEY_LENGTH, VERIFYING_KEY_LENGTH};

/// Errors that can occur during key operations.
///
/// Deliberately terse. Error text must never describe key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("keypair validation failed: public key does not match secret key")]
    KeypairMismatch,
}

/// An Ed25519 signing keypair.
///
/// `CosmosKeypair` does not implement `Serialize`. Secret bytes only leave
/// this type through [`secret_key_bytes`](Self::secret_key_bytes), which
/// hands back a zeroizing buffer.
///
/// # Examples
///
/// ```
/// use cosmos_sign::crypto::keys::CosmosKeypair;
///
/// let kp = CosmosKeypair::from_seed(&[1u8; 32]);
/// let sig = kp.sign(b"send 1uatom");
/// assert!(kp.verify(b"send 1uatom", &sig));
/// ```
pub struct CosmosKeypair {
    signing_key: SigningKey,
}

/// The public half of an identity. Safe to share.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosmosPublicKey {
    bytes: [u8; VERIFYING_KEY_LENGTH],
}

/// A detached Ed25519 signature. Always 64 bytes.
///
/// Not `Serialize`: on the wire it only ever travels as base64 text.
#[derive(Clone, PartialEq, Eq)]
pub struct CosmosSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl CosmosKeypair {
    /// Generate a fresh keypair from the OS RNG.
    ///
    /// Identities in this crate are derived, not generated; this exists for
    /// tests and benchmarks that need throwaway keys.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Constructs a keypair deterministically from a 32-byte seed.
    ///
    /// The seed is the RFC 8032 secret key; SHA-512 expansion and clamping
    /// happen inside ed25519-dalek.
    pub fn from_seed(seed: &[u8; SIGNING_KEY_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Reconstruct a keypair from a byte slice holding the 32-byte seed.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let seed: &[u8; SIGNING_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(seed))
    }

    /// Reconstruct a keypair from the 64-byte NaCl secret key layout
    /// (`seed || public_key`), checking that both halves agree.
    pub fn from_expanded_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != SIGNING_KEY_LENGTH + VERIFYING_KEY_LENGTH {
            return Err(KeyError::InvalidSecretKey);
        }
        let (secret, public) = bytes.split_at(SIGNING_KEY_LENGTH);
        let keypair = Self::try_from_slice(secret)?;
        if keypair.public_key_bytes()[..] != *public {
            return Err(KeyError::KeypairMismatch);
        }
        Ok(keypair)
    }

    /// Returns the public key associated with this keypair.
    pub fn public_key(&self) -> CosmosPublicKey {
        CosmosPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Raw public key bytes.
    pub fn public_key_bytes(&self) -> [u8; VERIFYING_KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message. Deterministic for a given (key, message) pair.
    pub fn sign(&self, message: &[u8]) -> CosmosSignature {
        CosmosSignature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }

    /// Sign a message in NaCl "attached" form: `signature || message`.
    ///
    /// This is the artifact DID tooling passes around. The first
    /// [`SIGNATURE_LENGTH`] bytes are the detached signature.
    pub fn sign_attached(&self, message: &[u8]) -> Vec<u8> {
        let signature = self.sign(message);
        let mut out = Vec::with_capacity(SIGNATURE_LENGTH + message.len());
        out.extend_from_slice(signature.as_bytes());
        out.extend_from_slice(message);
        out
    }

    /// Verify a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &CosmosSignature) -> bool {
        self.public_key().verify(message, signature)
    }

    /// Exports the 32-byte seed. The buffer is wiped when dropped.
    pub fn secret_key_bytes(&self) -> Zeroizing<[u8; SIGNING_KEY_LENGTH]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// Get a reference to the underlying `SigningKey`.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Get the underlying `VerifyingKey`.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Public key as base58, the DID `verifyKey` text form.
    pub fn public_key_base58(&self) -> String {
        self.public_key().to_base58()
    }

    /// Public key as standard padded base64, the `pub_key.value` form.
    pub fn public_key_base64(&self) -> String {
        self.public_key().to_base64()
    }
}

impl Clone for CosmosKeypair {
    fn clone(&self) -> Self {
        let seed = self.secret_key_bytes();
        Self::from_seed(&seed)
    }
}

impl fmt::Debug for CosmosKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CosmosKeypair(pub={})", self.public_key().to_base58())
    }
}

impl PartialEq for CosmosKeypair {
    /// Keypairs compare by public key.
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for CosmosKeypair {}

// ---------------------------------------------------------------------------
// CosmosPublicKey
// ---------------------------------------------------------------------------

impl CosmosPublicKey {
    pub fn from_bytes(bytes: [u8; VERIFYING_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parse a public key from raw bytes, rejecting wrong lengths and
    /// points that are not on the curve.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; VERIFYING_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        let key = Self { bytes };
        key.to_verifying_key()?;
        Ok(key)
    }

    pub fn as_bytes(&self) -> &[u8; VERIFYING_KEY_LENGTH] {
        &self.bytes
    }

    /// Verify a detached signature. `false` on any failure.
    pub fn verify(&self, message: &[u8], signature: &CosmosSignature) -> bool {
        let Ok(verifying_key) = self.to_verifying_key() else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }

    pub fn to_verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        VerifyingKey::from_bytes(&self.bytes).map_err(|_| KeyError::InvalidPublicKey)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.bytes).into_string()
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.bytes)
    }

    /// Parse the base64 `pub_key.value` form.
    pub fn from_base64(s: &str) -> Result<Self, KeyError> {
        let bytes = BASE64.decode(s).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::try_from_slice(&bytes)
    }
}

impl Hash for CosmosPublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for CosmosPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for CosmosPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CosmosPublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// CosmosSignature
// ---------------------------------------------------------------------------

impl CosmosSignature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Take the leading signature from a byte sequence.
    ///
    /// Accepts both a bare 64-byte signature and an attached
    /// `signature || message` artifact. Anything shorter than 64 bytes is
    /// rejected.
    pub fn from_leading_bytes(bytes: &[u8]) -> Option<Self> {
        let head: [u8; SIGNATURE_LENGTH] = bytes.get(..SIGNATURE_LENGTH)?.try_into().ok()?;
        Some(Self { bytes: head })
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Standard padded base64, the form carried in the envelope.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.bytes)
    }

    /// Parse a base64 signature. `None` unless it decodes to exactly 64 bytes.
    pub fn from_base64(s: &str) -> Option<Self> {
        let bytes = BASE64.decode(s).ok()?;
        let bytes: [u8; SIGNATURE_LENGTH] = bytes.as_slice().try_into().ok()?;
        Some(Self { bytes })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for CosmosSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64())
    }
}

impl fmt::Debug for CosmosSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "CosmosSignature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}
