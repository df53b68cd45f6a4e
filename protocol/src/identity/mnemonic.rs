//! # Mnemonic Checks & Seed Derivation
//!
//! The seed is not BIP-39's PBKDF2 seed. It is the SHA-256 digest of the
//! mnemonic string exactly as typed, which is what existing DID wallets on
//! these chains do:
//!
//! ```text
//! mnemonic (UTF-8)
//!     -> SHA-256 -> 32 bytes
//!     -> Ed25519 seed
//! ```
//!
//! Consequences worth knowing: whitespace and case matter, and no
//! passphrase is involved. BIP-39 only shows up as an optional checksum
//! check, behind the [`MnemonicValidator`] seam.

use std::fmt;

use bip39::{Language, Mnemonic};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::SEED_LENGTH;
use crate::crypto::hash::sha256_array;
use crate::error::{Result, SignerError};

/// Checks a mnemonic against a wordlist standard.
pub trait MnemonicValidator {
    /// `true` if `mnemonic` is well-formed with a valid checksum.
    fn validate(&self, mnemonic: &str) -> bool;
}

/// BIP-39 validation against the English wordlist.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip39Validator;

impl MnemonicValidator for Bip39Validator {
    fn validate(&self, mnemonic: &str) -> bool {
        Mnemonic::parse_in(Language::English, mnemonic).is_ok()
    }
}

/// Rejects mnemonics that cannot be used, then optionally runs `validator`.
///
/// An empty or whitespace-only mnemonic is always an error, checksum or
/// not. It would otherwise derive a perfectly valid identity from
/// `SHA-256("")` that anybody can reproduce.
pub fn check_mnemonic(mnemonic: &str, validator: Option<&dyn MnemonicValidator>) -> Result<()> {
    if mnemonic.trim().is_empty() {
        return Err(SignerError::InvalidMnemonic("mnemonic is empty".into()));
    }
    if let Some(validator) = validator {
        if !validator.validate(mnemonic) {
            return Err(SignerError::InvalidMnemonic(
                "mnemonic phrases have invalid checksums".into(),
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// The 32-byte Ed25519 seed behind an identity. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    /// `SHA-256(mnemonic)`. No validation; see [`check_mnemonic`].
    pub fn from_mnemonic(mnemonic: &str) -> Self {
        Self(sha256_array(mnemonic.as_bytes()))
    }

    pub fn from_bytes(bytes: [u8; SEED_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Copy a 32-byte slice straight into a new seed.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SEED_LENGTH {
            return Err(SignerError::Encoding(format!(
                "seed must be {} bytes, got {}",
                SEED_LENGTH,
                bytes.len()
            )));
        }
        let mut seed = Self([0u8; SEED_LENGTH]);
        seed.0.copy_from_slice(bytes);
        Ok(seed)
    }

    /// Parse a hex-encoded seed (the `secret.seed` form of a DID export).
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            hex::decode(hex_str).map_err(|e| SignerError::Encoding(e.to_string()))?,
        );
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}
