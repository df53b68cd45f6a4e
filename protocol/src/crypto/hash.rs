//! # Hashing Utilities
//!
//! SHA-256 is the only hash function the signer needs, and it needs it in
//! two places:
//!
//! - **Seed derivation**: the mnemonic string is hashed into the 32-byte
//!   Ed25519 seed.
//! - **Address derivation**: the verification key is hashed and the first
//!   20 bytes become the bech32 payload.
//!
//! Both constructions are fixed by the ledger and by existing wallets.
//! Swapping the hash would silently move every user to a new address.

use sha2::{Digest, Sha256};

use crate::config::ADDRESS_HASH_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use cosmos_sign::crypto::sha256;
///
/// let hash = sha256(b"cosmos");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Compute the SHA-256 hash and return a fixed-size array.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Lowercase hex of the SHA-256 digest.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256_array(data))
}

/// The account-address hash: the first 20 bytes of `SHA-256(public_key)`.
///
/// Note this is *not* the secp256k1 `RIPEMD160(SHA256(pk))` construction.
/// Ed25519 accounts on Tendermint chains use truncated SHA-256.
pub fn address_hash(public_key: &[u8]) -> [u8; ADDRESS_HASH_LENGTH] {
    let digest = sha256_array(public_key);
    let mut out = [0u8; ADDRESS_HASH_LENGTH];
    out.copy_from_slice(&digest[..ADDRESS_HASH_LENGTH]);
    out
}
