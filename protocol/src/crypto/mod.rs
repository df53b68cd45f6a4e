//! # Cryptographic Primitives
//!
//! Everything the signer does with keys and digests flows through here:
//!
//! - **Ed25519** for signatures, via `ed25519-dalek`.
//! - **SHA-256** for seed and address derivation, via `sha2`.
//!
//! These are thin, typed wrappers around audited crates. Nothing in this
//! module implements a primitive itself.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{address_hash, sha256, sha256_array, sha256_hex};
pub use keys::{CosmosKeypair, CosmosPublicKey, CosmosSignature, KeyError};
pub use signatures::{open_attached, sign, verify, verify_raw, SignatureError};
