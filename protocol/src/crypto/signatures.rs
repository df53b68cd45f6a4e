//! # Digital Signatures
//!
//! Free-function wrappers around Ed25519 signing and verification.
//!
//! Two shapes of signature show up in this crate:
//!
//! - **Detached**: the bare 64-byte signature. This is what the node
//!   verifies and what goes into the envelope.
//! - **Attached**: `signature || message`, the NaCl `crypto_sign` output
//!   that DID tooling produces. [`open_attached`] verifies one and hands
//!   back the message.

use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};
use thiserror::Error;

use super::keys::{CosmosKeypair, CosmosPublicKey, CosmosSignature};
use crate::config::SIGNATURE_LENGTH;

/// Errors during signature operations.
///
/// Intentionally vague about why verification failed.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid signature bytes: expected 64 bytes")]
    InvalidSignatureBytes,

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Sign a message. The signature is deterministic (RFC 8032).
///
/// # Example
///
/// ```
/// use cosmos_sign::crypto::{CosmosKeypair, sign, verify};
///
/// let keypair = CosmosKeypair::from_seed(&[7u8; 32]);
/// let signature = sign(&keypair, b"hello");
/// assert!(verify(&keypair.public_key(), b"hello", &signature));
/// ```
pub fn sign(keypair: &CosmosKeypair, message: &[u8]) -> CosmosSignature {
    keypair.sign(message)
}

/// Verify a detached signature. `false` on any failure.
pub fn verify(public_key: &CosmosPublicKey, message: &[u8], signature: &CosmosSignature) -> bool {
    public_key.verify(message, signature)
}

/// Verify a signature given raw wire bytes.
pub fn verify_raw(
    public_key_bytes: &[u8; 32],
    message: &[u8],
    signature_bytes: &[u8; 64],
) -> Result<(), SignatureError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key_bytes).map_err(|_| SignatureError::InvalidPublicKey)?;

    let signature = DalekSignature::from_bytes(signature_bytes);

    verifying_key
        .verify(message, &signature)
        .map_err(|_| SignatureError::VerificationFailed)
}

/// Open an attached `signature || message` artifact.
///
/// Returns the message bytes if the leading signature verifies against
/// `public_key`.
pub fn open_attached<'a>(
    public_key: &CosmosPublicKey,
    attached: &'a [u8],
) -> Result<&'a [u8], SignatureError> {
    let signature = CosmosSignature::from_leading_bytes(attached)
        .ok_or(SignatureError::InvalidSignatureBytes)?;
    let message = &attached[SIGNATURE_LENGTH..];
    if public_key.verify(message, &signature) {
        Ok(message)
    } else {
        Err(SignatureError::VerificationFailed)
    }
}
