//! Transaction signing and envelope verification.
//!
//! The signing procedure:
//! 1. Validate the transaction object according to the [`ValidationMode`].
//! 2. Canonicalize it (sorted keys, compact JSON).
//! 3. Produce the attached `signature || message` form with the identity's
//!    key and keep the leading 64 bytes.
//! 4. base64 the signature and assemble the [`SignedEnvelope`].
//!
//! Ed25519 is deterministic, so the same transaction and identity always
//! produce the same envelope.

use serde_json::Value;

use super::envelope::{build_envelope, BroadcastMode, PubKey, SignedEnvelope};
use super::std_msg::StdSignMsg;
use super::validation::validate_transaction;
use crate::canonical::{canonicalize, CanonicalBytes};
use crate::config::{ValidationMode, DEFAULT_PUB_KEY_TYPE};
use crate::crypto::keys::{CosmosPublicKey, CosmosSignature};
use crate::crypto::signatures::SignatureError;
use crate::error::{Result, SignerError};
use crate::identity::Did;

/// Knobs that come from client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOptions {
    /// Literal placed in `pub_key.type`.
    pub pub_key_type: String,
    pub validation: ValidationMode,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            pub_key_type: DEFAULT_PUB_KEY_TYPE.to_string(),
            validation: ValidationMode::default(),
        }
    }
}

/// Sign `tx` with default options (lenient, `tendermint/PubKeyEd25519`).
///
/// # Example
///
/// ```
/// use cosmos_sign::identity::derive_identity;
/// use cosmos_sign::transaction::{sign, verify_envelope, BroadcastMode};
/// use serde_json::json;
///
/// let did = derive_identity("correct horse battery staple", false).unwrap();
/// let tx = json!({"msgs": [], "fee": {}, "memo": "", "account_number": "1", "sequence": "1"});
/// let envelope = sign(&tx, &did, BroadcastMode::Sync).unwrap();
/// assert!(verify_envelope(&tx, &envelope).is_ok());
/// ```
pub fn sign(tx: &Value, did: &Did, mode: BroadcastMode) -> Result<SignedEnvelope> {
    sign_with(tx, did, mode, &SignOptions::default())
}

/// Sign `tx` with explicit options.
pub fn sign_with(
    tx: &Value,
    did: &Did,
    mode: BroadcastMode,
    options: &SignOptions,
) -> Result<SignedEnvelope> {
    validate_transaction(tx, options.validation)?;
    let bytes = canonicalize(tx);
    envelope_for(tx, &bytes, did, mode, options)
}

/// Sign a prepared [`StdSignMsg`], reusing its canonical bytes.
pub fn sign_std_msg(
    msg: &StdSignMsg,
    did: &Did,
    mode: BroadcastMode,
    options: &SignOptions,
) -> Result<SignedEnvelope> {
    validate_transaction(msg.json(), options.validation)?;
    envelope_for(msg.json(), msg.bytes(), did, mode, options)
}

/// The detached signature over canonical bytes.
///
/// Signs in the attached form and keeps the leading 64 bytes, which is the
/// same as a detached Ed25519 signature over the message.
pub fn sign_canonical(bytes: &CanonicalBytes, did: &Did) -> Result<CosmosSignature> {
    let attached = did.sign_message(bytes.as_bytes());
    CosmosSignature::from_leading_bytes(&attached)
        .ok_or(SignerError::Signature(SignatureError::InvalidSignatureBytes))
}

fn envelope_for(
    tx: &Value,
    bytes: &CanonicalBytes,
    did: &Did,
    mode: BroadcastMode,
    options: &SignOptions,
) -> Result<SignedEnvelope> {
    let signature = sign_canonical(bytes, did)?;
    let pub_key = PubKey {
        key_type: options.pub_key_type.clone(),
        value: did.public_key_base64(),
    };

    tracing::debug!(
        did = %did.did(),
        %mode,
        payload_len = bytes.len(),
        "signed transaction"
    );

    Ok(build_envelope(tx, signature.to_base64(), pub_key, mode))
}

/// Check that `envelope` carries a valid signature over `tx`.
///
/// The canonical bytes are recomputed from `tx` and verified against the
/// public key embedded in the envelope, so this needs no identity.
pub fn verify_envelope(tx: &Value, envelope: &SignedEnvelope) -> Result<()> {
    let entry = envelope.primary_signature().ok_or_else(|| {
        SignerError::InvalidTransaction("envelope carries no signature".into())
    })?;

    let signature = CosmosSignature::from_base64(&entry.signature)
        .ok_or(SignerError::Signature(SignatureError::InvalidSignatureBytes))?;
    let public_key = CosmosPublicKey::from_base64(&entry.pub_key.value)?;

    let bytes = canonicalize(tx);
    if public_key.verify(bytes.as_bytes(), &signature) {
        Ok(())
    } else {
        Err(SignatureError::VerificationFailed.into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
