//! # Seed-Derived DIDs
//!
//! A [`Did`] is the signing identity: an Ed25519 keypair, its Sovrin-style
//! identifier, and an X25519 encryption key, all expanded from one 32-byte
//! [`Seed`]:
//!
//! ```text
//! seed (32 bytes)
//!     -> Ed25519 keypair          verifyKey = base58(public_key)
//!     -> public_key[..16]         did       = base58(public_key[..16])
//!     -> X25519(seed, basepoint)  encryptionPublicKey = base58(..)
//! ```
//!
//! The text forms match what Sovrin DID tooling emits for the same seed,
//! so an identity derived here is interchangeable with one exported from
//! an existing wallet.
//!
//! ## Secrets
//!
//! The seed doubles as the signing key and the X25519 private key. It
//! lives inside the `Did` in a zeroize-on-drop container and only comes
//! out through accessors that return [`Zeroizing`] buffers. Drop the `Did`
//! and the key material is gone.

use std::fmt;

use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroizing;

use super::mnemonic::{check_mnemonic, MnemonicValidator, Seed};
use crate::config::{
    DID_IDENTIFIER_LENGTH, SEED_LENGTH, SIGNING_KEY_LENGTH, VERIFYING_KEY_LENGTH,
};
use crate::crypto::keys::{CosmosKeypair, CosmosPublicKey};
use crate::crypto::signatures::open_attached;
use crate::error::{Result, SignerError};

/// DID method prefix used when rendering the identifier as a URI.
const DID_METHOD_PREFIX: &str = "did:sov:";

const EXPANDED_SIGN_KEY_LENGTH: usize = SIGNING_KEY_LENGTH + VERIFYING_KEY_LENGTH;

/// A deterministic signing identity.
///
/// # Examples
///
/// ```
/// use cosmos_sign::identity::Did;
///
/// let did = Did::from_mnemonic("correct horse battery staple", None).unwrap();
/// let again = Did::from_mnemonic("correct horse battery staple", None).unwrap();
/// assert_eq!(did.verify_key(), again.verify_key());
/// assert_eq!(did.did(), again.did());
/// ```
#[derive(Clone)]
pub struct Did {
    did: String,
    verify_key: String,
    encryption_public_key: String,
    keypair: CosmosKeypair,
    seed: Seed,
}

impl Did {
    /// Expand a seed into the full identity.
    pub fn from_seed(seed: &Seed) -> Self {
        let keypair = CosmosKeypair::from_seed(seed.as_bytes());
        let public_key = keypair.public_key_bytes();
        let encryption_secret = StaticSecret::from(*seed.as_bytes());
        let encryption_public = X25519PublicKey::from(&encryption_secret);

        Self {
            did: bs58::encode(&public_key[..DID_IDENTIFIER_LENGTH]).into_string(),
            verify_key: bs58::encode(public_key).into_string(),
            encryption_public_key: bs58::encode(encryption_public.as_bytes()).into_string(),
            keypair,
            seed: seed.clone(),
        }
    }

    /// Derive an identity from a mnemonic.
    ///
    /// With a `validator`, the mnemonic must also pass its checksum. The
    /// empty mnemonic is rejected either way.
    pub fn from_mnemonic(mnemonic: &str, validator: Option<&dyn MnemonicValidator>) -> Result<Self> {
        check_mnemonic(mnemonic, validator)?;
        let seed = Seed::from_mnemonic(mnemonic);
        let did = Self::from_seed(&seed);
        tracing::debug!(did = %did.did, "derived identity from mnemonic");
        Ok(did)
    }

    /// Rebuild an identity from its base58 sign key.
    ///
    /// Accepts the 32-byte seed or the 64-byte NaCl secret key
    /// (`seed || public_key`) that some wallets export instead.
    pub fn from_sign_key_base58(sign_key: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            bs58::decode(sign_key)
                .into_vec()
                .map_err(|e| SignerError::Encoding(e.to_string()))?,
        );
        let seed = match bytes.len() {
            SEED_LENGTH => Seed::from_slice(&bytes)?,
            EXPANDED_SIGN_KEY_LENGTH => {
                let keypair = CosmosKeypair::from_expanded_bytes(&bytes)?;
                Seed::from_slice(keypair.secret_key_bytes().as_slice())?
            }
            other => {
                return Err(SignerError::Encoding(format!(
                    "sign key must decode to {} or {} bytes, got {}",
                    SEED_LENGTH, EXPANDED_SIGN_KEY_LENGTH, other
                )))
            }
        };
        Ok(Self::from_seed(&seed))
    }

    /// The short identifier: base58 of the first 16 public-key bytes.
    pub fn did(&self) -> &str {
        &self.did
    }

    /// The identifier as a `did:sov:` URI.
    pub fn to_did_uri(&self) -> String {
        format!("{}{}", DID_METHOD_PREFIX, self.did)
    }

    /// base58 Ed25519 public key.
    pub fn verify_key(&self) -> &str {
        &self.verify_key
    }

    /// base58 X25519 public key.
    pub fn encryption_public_key(&self) -> &str {
        &self.encryption_public_key
    }

    pub fn public_key(&self) -> CosmosPublicKey {
        self.keypair.public_key()
    }

    /// Public key in the base64 form used by `pub_key.value`.
    pub fn public_key_base64(&self) -> String {
        self.keypair.public_key_base64()
    }

    pub fn keypair(&self) -> &CosmosKeypair {
        &self.keypair
    }

    /// Sign `message`, returning the attached `signature || message` form.
    pub fn sign_message(&self, message: &[u8]) -> Vec<u8> {
        self.keypair.sign_attached(message)
    }

    /// Verify an attached signature made by this identity and return the
    /// signed message.
    pub fn verify_signed_message<'a>(&self, signed: &'a [u8]) -> Result<&'a [u8]> {
        Ok(open_attached(&self.public_key(), signed)?)
    }

    /// base58 signing key. Secret.
    pub fn sign_key_base58(&self) -> Zeroizing<String> {
        Zeroizing::new(bs58::encode(self.seed.as_bytes()).into_string())
    }

    /// base58 X25519 private key. Secret; equal to the sign key because
    /// both are the raw seed.
    pub fn encryption_private_key_base58(&self) -> Zeroizing<String> {
        self.sign_key_base58()
    }

    /// Hex seed. Secret.
    pub fn seed_hex(&self) -> Zeroizing<String> {
        self.seed.to_hex()
    }

    /// The shareable half of the identity.
    pub fn to_public(&self) -> PublicDid {
        PublicDid {
            did: self.did.clone(),
            verify_key: self.verify_key.clone(),
            encryption_public_key: self.encryption_public_key.clone(),
        }
    }
}

impl fmt::Debug for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Did")
            .field("did", &self.did)
            .field("verify_key", &self.verify_key)
            .field("encryption_public_key", &self.encryption_public_key)
            .finish_non_exhaustive()
    }
}

/// Public fields of a [`Did`], in the camelCase layout DID tooling exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicDid {
    pub did: String,
    pub verify_key: String,
    pub encryption_public_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::mnemonic::Bip39Validator;

    const ART: &str = "abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon abandon abandon art";
    const ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
                         abandon abandon abandon abandon abandon about";

    #[test]
    fn known_vector_art() {
        let did = Did::from_mnemonic(ART, None).unwrap();
        assert_eq!(did.verify_key(), "CSzGMSiRytEwHfNdsyqDEuzbXoSqESzUkJxtFndbX4hg");
        assert_eq!(did.did(), "N1FTvzSUgp6KrMXeJNX8CG");
        assert_eq!(
            did.encryption_public_key(),
            "Gmw96rjs58KwHm6xXJU822WYpEUZx9FL4tHX7tjSsB3h"
        );
        assert_eq!(
            did.sign_key_base58().as_str(),
            "2Gw3fRFXyc2Y6AFc3HYiMFtd8L5Zy3QxdF8fyayRGfSu"
        );
        assert_eq!(
            did.public_key_base64(),
            "qhjTaL2PL+GYBDtFHczBaQza3804d7ve7f1YqcTSCTM="
        );
    }

    #[test]
    fn known_vector_about() {
        let did = Did::from_mnemonic(ABOUT, Some(&Bip39Validator)).unwrap();
        assert_eq!(did.verify_key(), "AwMhMYpW3Wf2gRRR3JZwzphK9fZhfRi63nnN8BV8edEE");
        assert_eq!(did.did(), "KEUEREwwpf1BZaX8NHTfKs");
    }

    #[test]
    fn encryption_key_is_seed_times_basepoint() {
        use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};

        let seed = Seed::from_mnemonic(ART);
        let expected = x25519(*seed.as_bytes(), X25519_BASEPOINT_BYTES);
        let did = Did::from_seed(&seed);
        assert_eq!(did.encryption_public_key(), bs58::encode(expected).into_string());
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = Did::from_mnemonic(ART, None).unwrap();
        let b = Did::from_mnemonic(ART, None).unwrap();
        assert_eq!(a.did(), b.did());
        assert_eq!(a.verify_key(), b.verify_key());
        assert_eq!(*a.sign_key_base58(), *b.sign_key_base58());
    }

    #[test]
    fn different_mnemonics_give_independent_identities() {
        let a = Did::from_mnemonic(ART, None).unwrap();
        let b = Did::from_mnemonic(ABOUT, None).unwrap();
        assert_ne!(a.verify_key(), b.verify_key());
        assert_ne!(a.did(), b.did());
    }

    #[test]
    fn did_is_prefix_of_verify_key_bytes() {
        let did = Did::from_mnemonic(ART, None).unwrap();
        let id_bytes = bs58::decode(did.did()).into_vec().unwrap();
        let key_bytes = bs58::decode(did.verify_key()).into_vec().unwrap();
        assert_eq!(id_bytes.len(), DID_IDENTIFIER_LENGTH);
        assert_eq!(&key_bytes[..DID_IDENTIFIER_LENGTH], &id_bytes[..]);
    }

    #[test]
    fn empty_mnemonic_is_rejected() {
        assert!(matches!(
            Did::from_mnemonic("", None),
            Err(SignerError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn checksum_failure_is_rejected() {
        assert!(matches!(
            Did::from_mnemonic(ART, Some(&Bip39Validator)),
            Err(SignerError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn sign_key_roundtrip() {
        let did = Did::from_mnemonic(ART, None).unwrap();
        let restored = Did::from_sign_key_base58(&did.sign_key_base58()).unwrap();
        assert_eq!(restored.verify_key(), did.verify_key());
        assert_eq!(*restored.seed_hex(), *did.seed_hex());
        assert!(Did::from_sign_key_base58("0OIl").is_err());
        assert!(Did::from_sign_key_base58("3mJr7AoUXx2Wqd").is_err());
    }

    #[test]
    fn expanded_sign_key_is_accepted() {
        let did = Did::from_mnemonic(ART, None).unwrap();
        let mut expanded = did.keypair().secret_key_bytes().to_vec();
        expanded.extend_from_slice(did.public_key().as_bytes());
        let restored = Did::from_sign_key_base58(&bs58::encode(&expanded).into_string()).unwrap();
        assert_eq!(restored.verify_key(), did.verify_key());
        assert_eq!(*restored.seed_hex(), *did.seed_hex());

        let other = Did::from_mnemonic(ABOUT, None).unwrap();
        expanded.truncate(SIGNING_KEY_LENGTH);
        expanded.extend_from_slice(other.public_key().as_bytes());
        assert!(matches!(
            Did::from_sign_key_base58(&bs58::encode(&expanded).into_string()),
            Err(SignerError::Key(_))
        ));
    }

    #[test]
    fn signed_message_roundtrip() {
        let did = Did::from_mnemonic(ART, None).unwrap();
        let signed = did.sign_message(b"{\"memo\":\"\"}");
        assert_eq!(did.verify_signed_message(&signed).unwrap(), b"{\"memo\":\"\"}");

        let other = Did::from_mnemonic(ABOUT, None).unwrap();
        assert!(other.verify_signed_message(&signed).is_err());
    }

    #[test]
    fn did_uri_format() {
        let did = Did::from_mnemonic(ART, None).unwrap();
        assert_eq!(did.to_did_uri(), "did:sov:N1FTvzSUgp6KrMXeJNX8CG");
    }

    #[test]
    fn public_did_uses_camel_case() {
        let did = Did::from_mnemonic(ART, None).unwrap();
        let json = serde_json::to_value(did.to_public()).unwrap();
        assert_eq!(json["verifyKey"], did.verify_key());
        assert_eq!(json["encryptionPublicKey"], did.encryption_public_key());
        assert_eq!(json["did"], did.did());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let did = Did::from_mnemonic(ART, None).unwrap();
        let debug_str = format!("{:?}", did);
        assert!(debug_str.contains(did.verify_key()));
        assert!(!debug_str.contains(did.sign_key_base58().as_str()));
        assert!(!debug_str.contains(did.seed_hex().as_str()));
    }
}
