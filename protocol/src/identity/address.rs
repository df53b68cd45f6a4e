//! # Chain Addresses
//!
//! An account address is the bech32 (BIP-173) encoding of the first 20
//! bytes of `SHA-256(verification key)` under a chain-specific
//! human-readable prefix, e.g. `cosmos1...` or `iaa1...`.

use std::fmt;
use std::str::FromStr;

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};

use super::did::Did;
use crate::config::{validate_prefix, ADDRESS_HASH_LENGTH, DEFAULT_BECH32_PREFIX};
use crate::crypto::hash::address_hash;
use crate::error::{Result, SignerError};

/// A bech32 account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Encode the address of a raw public key under `prefix`.
    pub fn from_public_key(public_key: &[u8], prefix: &str) -> Result<Self> {
        let hrp = validate_prefix(prefix)?;
        let payload = address_hash(public_key);
        let encoded = bech32::encode::<Bech32>(hrp, &payload)
            .map_err(|e| SignerError::Encoding(e.to_string()))?;
        Ok(Self(encoded))
    }

    /// Decode `text` and check it carries `expected_prefix` and a 20-byte
    /// payload.
    pub fn parse(text: &str, expected_prefix: &str) -> Result<Self> {
        let expected = validate_prefix(expected_prefix)?;
        let (hrp, payload) =
            bech32::decode(text).map_err(|e| SignerError::Encoding(e.to_string()))?;
        if !same_hrp(&hrp, &expected) {
            return Err(SignerError::Encoding(format!(
                "address prefix '{}' does not match '{}'",
                hrp.as_str(),
                expected.as_str()
            )));
        }
        if payload.len() != ADDRESS_HASH_LENGTH {
            return Err(SignerError::Encoding(format!(
                "address payload must be {} bytes, got {}",
                ADDRESS_HASH_LENGTH,
                payload.len()
            )));
        }
        Ok(Self(text.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The human-readable part, everything before the last `1`.
    pub fn prefix(&self) -> &str {
        self.0.rsplit_once('1').map(|(hrp, _)| hrp).unwrap_or_default()
    }

    /// The 20-byte account hash.
    pub fn payload(&self) -> Result<Vec<u8>> {
        let (_, payload) =
            bech32::decode(&self.0).map_err(|e| SignerError::Encoding(e.to_string()))?;
        Ok(payload)
    }
}

fn same_hrp(a: &Hrp, b: &Hrp) -> bool {
    a.as_str().eq_ignore_ascii_case(b.as_str())
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parses under the default `cosmos` prefix.
impl FromStr for Address {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, DEFAULT_BECH32_PREFIX)
    }
}

/// Derive the account address of `did` under `prefix`.
///
/// The verification key is decoded from its base58 text form, so this
/// works the same for identities rebuilt from exported fields.
pub fn derive_address(did: &Did, prefix: &str) -> Result<Address> {
    validate_prefix(prefix)?;
    let public_key = bs58::decode(did.verify_key())
        .into_vec()
        .map_err(|e| SignerError::Encoding(e.to_string()))?;
    let address = Address::from_public_key(&public_key, prefix)?;
    tracing::debug!(%address, prefix, "derived address");
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ART: &str = "abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon abandon abandon art";
    const ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
                         abandon abandon abandon abandon abandon about";

    fn did(mnemonic: &str) -> Did {
        Did::from_mnemonic(mnemonic, None).unwrap()
    }

    #[test]
    fn cosmos_conformance_vector() {
        let address = derive_address(&did(ART), "cosmos").unwrap();
        assert_eq!(address.as_str(), "cosmos1r5w2f8rssqjsrck8nwrp9n52g029xz643f5ckn");
    }

    #[test]
    fn irishub_prefix() {
        let address = derive_address(&did(ART), "iaa").unwrap();
        assert_eq!(address.as_str(), "iaa1r5w2f8rssqjsrck8nwrp9n52g029xz64yt5f5z");
        assert_eq!(address.prefix(), "iaa");
    }

    #[test]
    fn second_vector() {
        let id = did(ABOUT);
        assert_eq!(
            derive_address(&id, "cosmos").unwrap().as_str(),
            "cosmos1dlg5t0xglqr35u3evxdk5xngewxgkt0295gqtt"
        );
        assert_eq!(
            derive_address(&id, "iaa").unwrap().as_str(),
            "iaa1dlg5t0xglqr35u3evxdk5xngewxgkt02skg3f6"
        );
    }

    #[test]
    fn same_payload_across_prefixes() {
        let id = did(ART);
        let cosmos = derive_address(&id, "cosmos").unwrap();
        let iaa = derive_address(&id, "iaa").unwrap();
        assert_ne!(cosmos, iaa);
        assert_eq!(cosmos.payload().unwrap(), iaa.payload().unwrap());
        assert_eq!(cosmos.payload().unwrap().len(), ADDRESS_HASH_LENGTH);
    }

    #[test]
    fn empty_prefix_is_rejected() {
        assert!(matches!(
            derive_address(&did(ART), ""),
            Err(SignerError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn malformed_prefix_is_rejected() {
        assert!(matches!(
            derive_address(&did(ART), "bad prefix"),
            Err(SignerError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn parse_roundtrip() {
        let address = derive_address(&did(ABOUT), "cosmos").unwrap();
        let parsed = Address::parse(address.as_str(), "cosmos").unwrap();
        assert_eq!(parsed, address);
        let via_from_str: Address = address.as_str().parse().unwrap();
        assert_eq!(via_from_str, address);
    }

    #[test]
    fn parse_rejects_wrong_prefix() {
        let address = derive_address(&did(ART), "iaa").unwrap();
        assert!(matches!(
            Address::parse(address.as_str(), "cosmos"),
            Err(SignerError::Encoding(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_checksum() {
        let result = Address::parse("cosmos1r5w2f8rssqjsrck8nwrp9n52g029xz643f5ckq", "cosmos");
        assert!(matches!(result, Err(SignerError::Encoding(_))));
    }

    #[test]
    fn serializes_as_plain_string() {
        let address = derive_address(&did(ART), "cosmos").unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"cosmos1r5w2f8rssqjsrck8nwrp9n52g029xz643f5ckn\"");
    }
}
