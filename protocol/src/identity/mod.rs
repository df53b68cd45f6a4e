//! # Identity Module
//!
//! Deterministic identities derived from a mnemonic phrase. The stack is
//! layered:
//!
//! 1. **Mnemonic**: optional BIP-39 checksum check, then
//!    `SHA-256(mnemonic)` as the 32-byte seed.
//! 2. **DID**: Ed25519 keypair, Sovrin-style identifier and X25519
//!    encryption key, all from that seed.
//! 3. **Address**: bech32 encoding of the hashed verification key under a
//!    chain prefix.
//!
//! Nothing here touches the network or the filesystem. Same mnemonic in,
//! same identity out, on every machine.

pub mod address;
pub mod did;
pub mod mnemonic;

pub use address::{derive_address, Address};
pub use did::{Did, PublicDid};
pub use mnemonic::{check_mnemonic, Bip39Validator, MnemonicValidator, Seed};

/// Derive the identity for `mnemonic`.
///
/// With `checksum` set, the phrase must be a valid English BIP-39 mnemonic.
/// Either way an empty phrase is rejected with
/// [`SignerError::InvalidMnemonic`](crate::error::SignerError::InvalidMnemonic).
pub fn derive_identity(mnemonic: &str, checksum: bool) -> crate::error::Result<Did> {
    if checksum {
        derive_identity_with(mnemonic, Some(&Bip39Validator))
    } else {
        derive_identity_with(mnemonic, None)
    }
}

/// [`derive_identity`] with a caller-supplied wordlist validator.
pub fn derive_identity_with(
    mnemonic: &str,
    validator: Option<&dyn MnemonicValidator>,
) -> crate::error::Result<Did> {
    Did::from_mnemonic(mnemonic, validator)
}
