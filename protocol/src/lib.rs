// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # cosmos-sign: Core Library
//!
//! Offline signing for Cosmos-SDK style REST nodes. A mnemonic goes in, a
//! broadcast-ready JSON envelope comes out, and the private key never
//! leaves the process.
//!
//! ## Architecture
//!
//! - **crypto**: Ed25519 keys and signatures, SHA-256 helpers.
//! - **identity**: mnemonic to seed to DID, and DID to bech32 address.
//! - **canonical**: sorted-key compact JSON, the bytes that get signed.
//! - **transaction**: validation, signing and the signed envelope.
//! - **network**: REST client for account lookup and broadcast.
//! - **client**: the [`Cosmos`] facade tying it together.
//! - **config**: constants and the validated [`ClientConfig`].
//!
//! ## Quick start
//!
//! ```
//! use cosmos_sign::identity::{derive_address, derive_identity};
//! use cosmos_sign::transaction::{sign, BroadcastMode};
//! use serde_json::json;
//!
//! let did = derive_identity("correct horse battery staple", false).unwrap();
//! let address = derive_address(&did, "cosmos").unwrap();
//! assert!(address.as_str().starts_with("cosmos1"));
//!
//! let tx = json!({"msgs": [], "fee": {}, "memo": "", "account_number": "1", "sequence": "1"});
//! let envelope = sign(&tx, &did, BroadcastMode::Sync).unwrap();
//! println!("{}", envelope.to_json_string().unwrap());
//! ```

pub mod canonical;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod network;
pub mod transaction;

pub use client::Cosmos;
pub use config::ClientConfig;
pub use error::{Result, SignerError};
