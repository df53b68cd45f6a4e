//! # Transaction Module
//!
//! Turning a transaction object into something a node will accept.
//!
//! ## Architecture
//!
//! ```text
//! std_msg.rs     StdSignMsg: the caller's JSON plus its canonical bytes
//! validation.rs  Strict/lenient required-field checks
//! signing.rs     Canonicalize, sign, verify
//! envelope.rs    SignedEnvelope wire types and BroadcastMode
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Prepare**: wrap the JSON in a [`StdSignMsg`] (optional).
//! 2. **Sign**: [`sign`] / [`sign_with`] / [`sign_std_msg`] with a [`Did`](crate::identity::Did).
//! 3. **Broadcast**: POST the [`SignedEnvelope`] through the REST client.
//!
//! The library never constructs message bodies or computes fees. Whatever
//! the caller puts in `msgs` and `fee` is signed and forwarded as-is.

pub mod envelope;
pub mod signing;
pub mod std_msg;
pub mod validation;

pub use envelope::{build_envelope, BroadcastMode, PubKey, SignedEnvelope, Tx, TxSignature};
pub use signing::{sign, sign_canonical, sign_std_msg, sign_with, verify_envelope, SignOptions};
pub use std_msg::StdSignMsg;
pub use validation::{validate_transaction, REQUIRED_FIELDS};
