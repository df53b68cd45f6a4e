//! A transaction object paired with its canonical bytes.

use serde_json::Value;

use crate::canonical::{canonicalize, CanonicalBytes};
use crate::error::Result;

/// The unsigned message: the caller's JSON plus the exact bytes that will
/// be signed. The two are computed together so they cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct StdSignMsg {
    json: Value,
    bytes: CanonicalBytes,
}

impl StdSignMsg {
    pub fn new(json: Value) -> Self {
        let bytes = canonicalize(&json);
        Self { json, bytes }
    }

    /// Parse JSON text into a message.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn bytes(&self) -> &CanonicalBytes {
        &self.bytes
    }

    pub fn into_json(self) -> Value {
        self.json
    }
}

impl From<Value> for StdSignMsg {
    fn from(json: Value) -> Self {
        Self::new(json)
    }
}
