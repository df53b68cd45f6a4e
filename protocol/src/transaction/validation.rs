//! Required-field checks applied before signing.
//!
//! Under [`ValidationMode::Lenient`] anything goes and missing fields are
//! simply left out of the envelope. [`ValidationMode::Strict`] refuses to
//! sign a transaction the node would reject for structural reasons.

use serde_json::Value;

use crate::config::ValidationMode;
use crate::error::{Result, SignerError};

/// Fields that must be present (and non-null) under strict validation.
pub const REQUIRED_FIELDS: [&str; 4] = ["msgs", "fee", "account_number", "sequence"];

/// Check `tx` against `mode`.
pub fn validate_transaction(tx: &Value, mode: ValidationMode) -> Result<()> {
    if mode == ValidationMode::Lenient {
        return Ok(());
    }

    let object = tx.as_object().ok_or_else(|| {
        SignerError::InvalidTransaction(format!(
            "expected a JSON object, got {}",
            json_type_name(tx)
        ))
    })?;

    for field in REQUIRED_FIELDS {
        match object.get(field) {
            None | Some(Value::Null) => return Err(SignerError::MissingField(field)),
            Some(_) => {}
        }
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
