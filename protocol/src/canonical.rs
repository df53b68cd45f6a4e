//! # Canonical JSON
//!
//! Two transactions that differ only in key order must sign to the same
//! bytes. Canonical form is:
//!
//! - object keys in ascending byte order, at every depth,
//! - arrays in their original order,
//! - compact output (no insignificant whitespace),
//! - strings, booleans and null as `serde_json` prints them,
//! - integral numbers as plain integer digits, so `1.0` is written `1` and
//!   `-0.0` is written `0`, matching what JavaScript signers produce.
//!
//! The ordering is applied here explicitly, so the output does not depend
//! on whether `serde_json` was built with `preserve_order`.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::Result;

/// UTF-8 bytes of a canonicalized JSON value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(String);

impl CanonicalBytes {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for CanonicalBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CanonicalBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalBytes({})", self.0)
    }
}

/// Serialize `value` in canonical form.
///
/// ```
/// use cosmos_sign::canonical::canonicalize;
/// use serde_json::json;
///
/// let bytes = canonicalize(&json!({"b": 1, "a": [3, {"d": 0, "c": 0}]}));
/// assert_eq!(bytes.as_str(), r#"{"a":[3,{"c":0,"d":0}],"b":1}"#);
/// ```
pub fn canonicalize(value: &Value) -> CanonicalBytes {
    let mut out = String::new();
    write_canonical(value, &mut out);
    CanonicalBytes(out)
}

/// Canonicalize any serializable value by way of [`serde_json::Value`].
pub fn canonicalize_serializable<T: Serialize + ?Sized>(value: &T) -> Result<CanonicalBytes> {
    let value = serde_json::to_value(value)?;
    Ok(canonicalize(&value))
}

/// Rebuild `value` with every object's keys inserted in sorted order.
///
/// `canonicalize(&sort_value(v)) == canonicalize(v)` for every `v`.
pub fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted = Map::with_capacity(map.len());
            for (key, child) in sorted_entries(map) {
                sorted.insert(key.clone(), sort_value(child));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_value).collect()),
        scalar => scalar.clone(),
    }
}

fn sorted_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    entries
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            out.push('{');
            for (i, (key, child)) in sorted_entries(map).into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(child, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Number(number) => write_number(number, out),
        // Display on a scalar Value is compact JSON.
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Integral floats below 1e21 print without a fraction or exponent.
const PLAIN_INTEGER_LIMIT: f64 = 1e21;

fn write_number(number: &Number, out: &mut String) {
    match number.as_f64() {
        Some(f) if number.is_f64() && f.fract() == 0.0 && f.abs() < PLAIN_INTEGER_LIMIT => {
            if f == 0.0 {
                out.push('0');
            } else {
                out.push_str(&format!("{:.0}", f));
            }
        }
        _ => out.push_str(&number.to_string()),
    }
}
