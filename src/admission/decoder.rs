//! Decoding of raw admission payloads into typed resources.
//!
//! The target type is the hint: its `Resource` impl supplies the expected
//! `apiVersion` and `kind`, and its `Deserialize` impl supplies the shape.

use kube::Resource;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::request::RawObject;

/// Errors produced while decoding a raw object.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload was empty or missing
    #[error("there is no content to decode")]
    Empty,

    /// The payload is not valid JSON, or does not fit the target type
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload is JSON but not a JSON object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The payload declares a different apiVersion or kind than the target
    #[error("{field} mismatch: expected {expected:?}, got {found:?}")]
    KindMismatch {
        field: &'static str,
        expected: String,
        found: String,
    },
}

/// Stateless decoder shared read-only by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    check_kind: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Decoder that rejects payloads declaring a foreign apiVersion or kind.
    pub fn new() -> Self {
        Self { check_kind: true }
    }

    /// Decoder that ignores declared type metadata.
    pub fn lenient() -> Self {
        Self { check_kind: false }
    }

    pub fn checks_kind(&self) -> bool {
        self.check_kind
    }

    /// Decode `raw` into `K`.
    pub fn decode<K>(&self, raw: &RawObject) -> Result<K, DecodeError>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        if raw.is_empty() {
            return Err(DecodeError::Empty);
        }

        let object = match serde_json::from_slice::<Value>(raw.as_bytes())? {
            Value::Object(map) => map,
            other => return Err(DecodeError::NotAnObject(json_type_name(&other))),
        };

        if self.check_kind {
            check_type_meta::<K>(&object)?;
        }

        Ok(serde_json::from_value(Value::Object(object))?)
    }
}

/// Payloads without type metadata are accepted as-is.
fn check_type_meta<K>(object: &Map<String, Value>) -> Result<(), DecodeError>
where
    K: Resource<DynamicType = ()>,
{
    check_field(object, "apiVersion", &K::api_version(&()))?;
    check_field(object, "kind", &K::kind(&()))
}

fn check_field(
    object: &Map<String, Value>,
    field: &'static str,
    expected: &str,
) -> Result<(), DecodeError> {
    let found = match object.get(field) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::String(s)) if s == expected => return Ok(()),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    Err(DecodeError::KindMismatch {
        field,
        expected: expected.to_string(),
        found,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
