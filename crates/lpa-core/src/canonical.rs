//! # Canonical Serialization — JCS Byte Production
//!
//! Every change hash in the workspace is computed over `CanonicalBytes`, so
//! two applications with the same facts always hash the same.
//!
//! ## Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only ways to
//! construct it are `CanonicalBytes::new()` and `CanonicalBytes::scoped()`,
//! both of which serialize through `serde_json::Value` and then emit RFC 8785
//! (JSON Canonicalization Scheme) output via `serde_jcs`: sorted keys,
//! compact separators, ECMAScript number formatting.
//!
//! Any function requiring canonical bytes for hashing must accept
//! `&CanonicalBytes`, so two aggregates with equal field values always hash
//! to the same value regardless of struct field order or map iteration order.
//!
//! ## Field Scoping
//!
//! Change hashes are computed over a *view* of an aggregate. A [`FieldScope`]
//! names which top-level keys participate: every key except an exclusion
//! list, or only the keys of an inclusion list. Scoping is applied to the
//! top-level object only; nested values are always hashed in full.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Which top-level keys of a serialized object participate in canonical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    /// Every key participates.
    All,
    /// Every key except the listed ones participates.
    Exclude(&'static [&'static str]),
    /// Only the listed keys participate.
    Include(&'static [&'static str]),
}

impl FieldScope {
    /// Whether the given top-level key participates under this scope.
    pub fn admits(&self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exclude(keys) => !keys.contains(&key),
            Self::Include(keys) => keys.contains(&key),
        }
    }
}

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructors are `CanonicalBytes::new()` and `CanonicalBytes::scoped()`.
/// - Object keys are sorted, separators are compact (RFC 8785).
/// - Scoped bytes never contain a top-level key the scope does not admit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value cannot
    /// be represented as JSON or JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        Self::scoped(obj, FieldScope::All)
    }

    /// Construct canonical bytes over the top-level keys admitted by `scope`.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::NotAnObject` if a restricting scope is
    /// applied to a value that does not serialize to a JSON object.
    pub fn scoped(obj: &impl Serialize, scope: FieldScope) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let value = apply_scope(value, scope)?;
        let bytes = serialize_canonical(&value)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn apply_scope(value: Value, scope: FieldScope) -> Result<Value, CanonicalizationError> {
    if scope == FieldScope::All {
        return Ok(value);
    }

    match value {
        Value::Object(map) => Ok(Value::Object(
            map.into_iter().filter(|(k, _)| scope.admits(k)).collect(),
        )),
        other => Err(CanonicalizationError::NotAnObject(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serialize a JSON value in JCS-canonical form (RFC 8785).
fn serialize_canonical(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    let s = serde_jcs::to_string(value)?;
    Ok(s.into_bytes())
}
