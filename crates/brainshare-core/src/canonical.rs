//! Canonical JSON bytes and SHA-256 content digests.
//!
//! Credentials are stored and retrieved by content hash, so the same JSON
//! value must always produce the same bytes. [`CanonicalBytes`] serializes
//! through `serde_jcs` (RFC 8785): object keys sorted by UTF-16 code
//! units, compact separators, no insignificant whitespace.
//!
//! Non-integer numbers are rejected before serialization: their textual
//! form is not stable across serializers, which would split digests
//! between implementations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// Deterministic JSON serialization of a value.
///
/// The only sanctioned input to [`sha256_digest`]; raw byte slices are not
/// accepted there, so every digest in the system is computed from properly
/// canonicalized data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    pub fn new<T: Serialize>(value: &T) -> Result<Self, ValidationError> {
        let val = serde_json::to_value(value)
            .map_err(|e| ValidationError::Canonicalization(e.to_string()))?;
        Self::from_value(val)
    }

    /// Canonicalize an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        reject_non_integers(&value)?;
        let text = serde_jcs::to_string(&value)
            .map_err(|e| ValidationError::Canonicalization(e.to_string()))?;
        Ok(Self(text.into_bytes()))
    }

    /// Access the canonical byte representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Walk a value and refuse any number without an exact integer form.
fn reject_non_integers(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            Err(ValidationError::NonCanonicalNumber(n.to_string()))
        }
        Value::Array(items) => items.iter().try_for_each(reject_non_integers),
        Value::Object(map) => map.values().try_for_each(reject_non_integers),
        _ => Ok(()),
    }
}

/// A SHA-256 digest in lowercase hex, used as a content-addressed key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContentDigest(String);

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(raw).map_err(serde::de::Error::custom)
    }
}

impl ContentDigest {
    /// Construct from a 64-character lowercase hex string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDigest`] on wrong length or
    /// non-hex characters.
    pub fn from_hex(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.len() != 64 || !s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidDigest(s));
        }
        Ok(Self(s))
    }

    /// The digest as a lowercase hex string.
    pub fn to_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// The input must be [`CanonicalBytes`]; raw byte slices are not accepted.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let digest = Sha256::digest(data.as_bytes());
    ContentDigest(hex::encode(digest))
}
