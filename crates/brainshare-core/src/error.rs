//! Validation errors for core identifier and canonicalization types.

use thiserror::Error;

/// Errors from constructing or canonicalizing core types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is not a well-formed `did:method:identifier` DID.
    #[error("invalid DID: {0:?}")]
    InvalidDid(String),

    /// The string is not a 64-character lowercase hex SHA-256 digest.
    #[error("invalid content digest: {0:?}")]
    InvalidDigest(String),

    /// The JSON value contains a non-integer number, which has no stable
    /// canonical form across serializers.
    #[error("cannot canonicalize non-integer number: {0}")]
    NonCanonicalNumber(String),

    /// The JCS serializer failed on the value.
    #[error("canonicalization failed: {0}")]
    Canonicalization(String),
}
