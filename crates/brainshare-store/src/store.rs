//! Store trait, query types, and errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use brainshare_core::{ContentDigest, Did};
use brainshare_vc::{VcError, VerifiableCredential};

/// Errors from credential store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The credential could not be hashed for storage.
    #[error("credential hashing failed: {0}")]
    Hashing(#[from] VcError),

    /// The storage backend failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// A stored credential together with its content-hash storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueCredential {
    /// SHA-256 content hash, the storage key.
    pub hash: ContentDigest,
    /// The stored credential.
    #[serde(rename = "verifiableCredential")]
    pub credential: VerifiableCredential,
}

/// Result ordering for claims queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Issuance date descending (the latest credential first).
    #[default]
    NewestFirst,
    /// Issuance date ascending.
    OldestFirst,
}

/// A conjunctive claims query: every set filter must match.
#[derive(Debug, Clone, Default)]
pub struct ClaimQuery {
    /// Full type-set filter, comma-joined
    /// (e.g. `"VerifiableCredential,BrainSharePost"`).
    pub credential_type: Option<String>,
    /// Issuer DID filter.
    pub issuer: Option<Did>,
    /// Subject claim equality filter (key, value).
    pub claim: Option<(String, Value)>,
    /// Result ordering by issuance date.
    pub order: SortOrder,
    /// Maximum number of results.
    pub take: Option<usize>,
}

impl ClaimQuery {
    /// Empty query matching every stored credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the full comma-joined type set.
    pub fn with_type_set(mut self, type_set: impl Into<String>) -> Self {
        self.credential_type = Some(type_set.into());
        self
    }

    /// Filter on the issuer DID.
    pub fn issued_by(mut self, issuer: Did) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Filter on a subject claim's key and value.
    pub fn with_claim(mut self, key: impl Into<String>, value: Value) -> Self {
        self.claim = Some((key.into(), value));
        self
    }

    /// Limit the result count.
    pub fn take(mut self, n: usize) -> Self {
        self.take = Some(n);
        self
    }

    /// Whether a credential satisfies every set filter.
    pub fn matches(&self, credential: &VerifiableCredential) -> bool {
        if let Some(type_set) = &self.credential_type {
            if credential.type_set_string() != *type_set {
                return false;
            }
        }
        if let Some(issuer) = &self.issuer {
            if credential.issuer.id() != issuer {
                return false;
            }
        }
        if let Some((key, value)) = &self.claim {
            if credential.subject_claim(key) != Some(value) {
                return false;
            }
        }
        true
    }
}

/// Async credential store consumed by the dispatcher.
///
/// Every result is a value or an explicit "not found"; there are no silent
/// defaults.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a credential under its content hash. Idempotent on
    /// duplicate hash; returns the hash either way.
    async fn save(&self, credential: VerifiableCredential) -> Result<ContentDigest, StoreError>;

    /// Fetch a credential by content hash.
    async fn get_by_hash(
        &self,
        hash: &ContentDigest,
    ) -> Result<Option<UniqueCredential>, StoreError>;

    /// Query credentials by claims, ordered and limited per the query.
    async fn query_by_claims(
        &self,
        query: &ClaimQuery,
    ) -> Result<Vec<UniqueCredential>, StoreError>;
}
