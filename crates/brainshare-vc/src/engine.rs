//! The external credential engine facade.
//!
//! Issuance and proof verification live outside this core. The dispatcher
//! only needs two operations, both async and fallible; a failed signature
//! check is a normal `Ok(false)` outcome, not an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credential::{CredentialDraft, VerifiableCredential};

/// Errors from credential operations.
#[derive(Error, Debug)]
pub enum VcError {
    /// Canonicalization of the credential failed (content hashing).
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] brainshare_core::ValidationError),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external engine failed (issuance or verification fault, as
    /// opposed to a negative verification outcome).
    #[error("credential engine error: {0}")]
    Engine(String),

    /// An embedded compact JWT could not be decoded.
    #[error("malformed credential JWT: {0}")]
    MalformedJwt(String),
}

/// Proof format requested from the engine at issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofFormat {
    /// Compact JWT proof.
    Jwt,
    /// Linked-data signature proof.
    Lds,
}

impl std::fmt::Display for ProofFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jwt => write!(f, "jwt"),
            Self::Lds => write!(f, "lds"),
        }
    }
}

/// Async facade over the external credential issuance/verification engine.
#[async_trait]
pub trait CredentialEngine: Send + Sync {
    /// Verify a credential's proof. `Ok(false)` means the proof did not
    /// verify; `Err` means the engine itself failed.
    async fn verify(&self, credential: &VerifiableCredential) -> Result<bool, VcError>;

    /// Issue (sign) a draft credential in the requested proof format.
    async fn create(
        &self,
        draft: CredentialDraft,
        proof_format: ProofFormat,
    ) -> Result<VerifiableCredential, VcError>;
}
