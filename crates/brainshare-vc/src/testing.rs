//! Credential-engine stub for tests and offline wiring.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use crate::credential::{CredentialDraft, VerifiableCredential};
use crate::engine::{CredentialEngine, ProofFormat, VcError};

#[derive(Debug, Clone, Copy)]
enum StubOutcome {
    Verdict(bool),
    EngineFault,
}

/// Engine stub with a fixed outcome and counted calls.
///
/// `create` signs nothing: it copies the draft into a credential and
/// attaches a placeholder JWT proof, which is enough for content hashing
/// and store round-trips. The erring mode fails both operations the way a
/// crashed external engine would.
#[derive(Debug)]
pub struct StubCredentialEngine {
    outcome: StubOutcome,
    verify_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl StubCredentialEngine {
    /// Engine that verifies every credential.
    pub fn verifying() -> Self {
        Self::with_verdict(true)
    }

    /// Engine that rejects every credential.
    pub fn rejecting() -> Self {
        Self::with_verdict(false)
    }

    /// Engine with an explicit fixed verdict.
    pub fn with_verdict(verdict: bool) -> Self {
        Self::with_outcome(StubOutcome::Verdict(verdict))
    }

    /// Engine whose every operation fails with [`VcError::Engine`].
    pub fn erring() -> Self {
        Self::with_outcome(StubOutcome::EngineFault)
    }

    fn with_outcome(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            verify_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `verify` calls so far.
    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` calls so far.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialEngine for StubCredentialEngine {
    async fn verify(&self, _credential: &VerifiableCredential) -> Result<bool, VcError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            StubOutcome::Verdict(verdict) => Ok(verdict),
            StubOutcome::EngineFault => Err(VcError::Engine("stub engine failure".to_string())),
        }
    }

    async fn create(
        &self,
        draft: CredentialDraft,
        proof_format: ProofFormat,
    ) -> Result<VerifiableCredential, VcError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let StubOutcome::EngineFault = self.outcome {
            return Err(VcError::Engine("stub engine failure".to_string()));
        }
        Ok(VerifiableCredential {
            context: draft.context,
            id: None,
            types: draft.types,
            issuer: draft.issuer,
            issuance_date: draft.issuance_date,
            expiration_date: None,
            credential_subject: draft.credential_subject,
            proof: json!({ "type": "StubProof", "format": proof_format.to_string() }),
        })
    }
}
