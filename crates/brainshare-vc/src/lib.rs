//! # brainshare-vc — Verifiable Credentials for BrainShare
//!
//! The W3C Verifiable Credential data model as BrainShare uses it:
//!
//! - [`VerifiableCredential`] — the signed credential envelope. The
//!   envelope structure is rigid while `credentialSubject` stays open, per
//!   the W3C specification. Proof contents are opaque here; signing and
//!   verification belong to the external credential engine.
//! - [`CredentialDraft`] — the unsigned shape handed to issuance.
//! - [`CredentialEngine`] — the async facade over that external engine
//!   (issuance and verification). Verification failure is a normal
//!   `Ok(false)` outcome, never an error.
//! - [`credential_from_jwt`] — payload extraction for credentials embedded
//!   as compact JWTs in free-text messages. Extraction does not verify;
//!   verification still goes through the engine.

mod credential;
mod engine;
mod jwt;
pub mod testing;

pub use credential::{
    ContextValue, CredentialDraft, IssuerRef, VerifiableCredential, CREDENTIAL_CONTEXT_V1,
    DOMAIN_LINKAGE_CREDENTIAL_TYPE, INDEX_CREDENTIAL_TYPE, POST_CREDENTIAL_TYPE,
    VERIFIABLE_CREDENTIAL_TYPE,
};
pub use engine::{CredentialEngine, ProofFormat, VcError};
pub use jwt::credential_from_jwt;
