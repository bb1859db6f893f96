//! Credential envelope, drafts, and content hashing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use brainshare_core::{sha256_digest, CanonicalBytes, ContentDigest, Did};

use crate::engine::VcError;

/// The W3C credentials v1 JSON-LD context.
pub const CREDENTIAL_CONTEXT_V1: &str = "https://www.w3.org/2018/credentials/v1";

/// Base type every credential carries.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// Type tag for a published BrainShare post.
pub const POST_CREDENTIAL_TYPE: &str = "BrainSharePost";

/// Type tag for a BrainShare index credential (the issuer's table of contents).
pub const INDEX_CREDENTIAL_TYPE: &str = "BrainShareIndex";

/// Type tag for a DNS-anchored domain-linkage credential.
pub const DOMAIN_LINKAGE_CREDENTIAL_TYPE: &str = "BrainShareDomainLinkage";

/// JSON-LD `@context` value: a single URI or an array of URIs/objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Single context URI string.
    Single(String),
    /// Array of context URI strings or objects.
    Array(Vec<Value>),
}

impl Default for ContextValue {
    fn default() -> Self {
        Self::Array(vec![Value::String(CREDENTIAL_CONTEXT_V1.to_string())])
    }
}

/// Credential issuer: either a bare DID string or a `{"id": ...}` object.
///
/// Both spellings occur on the wire; `id()` gives uniform access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssuerRef {
    /// Bare DID string.
    Did(Did),
    /// Object form with an `id` field.
    Object {
        /// The issuer DID.
        id: Did,
    },
}

impl IssuerRef {
    /// The issuer DID, regardless of spelling.
    pub fn id(&self) -> &Did {
        match self {
            IssuerRef::Did(did) => did,
            IssuerRef::Object { id } => id,
        }
    }
}

impl From<Did> for IssuerRef {
    fn from(did: Did) -> Self {
        IssuerRef::Object { id: did }
    }
}

/// An issuer-signed claim set.
///
/// The envelope is rigid; `credentialSubject` and `proof` are open values.
/// This core never mutates a credential's signed content: it only verifies
/// (through the engine), stores, and queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// JSON-LD context URIs.
    #[serde(rename = "@context", default)]
    pub context: ContextValue,

    /// Credential identifier (URN or DID URL), when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Credential type set. Must include `"VerifiableCredential"`.
    #[serde(rename = "type")]
    pub types: Vec<String>,

    /// The issuing DID.
    pub issuer: IssuerRef,

    /// When the credential was issued (UTC).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: DateTime<Utc>,

    /// Optional expiration date (UTC).
    #[serde(
        rename = "expirationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<DateTime<Utc>>,

    /// The claim set, intentionally extensible per the W3C spec.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Value,

    /// Proof object(s), carried verbatim. Proof formats are the external
    /// engine's concern.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub proof: Value,
}

impl VerifiableCredential {
    /// Whether the type set contains `tag`.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }

    /// The full type set as the comma-joined string used as a claims-query
    /// filter value (e.g. `"VerifiableCredential,BrainSharePost"`).
    pub fn type_set_string(&self) -> String {
        self.types.join(",")
    }

    /// Look up a claim on the subject by key.
    pub fn subject_claim(&self, key: &str) -> Option<&Value> {
        self.credential_subject.get(key)
    }

    /// The disclosure gate: true only when the subject explicitly marks the
    /// credential public. Accepts the legacy `shouldBeIndexed` claim name
    /// as an alias; `isPublic` wins when both are present. Absent means
    /// not public.
    pub fn is_public(&self) -> bool {
        if let Some(flag) = self.subject_claim("isPublic") {
            return flag == &Value::Bool(true);
        }
        self.subject_claim("shouldBeIndexed") == Some(&Value::Bool(true))
    }

    /// Compute the content hash used as this credential's storage key:
    /// SHA-256 over the canonical JSON form, proof included.
    pub fn content_hash(&self) -> Result<ContentDigest, VcError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(sha256_digest(&canonical))
    }
}

/// The unsigned credential shape handed to the external engine for issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialDraft {
    /// JSON-LD context URIs.
    #[serde(rename = "@context", default)]
    pub context: ContextValue,

    /// Credential type set.
    #[serde(rename = "type")]
    pub types: Vec<String>,

    /// The issuing DID.
    pub issuer: IssuerRef,

    /// When the credential is issued (UTC).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: DateTime<Utc>,

    /// The claim set.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Value,
}

impl CredentialDraft {
    /// Draft a credential issued now by `issuer`, with the base
    /// `VerifiableCredential` type plus the given extra types.
    pub fn new(issuer: Did, extra_types: &[&str], credential_subject: Value) -> Self {
        let mut types = vec![VERIFIABLE_CREDENTIAL_TYPE.to_string()];
        types.extend(extra_types.iter().map(|t| t.to_string()));
        Self {
            context: ContextValue::default(),
            types,
            issuer: issuer.into(),
            issuance_date: Utc::now(),
            credential_subject,
        }
    }
}
