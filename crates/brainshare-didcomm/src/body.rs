//! Typed bodies for each protocol step.
//!
//! The body shapes are wire-stable JSON; serde renames keep the Rust field
//! names idiomatic while matching the protocol's camelCase keys.

use serde::{Deserialize, Serialize};

use brainshare_core::ContentDigest;
use brainshare_vc::VerifiableCredential;

/// Body of a `post` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostBody {
    /// The post credential being published.
    pub post: VerifiableCredential,
}

/// Body of a `request-post` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPostBody {
    /// Title claim of the requested post.
    pub title: String,
}

/// Body of a `request-credential` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestCredentialBody {
    /// Content hash of the requested credential.
    #[serde(rename = "credentialHash")]
    pub credential_hash: ContentDigest,
}

/// Body of a `return-credential` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnCredentialBody {
    /// Content hash of the disclosed credential.
    pub hash: ContentDigest,
    /// The disclosed credential.
    #[serde(rename = "verifiableCredential")]
    pub verifiable_credential: VerifiableCredential,
}

/// Body of a `request-index` message. Intentionally empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestIndexBody {}

/// Body of a `return-index` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnIndexBody {
    /// The index credential.
    pub index: VerifiableCredential,
    /// Its content hash.
    pub hash: ContentDigest,
}

/// Body of a `check-domain-linkage` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDomainLinkageBody {
    /// The internet domain the sender claims to control.
    pub domain: String,
}
