//! Seams to the external secure-messaging transport.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use brainshare_core::Did;

use crate::envelope::Message;

/// Errors from the message layer.
#[derive(Error, Debug)]
pub enum DidCommError {
    /// A field required to build or deliver a message is missing.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A DID string did not validate.
    #[error(transparent)]
    InvalidDid(#[from] brainshare_core::ValidationError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external packing primitive failed.
    #[error("packing failed: {0}")]
    Pack(String),

    /// The external send primitive failed.
    #[error("transport send failed: {0}")]
    Transport(String),
}

/// Packing scheme applied before transport. Every reply is authenticated
/// and encrypted; no plaintext path exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackingScheme {
    /// Authenticated encryption: confidentiality plus sender authentication.
    AuthCrypt,
}

/// Media type of a packed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    /// `application/didcomm-encrypted+json`
    #[serde(rename = "application/didcomm-encrypted+json")]
    Encrypted,
}

/// An encrypted transport envelope ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedMessage {
    /// Id of the plaintext message inside.
    pub id: String,
    /// The packed (encrypted) envelope text.
    pub message: String,
    /// Envelope media type.
    #[serde(rename = "contentType")]
    pub content_type: MediaType,
}

/// The external pack/unpack primitive.
///
/// `unpack(pack(m))` must be loss-free for every defined body shape.
#[async_trait]
pub trait MessagePacker: Send + Sync {
    /// Encrypt a message for its recipient under the given scheme.
    async fn pack(
        &self,
        message: &Message,
        scheme: PackingScheme,
    ) -> Result<PackedMessage, DidCommError>;

    /// Decrypt a packed envelope back into a message.
    async fn unpack(&self, packed: &PackedMessage) -> Result<Message, DidCommError>;
}

/// The external outbound send primitive.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Deliver a packed envelope to the recipient's transport endpoint.
    async fn send(&self, packed: &PackedMessage, recipient: &Did) -> Result<(), DidCommError>;
}
