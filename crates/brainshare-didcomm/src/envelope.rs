//! The transport message envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use brainshare_vc::VerifiableCredential;

/// `return_route` value indicating the sender can take a synchronous reply
/// over the same inbound channel.
pub const RETURN_ROUTE_ALL: &str = "all";

/// A `{type, value}` annotation handlers attach as a side channel to the
/// caller that invoked the dispatcher. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaData {
    /// Annotation kind (e.g. `"BrainShare Post"`, `"ReturnRouteResponse"`).
    #[serde(rename = "type")]
    pub meta_type: String,
    /// Annotation payload.
    pub value: String,
}

/// One unit of the outer transport.
///
/// `from`/`to` stay plain strings here; the dispatcher validates them into
/// [`brainshare_core::Did`] values, treating malformed ones like absent
/// ones. `metadata` and `credentials` are handler outputs, not wire
/// payload on the responding side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier, generated by the sender.
    pub id: String,

    /// Type URI selecting the protocol step.
    #[serde(rename = "type")]
    pub message_type: String,

    /// Sender DID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Recipient DID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Thread id: on a response, the `id` of the request it answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thid: Option<String>,

    /// Type-specific payload.
    #[serde(default)]
    pub body: Value,

    /// `"all"` when the sender accepts a synchronous reply over the same
    /// channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_route: Option<String>,

    /// Append-only handler annotations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetaData>,

    /// Credentials extracted from embedded free-text content.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credentials: Vec<VerifiableCredential>,
}

impl Message {
    /// A new message of the given type with a fresh v4 id.
    pub fn new(message_type: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            message_type: message_type.into(),
            from: None,
            to: None,
            thid: None,
            body: Value::Null,
            return_route: None,
            metadata: Vec::new(),
            credentials: Vec::new(),
        }
    }

    /// Append a `{type, value}` annotation.
    pub fn add_metadata(&mut self, meta_type: impl Into<String>, value: impl Into<String>) {
        self.metadata.push(MetaData {
            meta_type: meta_type.into(),
            value: value.into(),
        });
    }

    /// First annotation of the given kind, if any.
    pub fn metadata_value(&self, meta_type: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|m| m.meta_type == meta_type)
            .map(|m| m.value.as_str())
    }

    /// Whether the sender asked for a synchronous same-channel reply.
    pub fn wants_return_route(&self) -> bool {
        self.return_route.as_deref() == Some(RETURN_ROUTE_ALL)
    }
}
