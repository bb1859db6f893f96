//! Protocol message type URIs.

/// Shared namespace prefix for BrainShare protocol version 1.0.
pub const BRAINSHARE_TYPE_PREFIX: &str = "https://veramo.io/didcomm/brainshare/1.0/";

/// The DIDComm basic-message type the dispatcher also inspects for
/// embedded credentials.
pub const BASIC_MESSAGE_TYPE: &str = "https://didcomm.org/basicmessage/2.0/message";

/// The BrainShare protocol steps, keyed by message type URI.
///
/// Each variant carries its own required-field schema, enforced by the
/// dispatcher before any side effect runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrainShareMessageType {
    /// Publish a post credential to the recipient.
    Post,
    /// Request the latest post with a given title.
    RequestPost,
    /// Request a credential by content hash.
    RequestCredential,
    /// Reply carrying a disclosed credential.
    ReturnCredential,
    /// Request the recipient's index credential.
    RequestIndex,
    /// Reply carrying the index credential and its hash.
    ReturnIndex,
    /// Ask the recipient to verify the sender's domain via DNS.
    CheckDomainLinkage,
}

impl BrainShareMessageType {
    /// Parse a message type URI. `None` for anything outside the
    /// BrainShare 1.0 namespace; the dispatcher falls through on those.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let step = uri.strip_prefix(BRAINSHARE_TYPE_PREFIX)?;
        match step {
            "post" => Some(Self::Post),
            "request-post" => Some(Self::RequestPost),
            "request-credential" => Some(Self::RequestCredential),
            "return-credential" => Some(Self::ReturnCredential),
            "request-index" => Some(Self::RequestIndex),
            "return-index" => Some(Self::ReturnIndex),
            "check-domain-linkage" => Some(Self::CheckDomainLinkage),
            _ => None,
        }
    }

    /// The wire-stable type URI for this step.
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Post => "https://veramo.io/didcomm/brainshare/1.0/post",
            Self::RequestPost => "https://veramo.io/didcomm/brainshare/1.0/request-post",
            Self::RequestCredential => {
                "https://veramo.io/didcomm/brainshare/1.0/request-credential"
            }
            Self::ReturnCredential => "https://veramo.io/didcomm/brainshare/1.0/return-credential",
            Self::RequestIndex => "https://veramo.io/didcomm/brainshare/1.0/request-index",
            Self::ReturnIndex => "https://veramo.io/didcomm/brainshare/1.0/return-index",
            Self::CheckDomainLinkage => {
                "https://veramo.io/didcomm/brainshare/1.0/check-domain-linkage"
            }
        }
    }
}

impl std::fmt::Display for BrainShareMessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BrainShareMessageType; 7] = [
        BrainShareMessageType::Post,
        BrainShareMessageType::RequestPost,
        BrainShareMessageType::RequestCredential,
        BrainShareMessageType::ReturnCredential,
        BrainShareMessageType::RequestIndex,
        BrainShareMessageType::ReturnIndex,
        BrainShareMessageType::CheckDomainLinkage,
    ];

    #[test]
    fn uri_round_trips_for_every_step() {
        for step in ALL {
            assert_eq!(BrainShareMessageType::from_uri(step.uri()), Some(step));
            assert!(step.uri().starts_with(BRAINSHARE_TYPE_PREFIX));
        }
    }

    #[test]
    fn foreign_uris_are_not_brainshare() {
        assert_eq!(BrainShareMessageType::from_uri(BASIC_MESSAGE_TYPE), None);
        assert_eq!(
            BrainShareMessageType::from_uri(
                "https://veramo.io/didcomm/brainshare/1.0/unknown-step"
            ),
            None
        );
        assert_eq!(
            BrainShareMessageType::from_uri("https://veramo.io/didcomm/brainshare/2.0/post"),
            None
        );
    }
}
