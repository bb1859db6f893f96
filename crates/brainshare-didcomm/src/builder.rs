//! Constructors for outbound protocol messages.
//!
//! One constructor per outbound type. Requests that expect a synchronous
//! reply carry `return_route: "all"`; replies carry `thid` set to the
//! request id they answer.

use serde_json::json;

use brainshare_core::{ContentDigest, Did};
use brainshare_vc::VerifiableCredential;

use crate::envelope::{Message, RETURN_ROUTE_ALL};
use crate::types::BrainShareMessageType;

fn addressed(message_type: BrainShareMessageType, from: &Did, to: &Did) -> Message {
    let mut msg = Message::new(message_type.uri());
    msg.from = Some(from.as_str().to_string());
    msg.to = Some(to.as_str().to_string());
    msg
}

/// A `post` message publishing a credential to the recipient.
pub fn create_post_message(post: &VerifiableCredential, from: &Did, to: &Did) -> Message {
    let mut msg = addressed(BrainShareMessageType::Post, from, to);
    msg.body = json!({ "post": post });
    msg
}

/// A `check-domain-linkage` message asking the recipient to verify the
/// sender's claimed domain.
pub fn create_check_domain_linkage_message(domain: &str, from: &Did, to: &Did) -> Message {
    let mut msg = addressed(BrainShareMessageType::CheckDomainLinkage, from, to);
    msg.body = json!({ "domain": domain });
    msg
}

/// A `request-post` message asking the recipient for its latest post with
/// the given title.
pub fn create_request_post_message(title: &str, from: &Did, to: &Did) -> Message {
    let mut msg = addressed(BrainShareMessageType::RequestPost, from, to);
    msg.body = json!({ "title": title });
    msg.return_route = Some(RETURN_ROUTE_ALL.to_string());
    msg
}

/// A `request-credential` message asking for a credential by content hash.
pub fn create_request_credential_message(hash: &ContentDigest, from: &Did, to: &Did) -> Message {
    let mut msg = addressed(BrainShareMessageType::RequestCredential, from, to);
    msg.body = json!({ "credentialHash": hash });
    msg.return_route = Some(RETURN_ROUTE_ALL.to_string());
    msg
}

/// A `request-index` message asking for the recipient's index credential.
pub fn create_request_index_message(from: &Did, to: &Did) -> Message {
    let mut msg = addressed(BrainShareMessageType::RequestIndex, from, to);
    msg.body = json!({});
    msg.return_route = Some(RETURN_ROUTE_ALL.to_string());
    msg
}

/// A `return-credential` reply disclosing a credential, correlated to the
/// request via `thid`.
pub fn create_return_credential_message(
    hash: &ContentDigest,
    credential: &VerifiableCredential,
    from: &Did,
    to: &Did,
    thid: &str,
) -> Message {
    let mut msg = addressed(BrainShareMessageType::ReturnCredential, from, to);
    msg.thid = Some(thid.to_string());
    msg.body = json!({ "hash": hash, "verifiableCredential": credential });
    msg
}

/// A `return-index` reply carrying the index credential and its hash,
/// correlated to the request via `thid`.
pub fn create_return_index_message(
    index: &VerifiableCredential,
    hash: &ContentDigest,
    from: &Did,
    to: &Did,
    thid: &str,
) -> Message {
    let mut msg = addressed(BrainShareMessageType::ReturnIndex, from, to);
    msg.thid = Some(thid.to_string());
    msg.body = json!({ "index": index, "hash": hash });
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainshare_vc::{ContextValue, IssuerRef};
    use serde_json::json;

    fn did(s: &str) -> Did {
        Did::new(s).unwrap()
    }

    fn make_credential() -> VerifiableCredential {
        VerifiableCredential {
            context: ContextValue::default(),
            id: None,
            types: vec![
                "VerifiableCredential".to_string(),
                "BrainSharePost".to_string(),
            ],
            issuer: IssuerRef::Object {
                id: did("did:web:a.example"),
            },
            issuance_date: chrono::Utc::now(),
            expiration_date: None,
            credential_subject: json!({"title": "Hello"}),
            proof: json!({"type": "JwtProof2020", "jwt": "eyJ..."}),
        }
    }

    #[test]
    fn requests_carry_return_route_all() {
        let from = did("did:web:sender.example");
        let to = did("did:web:recipient.example");
        for msg in [
            create_request_post_message("Hello", &from, &to),
            create_request_credential_message(
                &ContentDigest::from_hex("a".repeat(64)).unwrap(),
                &from,
                &to,
            ),
            create_request_index_message(&from, &to),
        ] {
            assert!(msg.wants_return_route(), "{}", msg.message_type);
            assert_eq!(msg.from.as_deref(), Some("did:web:sender.example"));
            assert_eq!(msg.to.as_deref(), Some("did:web:recipient.example"));
            assert!(msg.thid.is_none());
        }
    }

    #[test]
    fn fire_and_forget_messages_do_not_ask_for_return_route() {
        let from = did("did:web:sender.example");
        let to = did("did:web:recipient.example");
        let post = create_post_message(&make_credential(), &from, &to);
        assert!(!post.wants_return_route());
        let check = create_check_domain_linkage_message("sender.example", &from, &to);
        assert!(!check.wants_return_route());
        assert_eq!(check.body, json!({"domain": "sender.example"}));
    }

    #[test]
    fn replies_are_thid_correlated() {
        let from = did("did:web:recipient.example");
        let to = did("did:web:sender.example");
        let vc = make_credential();
        let hash = vc.content_hash().unwrap();

        let reply = create_return_credential_message(&hash, &vc, &from, &to, "req-42");
        assert_eq!(reply.thid.as_deref(), Some("req-42"));
        assert_eq!(
            reply.body.get("hash").and_then(|v| v.as_str()),
            Some(hash.to_hex())
        );

        let index_reply = create_return_index_message(&vc, &hash, &from, &to, "req-43");
        assert_eq!(index_reply.thid.as_deref(), Some("req-43"));
        assert!(index_reply.body.get("index").is_some());
    }

    #[test]
    fn each_message_gets_a_fresh_id() {
        let from = did("did:web:a.example");
        let to = did("did:web:b.example");
        let m1 = create_request_index_message(&from, &to);
        let m2 = create_request_index_message(&from, &to);
        assert_ne!(m1.id, m2.id);
    }
}
