//! Wire-format fidelity: the JSON spelled out by each layer must match
//! the protocol's key names exactly and survive a round trip unchanged.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde_json::json;

use brainshare_core::{ContentDigest, Did};
use brainshare_didcomm::testing::JsonPacker;
use brainshare_didcomm::{
    create_return_credential_message, MediaType, Message, MessagePacker, PackedMessage,
    PackingScheme,
};
use brainshare_vc::{
    credential_from_jwt, ContextValue, IssuerRef, VerifiableCredential, POST_CREDENTIAL_TYPE,
    VERIFIABLE_CREDENTIAL_TYPE,
};

fn sample_credential() -> VerifiableCredential {
    VerifiableCredential {
        context: ContextValue::default(),
        id: Some("urn:uuid:5f2b7c2e-1".to_string()),
        types: vec![
            VERIFIABLE_CREDENTIAL_TYPE.to_string(),
            POST_CREDENTIAL_TYPE.to_string(),
        ],
        issuer: IssuerRef::Object {
            id: Did::new("did:web:alice.example").unwrap(),
        },
        issuance_date: Utc::now(),
        expiration_date: None,
        credential_subject: json!({"title": "Hello", "post": "body", "isPublic": true}),
        proof: json!({"type": "JwtProof2020", "jwt": "a.b.c"}),
    }
}

#[test]
fn return_credential_message_uses_protocol_keys() {
    let vc = sample_credential();
    let hash = vc.content_hash().unwrap();
    let msg = create_return_credential_message(
        &hash,
        &vc,
        &Did::new("did:web:bob.example").unwrap(),
        &Did::new("did:web:alice.example").unwrap(),
        "req-1",
    );
    let val = serde_json::to_value(&msg).unwrap();

    assert_eq!(
        val["type"],
        json!("https://veramo.io/didcomm/brainshare/1.0/return-credential")
    );
    assert_eq!(val["thid"], json!("req-1"));
    assert_eq!(val["body"]["hash"], json!(hash.to_hex()));
    assert!(val["body"]["verifiableCredential"].is_object());
    assert_eq!(
        val["body"]["verifiableCredential"]["credentialSubject"]["title"],
        json!("Hello")
    );
}

#[test]
fn envelope_with_annotations_round_trips() {
    let mut msg = Message::new("https://veramo.io/didcomm/brainshare/1.0/post");
    msg.from = Some("did:web:alice.example".to_string());
    msg.to = Some("did:web:bob.example".to_string());
    msg.body = json!({"post": sample_credential()});
    msg.add_metadata("BrainShare Post", "saved");
    msg.credentials.push(sample_credential());

    let text = serde_json::to_string(&msg).unwrap();
    let back: Message = serde_json::from_str(&text).unwrap();
    assert_eq!(back, msg);

    let val: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(val["metadata"][0]["type"], json!("BrainShare Post"));
    assert_eq!(val["metadata"][0]["value"], json!("saved"));
}

#[test]
fn content_digest_is_spelled_as_lowercase_hex() {
    let vc = sample_credential();
    let hash = vc.content_hash().unwrap();
    let val = serde_json::to_value(&hash).unwrap();
    let text = val.as_str().expect("digest serializes as a string");
    assert_eq!(text.len(), 64);
    assert!(text.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let back: ContentDigest = serde_json::from_value(val).unwrap();
    assert_eq!(back, hash);
}

#[tokio::test]
async fn packed_message_keys_and_round_trip() {
    let mut msg = Message::new("https://veramo.io/didcomm/brainshare/1.0/request-post");
    msg.from = Some("did:web:alice.example".to_string());
    msg.to = Some("did:web:bob.example".to_string());
    msg.body = json!({"title": "Hello"});

    let packed = JsonPacker.pack(&msg, PackingScheme::AuthCrypt).await.unwrap();
    assert_eq!(packed.id, msg.id);
    assert_eq!(packed.content_type, MediaType::Encrypted);

    let val = serde_json::to_value(&packed).unwrap();
    assert_eq!(
        val["contentType"],
        json!("application/didcomm-encrypted+json")
    );

    let back: PackedMessage = serde_json::from_value(val).unwrap();
    let unpacked = JsonPacker.unpack(&back).await.unwrap();
    assert_eq!(unpacked, msg);
}

#[test]
fn jwt_extraction_preserves_registered_claim_overrides() {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"EdDSA","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::to_vec(&json!({
            "iss": "did:web:carol.example",
            "jti": "urn:uuid:override-id",
            "nbf": 1_756_000_000,
            "vc": {
                "@context": ["https://www.w3.org/2018/credentials/v1"],
                "type": ["VerifiableCredential", "BrainSharePost"],
                "issuer": {"id": "did:web:ignored.example"},
                "credentialSubject": {"title": "From token"}
            }
        }))
        .unwrap(),
    );
    let token = format!("{header}.{payload}.c2ln");

    let vc = credential_from_jwt(&token).unwrap();
    assert_eq!(vc.issuer.id().as_str(), "did:web:carol.example");
    assert_eq!(vc.id.as_deref(), Some("urn:uuid:override-id"));
    assert_eq!(vc.subject_claim("title"), Some(&json!("From token")));
    // The original compact token travels along as the proof.
    assert_eq!(vc.proof["jwt"], json!(token));
}
