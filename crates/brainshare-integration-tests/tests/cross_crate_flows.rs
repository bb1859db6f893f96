//! End-to-end protocol flows across every crate: publish, request,
//! disclose, and index exchange through a full handler chain wired with
//! in-memory collaborators.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use brainshare_core::Did;
use brainshare_didcomm::testing::{JsonPacker, RecordingSender};
use brainshare_didcomm::{
    create_post_message, create_request_credential_message, create_request_index_message,
    create_request_post_message, BrainShareMessageType, Message, MessagePacker, PackedMessage,
    ReturnCredentialBody, ReturnIndexBody, RETURN_ROUTE_RESPONSE_METADATA,
};
use brainshare_dns::{DomainVerifier, StaticTxtResolver};
use brainshare_store::{CredentialStore, MemoryCredentialStore};
use brainshare_vc::testing::StubCredentialEngine;
use brainshare_vc::{
    ContextValue, CredentialDraft, CredentialEngine, IssuerRef, ProofFormat, VerifiableCredential,
    INDEX_CREDENTIAL_TYPE, POST_CREDENTIAL_TYPE, VERIFIABLE_CREDENTIAL_TYPE,
};
use brainshare_handler::{BrainShareMessageHandler, HandlerChain, HandlerContext};

fn did(s: &str) -> Did {
    Did::new(s).unwrap()
}

struct Node {
    store: Arc<MemoryCredentialStore>,
    sender: Arc<RecordingSender>,
    context: HandlerContext,
    chain: HandlerChain,
}

fn node() -> Node {
    let store = Arc::new(MemoryCredentialStore::new());
    let sender = Arc::new(RecordingSender::new());
    let context = HandlerContext::new(
        Arc::new(StubCredentialEngine::verifying()),
        store.clone(),
        Arc::new(JsonPacker),
        sender.clone(),
        DomainVerifier::new(Arc::new(StaticTxtResolver::new())),
    );
    Node {
        store,
        sender,
        context,
        chain: HandlerChain::new().with(BrainShareMessageHandler::new()),
    }
}

fn post_credential(issuer: &str, title: &str, public: bool) -> VerifiableCredential {
    VerifiableCredential {
        context: ContextValue::default(),
        id: None,
        types: vec![
            VERIFIABLE_CREDENTIAL_TYPE.to_string(),
            POST_CREDENTIAL_TYPE.to_string(),
        ],
        issuer: IssuerRef::Object { id: did(issuer) },
        issuance_date: Utc::now(),
        expiration_date: None,
        credential_subject: json!({
            "title": title,
            "post": format!("# {title}\n\nbody text"),
            "isPublic": public,
        }),
        proof: json!({"type": "JwtProof2020", "jwt": format!("stub.{title}.sig")}),
    }
}

async fn inline_reply(request: &Message) -> Message {
    let attached = request
        .metadata_value(RETURN_ROUTE_RESPONSE_METADATA)
        .expect("inline reply attached");
    let packed: PackedMessage = serde_json::from_str(attached).unwrap();
    JsonPacker.unpack(&packed).await.unwrap()
}

#[tokio::test]
async fn published_post_comes_back_identical_on_request() {
    let bob = node();
    let alice_did = did("did:web:alice.example");
    let bob_did = did("did:web:bob.example");

    // Bob publishes a post to himself (self-addressed store-and-forward).
    let post = post_credential("did:web:bob.example", "Hello", true);
    let publish = create_post_message(&post, &bob_did, &bob_did);
    bob.chain.dispatch(publish, &bob.context).await.unwrap();
    assert_eq!(bob.store.len(), 1);

    // Alice asks for it by title over a return-route channel.
    let request = create_request_post_message("Hello", &alice_did, &bob_did);
    let request_id = request.id.clone();
    let answered = bob.chain.dispatch(request, &bob.context).await.unwrap();

    let reply = inline_reply(&answered).await;
    assert_eq!(
        BrainShareMessageType::from_uri(&reply.message_type),
        Some(BrainShareMessageType::ReturnCredential)
    );
    assert_eq!(reply.thid.as_deref(), Some(request_id.as_str()));
    let body: ReturnCredentialBody = serde_json::from_value(reply.body).unwrap();
    assert_eq!(body.verifiable_credential, post);
    assert_eq!(body.hash, post.content_hash().unwrap());
}

#[tokio::test]
async fn newest_post_wins_when_titles_collide() {
    let bob = node();
    let alice_did = did("did:web:alice.example");
    let bob_did = did("did:web:bob.example");

    let mut old = post_credential("did:web:bob.example", "Hello", true);
    old.issuance_date = Utc::now() - chrono::Duration::days(7);
    let new = post_credential("did:web:bob.example", "Hello", true);

    bob.store.save(old).await.unwrap();
    let new_hash = bob.store.save(new.clone()).await.unwrap();

    let request = create_request_post_message("Hello", &alice_did, &bob_did);
    let answered = bob.chain.dispatch(request, &bob.context).await.unwrap();
    let reply = inline_reply(&answered).await;
    let body: ReturnCredentialBody = serde_json::from_value(reply.body).unwrap();
    assert_eq!(body.hash, new_hash);
    assert_eq!(body.verifiable_credential, new);
}

#[tokio::test]
async fn credential_fetch_by_hash_round_trips() {
    let bob = node();
    let alice_did = did("did:web:alice.example");
    let bob_did = did("did:web:bob.example");

    let post = post_credential("did:web:bob.example", "Deep link", true);
    let hash = bob.store.save(post.clone()).await.unwrap();

    let request = create_request_credential_message(&hash, &alice_did, &bob_did);
    let answered = bob.chain.dispatch(request, &bob.context).await.unwrap();
    let reply = inline_reply(&answered).await;
    let body: ReturnCredentialBody = serde_json::from_value(reply.body).unwrap();
    assert_eq!(body.hash, hash);
    assert_eq!(body.verifiable_credential, post);
}

#[tokio::test]
async fn index_exchange_returns_the_table_of_contents() {
    let bob = node();
    let alice_did = did("did:web:alice.example");
    let bob_did = did("did:web:bob.example");

    // Bob's index credential lists his posts; indexes have no public gate.
    let draft = CredentialDraft::new(
        bob_did.clone(),
        &[INDEX_CREDENTIAL_TYPE],
        json!({"title": "index", "posts": ["Hello", "Deep link"]}),
    );
    let index = StubCredentialEngine::verifying()
        .create(draft, ProofFormat::Jwt)
        .await
        .unwrap();
    let index_hash = bob.store.save(index.clone()).await.unwrap();

    let request = create_request_index_message(&alice_did, &bob_did);
    let answered = bob.chain.dispatch(request, &bob.context).await.unwrap();
    let reply = inline_reply(&answered).await;
    assert_eq!(
        BrainShareMessageType::from_uri(&reply.message_type),
        Some(BrainShareMessageType::ReturnIndex)
    );
    let body: ReturnIndexBody = serde_json::from_value(reply.body).unwrap();
    assert_eq!(body.hash, index_hash);
    assert_eq!(body.index, index);
}

#[tokio::test]
async fn index_request_with_no_index_is_silent() {
    let bob = node();
    let request = create_request_index_message(
        &did("did:web:alice.example"),
        &did("did:web:bob.example"),
    );
    let expected = request.clone();
    let answered = bob.chain.dispatch(request, &bob.context).await.unwrap();
    assert_eq!(answered, expected);
    assert_eq!(bob.sender.sent_count(), 0);
}

#[tokio::test]
async fn private_posts_never_leave_the_node() {
    let bob = node();
    let alice_did = did("did:web:alice.example");
    let bob_did = did("did:web:bob.example");

    let private = post_credential("did:web:bob.example", "Drafts", false);
    let hash = bob.store.save(private).await.unwrap();

    // Neither the title path nor the hash path discloses it.
    let by_title = create_request_post_message("Drafts", &alice_did, &bob_did);
    let answered = bob.chain.dispatch(by_title, &bob.context).await.unwrap();
    assert!(answered.metadata.is_empty());

    let by_hash = create_request_credential_message(&hash, &alice_did, &bob_did);
    let answered = bob.chain.dispatch(by_hash, &bob.context).await.unwrap();
    assert!(answered.metadata.is_empty());
    assert_eq!(bob.sender.sent_count(), 0);
}

#[tokio::test]
async fn basic_message_shares_a_post_out_of_band() {
    let bob = node();
    let shared = post_credential("did:web:alice.example", "From chat", true);
    let embedded = serde_json::to_string_pretty(&shared).unwrap();

    let mut chat = Message::new(brainshare_didcomm::BASIC_MESSAGE_TYPE);
    chat.from = Some("did:web:alice.example".to_string());
    chat.to = Some("did:web:bob.example".to_string());
    chat.body = json!({"content": format!("look at this\n\n```vc+json\n{embedded}\n```\n")});

    let out = bob.chain.dispatch(chat, &bob.context).await.unwrap();
    assert_eq!(out.credentials, vec![shared]);
    // Extraction only attaches; nothing is stored without a post message.
    assert!(bob.store.is_empty());
}
