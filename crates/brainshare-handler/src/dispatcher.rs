//! The BrainShare protocol step handler.
//!
//! One chain link implementing every protocol step. Validation comes
//! first: a message missing a required field (or carrying a malformed
//! DID or body) is logged at warn and returned untouched, without any
//! side effect. Collaborator faults (engine, store, DNS, transport)
//! degrade the same way. The handler itself never returns
//! [`HandlerError`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use brainshare_core::Did;
use brainshare_didcomm::{
    create_return_credential_message, create_return_index_message, BrainShareMessageType,
    CheckDomainLinkageBody, Message, PostBody, RequestCredentialBody, RequestPostBody,
    ResponseBuilder, BASIC_MESSAGE_TYPE,
};
use brainshare_store::ClaimQuery;
use brainshare_vc::{
    CredentialDraft, ProofFormat, DOMAIN_LINKAGE_CREDENTIAL_TYPE, INDEX_CREDENTIAL_TYPE,
    POST_CREDENTIAL_TYPE, VERIFIABLE_CREDENTIAL_TYPE,
};

use crate::chain::MessageHandler;
use crate::context::HandlerContext;
use crate::embedded::extract_embedded_credentials;
use crate::error::HandlerError;

/// Metadata kind annotating the outcome of an inbound post.
pub const POST_METADATA_TYPE: &str = "BrainShare Post";

/// Metadata kind annotating the outcome of a domain-linkage check.
pub const DOMAIN_LINKAGE_METADATA_TYPE: &str = "BrainShare Domain Linkage";

fn parse_did(raw: Option<&str>, field: &'static str) -> Option<Did> {
    let raw = match raw {
        Some(raw) => raw,
        None => {
            tracing::warn!(field, "required addressing field missing, message skipped");
            return None;
        }
    };
    match Did::new(raw) {
        Ok(did) => Some(did),
        Err(e) => {
            tracing::warn!(field, error = %e, "malformed DID, message skipped");
            None
        }
    }
}

/// `(from, to)` of the message, or `None` (logged) when either is
/// missing or malformed.
fn addressing(message: &Message) -> Option<(Did, Did)> {
    let from = parse_did(message.from.as_deref(), "from")?;
    let to = parse_did(message.to.as_deref(), "to")?;
    Some((from, to))
}

fn parse_body<T: DeserializeOwned>(message: &Message, step: BrainShareMessageType) -> Option<T> {
    match serde_json::from_value(message.body.clone()) {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!(message_type = %step, error = %e, "malformed body, message skipped");
            None
        }
    }
}

/// The chain link implementing every BrainShare protocol step.
///
/// Stateless; every collaborator comes in through [`HandlerContext`].
#[derive(Debug, Default)]
pub struct BrainShareMessageHandler;

impl BrainShareMessageHandler {
    /// A new handler instance.
    pub fn new() -> Self {
        Self
    }

    /// Pack and deliver a correlated reply, degrading transport faults
    /// to a warning.
    async fn deliver(&self, request: &mut Message, reply: &Message, context: &HandlerContext) {
        let builder = ResponseBuilder::new(context.packer.as_ref(), context.sender.as_ref());
        if let Err(e) = builder.deliver(request, reply).await {
            tracing::warn!(reply_id = %reply.id, error = %e, "reply delivery failed");
        }
    }

    /// `post`: verify the published credential, persist it on success.
    async fn on_post(&self, message: &mut Message, context: &HandlerContext) {
        if addressing(message).is_none() {
            return;
        }
        let Some(body) = parse_body::<PostBody>(message, BrainShareMessageType::Post) else {
            return;
        };

        match context.engine.verify(&body.post).await {
            Ok(true) => match context.store.save(body.post).await {
                Ok(hash) => {
                    tracing::debug!(hash = %hash, "post credential saved");
                    message.add_metadata(POST_METADATA_TYPE, "saved");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "post credential could not be saved");
                }
            },
            Ok(false) => {
                tracing::warn!(message_id = %message.id, "post credential failed verification");
                message.add_metadata(POST_METADATA_TYPE, "unverified");
            }
            Err(e) => {
                tracing::warn!(error = %e, "credential engine fault while verifying post");
            }
        }
    }

    /// `check-domain-linkage`: look for the sender's DID in the domain's
    /// `_brainshare` TXT records; on a match, issue and store a linkage
    /// credential. The outcome is annotated either way.
    async fn on_check_domain_linkage(&self, message: &mut Message, context: &HandlerContext) {
        let Some((from, to)) = addressing(message) else {
            return;
        };
        let Some(body) =
            parse_body::<CheckDomainLinkageBody>(message, BrainShareMessageType::CheckDomainLinkage)
        else {
            return;
        };

        let outcome = context.domain_verifier.verify_linkage(&body.domain, &from).await;
        if outcome.is_matched() {
            let draft = CredentialDraft::new(
                to,
                &[DOMAIN_LINKAGE_CREDENTIAL_TYPE],
                json!({ "id": from.as_str(), "domain": body.domain }),
            );
            match context.engine.create(draft, ProofFormat::Jwt).await {
                Ok(credential) => match context.store.save(credential).await {
                    Ok(hash) => {
                        tracing::debug!(hash = %hash, domain = %body.domain, "linkage credential issued");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "linkage credential could not be saved");
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "linkage credential issuance failed");
                }
            }
        } else {
            tracing::debug!(domain = %body.domain, did = %from, "domain linkage not matched");
        }
        message.add_metadata(DOMAIN_LINKAGE_METADATA_TYPE, outcome.to_string());
    }

    /// `request-post`: look up the recipient's latest post with the
    /// requested title and disclose it if it is marked public.
    async fn on_request_post(&self, message: &mut Message, context: &HandlerContext) {
        let Some((from, to)) = addressing(message) else {
            return;
        };
        let Some(body) = parse_body::<RequestPostBody>(message, BrainShareMessageType::RequestPost)
        else {
            return;
        };

        let query = ClaimQuery::new()
            .with_type_set(format!("{VERIFIABLE_CREDENTIAL_TYPE},{POST_CREDENTIAL_TYPE}"))
            .issued_by(to.clone())
            .with_claim("title", Value::String(body.title.clone()))
            .take(1);
        let found = match context.store.query_by_claims(&query).await {
            Ok(results) => results.into_iter().next(),
            Err(e) => {
                tracing::warn!(error = %e, "post query failed");
                return;
            }
        };

        match found {
            Some(unique) if unique.credential.is_public() => {
                let reply = create_return_credential_message(
                    &unique.hash,
                    &unique.credential,
                    &to,
                    &from,
                    &message.id,
                );
                self.deliver(message, &reply, context).await;
            }
            Some(_) => {
                tracing::debug!(title = %body.title, "matching post is not public, withheld");
            }
            None => {
                tracing::debug!(title = %body.title, "no post with the requested title");
            }
        }
    }

    /// `request-credential`: disclose a stored credential by content
    /// hash, subject to the same public gate as posts.
    async fn on_request_credential(&self, message: &mut Message, context: &HandlerContext) {
        let Some((from, to)) = addressing(message) else {
            return;
        };
        let Some(body) =
            parse_body::<RequestCredentialBody>(message, BrainShareMessageType::RequestCredential)
        else {
            return;
        };

        match context.store.get_by_hash(&body.credential_hash).await {
            Ok(Some(unique)) if unique.credential.is_public() => {
                let reply = create_return_credential_message(
                    &unique.hash,
                    &unique.credential,
                    &to,
                    &from,
                    &message.id,
                );
                self.deliver(message, &reply, context).await;
            }
            Ok(Some(_)) => {
                tracing::debug!(hash = %body.credential_hash, "requested credential is not public, withheld");
            }
            Ok(None) => {
                tracing::debug!(hash = %body.credential_hash, "no credential with the requested hash");
            }
            Err(e) => {
                tracing::warn!(error = %e, "credential lookup failed");
            }
        }
    }

    /// `request-index`: disclose the recipient's latest index credential.
    /// Index credentials are tables of contents and carry no public gate.
    async fn on_request_index(&self, message: &mut Message, context: &HandlerContext) {
        let Some((from, to)) = addressing(message) else {
            return;
        };

        let query = ClaimQuery::new()
            .with_type_set(format!("{VERIFIABLE_CREDENTIAL_TYPE},{INDEX_CREDENTIAL_TYPE}"))
            .issued_by(to.clone())
            .take(1);
        let found = match context.store.query_by_claims(&query).await {
            Ok(results) => results.into_iter().next(),
            Err(e) => {
                tracing::warn!(error = %e, "index query failed");
                return;
            }
        };

        match found {
            Some(unique) => {
                let reply = create_return_index_message(
                    &unique.credential,
                    &unique.hash,
                    &to,
                    &from,
                    &message.id,
                );
                self.deliver(message, &reply, context).await;
            }
            None => {
                tracing::debug!(issuer = %to, "no index credential to return");
            }
        }
    }

    /// Basic messages may carry credentials embedded in markdown fences;
    /// extracted ones are attached for the host to inspect.
    fn on_basic_message(&self, message: &mut Message) {
        let Some(content) = message.body.get("content").and_then(Value::as_str) else {
            return;
        };
        let extracted = extract_embedded_credentials(content);
        if !extracted.is_empty() {
            tracing::debug!(count = extracted.len(), "embedded credentials extracted");
            message.credentials.extend(extracted);
        }
    }
}

#[async_trait]
impl MessageHandler for BrainShareMessageHandler {
    async fn handle(
        &self,
        mut message: Message,
        context: &HandlerContext,
    ) -> Result<Message, HandlerError> {
        if message.message_type == BASIC_MESSAGE_TYPE {
            self.on_basic_message(&mut message);
            return Ok(message);
        }

        let Some(step) = BrainShareMessageType::from_uri(&message.message_type) else {
            return Ok(message);
        };

        match step {
            BrainShareMessageType::Post => self.on_post(&mut message, context).await,
            BrainShareMessageType::RequestPost => {
                self.on_request_post(&mut message, context).await
            }
            BrainShareMessageType::RequestCredential => {
                self.on_request_credential(&mut message, context).await
            }
            BrainShareMessageType::RequestIndex => {
                self.on_request_index(&mut message, context).await
            }
            BrainShareMessageType::CheckDomainLinkage => {
                self.on_check_domain_linkage(&mut message, context).await
            }
            BrainShareMessageType::ReturnCredential | BrainShareMessageType::ReturnIndex => {
                // Replies terminate a thread; the invoking host consumes
                // them via thid correlation.
                tracing::debug!(
                    message_id = %message.id,
                    thid = message.thid.as_deref().unwrap_or(""),
                    "protocol reply received"
                );
            }
        }
        Ok(message)
    }
}
