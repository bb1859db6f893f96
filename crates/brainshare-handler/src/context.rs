//! Collaborator wiring handed to every handler.

use std::sync::Arc;

use brainshare_didcomm::{MessagePacker, MessageSender};
use brainshare_dns::DomainVerifier;
use brainshare_store::CredentialStore;
use brainshare_vc::CredentialEngine;

/// The collaborators a handler may call: the credential engine and store
/// (together, the Credential Gateway), the transport's pack/send
/// primitives, and the domain verifier.
///
/// Plain constructor injection; cloning shares the underlying
/// collaborators.
#[derive(Clone)]
pub struct HandlerContext {
    /// External credential issuance/verification engine.
    pub engine: Arc<dyn CredentialEngine>,
    /// Credential persistence and claims queries.
    pub store: Arc<dyn CredentialStore>,
    /// External packing primitive (authcrypt).
    pub packer: Arc<dyn MessagePacker>,
    /// External outbound send primitive.
    pub sender: Arc<dyn MessageSender>,
    /// DNS-backed domain-linkage verifier.
    pub domain_verifier: DomainVerifier,
}

impl HandlerContext {
    /// Wire a context from its collaborators.
    pub fn new(
        engine: Arc<dyn CredentialEngine>,
        store: Arc<dyn CredentialStore>,
        packer: Arc<dyn MessagePacker>,
        sender: Arc<dyn MessageSender>,
        domain_verifier: DomainVerifier,
    ) -> Self {
        Self {
            engine,
            store,
            packer,
            sender,
            domain_verifier,
        }
    }
}
