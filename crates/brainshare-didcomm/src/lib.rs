//! # brainshare-didcomm — Protocol Message Layer
//!
//! Everything between the dispatcher and the wire:
//!
//! - [`Message`] — the transport envelope with the append-only metadata
//!   side channel handlers use to talk back to the invoking transport.
//! - [`BrainShareMessageType`] — the protocol's type URIs and typed bodies
//!   for every step (post, request/return credential, request/return
//!   index, check-domain-linkage).
//! - Constructors for each outbound message, mirroring the protocol table.
//! - [`MessagePacker`] / [`MessageSender`] — the seams to the external
//!   secure-messaging transport. Packing always uses authenticated
//!   encryption; no plaintext replies exist.
//! - [`ResponseBuilder`] — builds the `thid`-correlated reply and picks the
//!   delivery path: inline return-route metadata when the request allows
//!   it, an outbound send otherwise.

mod body;
mod builder;
mod envelope;
mod response;
pub mod testing;
mod transport;
mod types;

pub use body::{
    CheckDomainLinkageBody, PostBody, RequestCredentialBody, RequestIndexBody, RequestPostBody,
    ReturnCredentialBody, ReturnIndexBody,
};
pub use builder::{
    create_check_domain_linkage_message, create_post_message, create_request_credential_message,
    create_request_index_message, create_request_post_message, create_return_credential_message,
    create_return_index_message,
};
pub use envelope::{MetaData, Message, RETURN_ROUTE_ALL};
pub use response::{ResponseBuilder, RETURN_ROUTE_RESPONSE_METADATA};
pub use transport::{DidCommError, MediaType, MessagePacker, MessageSender, PackedMessage, PackingScheme};
pub use types::{BrainShareMessageType, BASIC_MESSAGE_TYPE, BRAINSHARE_TYPE_PREFIX};
