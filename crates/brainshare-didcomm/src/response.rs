//! Correlated reply delivery.
//!
//! A reply either rides back inline over the inbound channel (when the
//! request carried `return_route: "all"`) or goes out through the
//! transport's send primitive. Both paths pack with authenticated
//! encryption first.

use brainshare_core::Did;

use crate::envelope::Message;
use crate::transport::{DidCommError, MessagePacker, MessageSender, PackingScheme};

/// Metadata key under which an inline reply envelope is attached to the
/// request for the invoking transport to relay.
pub const RETURN_ROUTE_RESPONSE_METADATA: &str = "ReturnRouteResponse";

/// Packs a reply and picks its delivery path.
pub struct ResponseBuilder<'a> {
    packer: &'a dyn MessagePacker,
    sender: &'a dyn MessageSender,
}

impl<'a> ResponseBuilder<'a> {
    /// Build over the transport's pack and send primitives.
    pub fn new(packer: &'a dyn MessagePacker, sender: &'a dyn MessageSender) -> Self {
        Self { packer, sender }
    }

    /// Pack `response` with authcrypt and deliver it.
    ///
    /// When the request asked for a return route, the packed envelope is
    /// attached to the request as `ReturnRouteResponse` metadata and the
    /// invoking transport relays it synchronously. Otherwise the envelope
    /// is sent to the response's recipient through the send primitive.
    pub async fn deliver(
        &self,
        request: &mut Message,
        response: &Message,
    ) -> Result<(), DidCommError> {
        let packed = self.packer.pack(response, PackingScheme::AuthCrypt).await?;

        if request.wants_return_route() {
            let envelope = serde_json::to_string(&packed)?;
            request.add_metadata(RETURN_ROUTE_RESPONSE_METADATA, envelope);
            tracing::debug!(
                response_id = %response.id,
                thid = response.thid.as_deref().unwrap_or(""),
                "reply attached for return-route relay"
            );
        } else {
            let recipient = response
                .to
                .as_deref()
                .ok_or(DidCommError::MissingField("to"))?;
            let recipient = Did::new(recipient)?;
            self.sender.send(&packed, &recipient).await?;
            tracing::debug!(
                response_id = %response.id,
                recipient = %recipient,
                "reply sent through transport"
            );
        }
        Ok(())
    }
}
