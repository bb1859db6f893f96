//! In-memory transport fakes for tests and offline wiring.
//!
//! [`JsonPacker`] stands in for the external authcrypt primitive with a
//! reversible base64 encoding, so tests can assert `unpack(pack(m)) == m`.
//! [`RecordingSender`] captures outbound envelopes instead of delivering
//! them.

use std::sync::Mutex;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use brainshare_core::Did;

use crate::envelope::Message;
use crate::transport::{DidCommError, MediaType, MessagePacker, MessageSender, PackedMessage, PackingScheme};

/// Reversible stand-in for the external packing primitive: base64 of the
/// message JSON. Not encryption; test use only.
#[derive(Debug, Default)]
pub struct JsonPacker;

#[async_trait]
impl MessagePacker for JsonPacker {
    async fn pack(
        &self,
        message: &Message,
        _scheme: PackingScheme,
    ) -> Result<PackedMessage, DidCommError> {
        Ok(PackedMessage {
            id: message.id.clone(),
            message: STANDARD.encode(serde_json::to_vec(message)?),
            content_type: MediaType::Encrypted,
        })
    }

    async fn unpack(&self, packed: &PackedMessage) -> Result<Message, DidCommError> {
        let bytes = STANDARD
            .decode(&packed.message)
            .map_err(|e| DidCommError::Pack(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Sender that records every envelope instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(PackedMessage, Did)>>,
}

impl RecordingSender {
    /// New empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every `(envelope, recipient)` pair sent so far.
    pub fn sent(&self) -> Vec<(PackedMessage, Did)> {
        self.sent.lock().expect("sender mutex poisoned").clone()
    }

    /// Number of envelopes sent.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("sender mutex poisoned").len()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, packed: &PackedMessage, recipient: &Did) -> Result<(), DidCommError> {
        self.sent
            .lock()
            .expect("sender mutex poisoned")
            .push((packed.clone(), recipient.clone()));
        Ok(())
    }
}
