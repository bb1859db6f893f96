//! # brainshare-core — Shared Protocol Primitives
//!
//! Foundation types used across the BrainShare workspace:
//!
//! - [`Did`] — a validated W3C Decentralized Identifier newtype. Every
//!   BrainShare message names its sender and recipient by DID.
//! - [`CanonicalBytes`] — deterministic JSON serialization. The only
//!   sanctioned input to digest computation, so that the same credential
//!   always produces the same storage key.
//! - [`ContentDigest`] — a SHA-256 digest in lowercase hex, used as the
//!   content-addressed key for stored credentials.
//!
//! Identifiers validate at construction time and at deserialization time;
//! a [`Did`] in hand is always well-formed.

mod canonical;
mod did;
mod error;

pub use canonical::{sha256_digest, CanonicalBytes, ContentDigest};
pub use did::Did;
pub use error::ValidationError;
