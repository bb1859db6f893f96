//! # brainshare-store — Credential Storage
//!
//! The credential store half of the Credential Gateway: content-addressed
//! persistence and claims-based queries over stored credentials.
//!
//! [`CredentialStore`] is the async seam the dispatcher consumes; the
//! production deployment wires a database-backed implementation, while
//! [`MemoryCredentialStore`] serves tests and single-process setups.
//! Duplicate-hash writes are idempotent, so concurrent handling of the same
//! post message is safe. Credentials are never deleted through this
//! interface.

mod memory;
mod store;

pub use memory::MemoryCredentialStore;
pub use store::{ClaimQuery, CredentialStore, SortOrder, StoreError, UniqueCredential};
