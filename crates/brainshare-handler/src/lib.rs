//! # brainshare-handler — The Protocol Dispatcher
//!
//! The stateless heart of BrainShare. One inbound message enters
//! [`HandlerChain::dispatch`]; each handler in the ordered chain inspects
//! it and either mutates it, schedules a correlated reply, or passes it
//! through. [`BrainShareMessageHandler`] is the chain link implementing
//! every BrainShare protocol step.
//!
//! ## Failure policy
//!
//! The dispatcher degrades, it does not abort. A missing required field, a
//! credential that fails verification, a store miss, a DNS failure, or a
//! transport fault is logged and the message continues through the chain
//! unmutated. [`HandlerError`] exists for handlers with genuinely fatal
//! conditions; the BrainShare handler itself never returns one.
//!
//! ## Concurrency
//!
//! Handlers hold no mutable state; the host may dispatch distinct messages
//! concurrently as long as the injected store keeps duplicate writes
//! idempotent.

mod chain;
mod context;
mod dispatcher;
mod embedded;
mod error;

pub use chain::{HandlerChain, MessageHandler};
pub use context::HandlerContext;
pub use dispatcher::{
    BrainShareMessageHandler, DOMAIN_LINKAGE_METADATA_TYPE, POST_METADATA_TYPE,
};
pub use embedded::extract_embedded_credentials;
pub use error::HandlerError;
