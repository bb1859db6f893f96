//! Handler error type.

use thiserror::Error;

/// Fatal handler failures that abort the remainder of a dispatch.
///
/// Protocol-level negatives (missing fields, verification failures, lookup
/// misses, transport faults) are *not* errors: the dispatcher logs them and
/// keeps the chain alive. This type is the escape hatch for custom chain
/// links whose failures genuinely cannot be degraded.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The message layer failed in a way the handler cannot degrade.
    #[error(transparent)]
    DidComm(#[from] brainshare_didcomm::DidCommError),

    /// The credential store failed in a way the handler cannot degrade.
    #[error(transparent)]
    Store(#[from] brainshare_store::StoreError),

    /// The credential engine failed in a way the handler cannot degrade.
    #[error(transparent)]
    Vc(#[from] brainshare_vc::VcError),

    /// Custom handler failure.
    #[error("handler failed: {0}")]
    Other(String),
}
