//! # brainshare-dns — Domain Verification
//!
//! Answers one protocol question: does the DNS zone of a claimed domain
//! reference the claimant's DID? The check-domain-linkage step queries the
//! TXT record at `_brainshare.<domain>` and looks for the DID as a
//! substring of any returned record.
//!
//! Resolution is pluggable through [`TxtResolver`]. Failures degrade to an
//! empty record set rather than raising: "no records", "lookup failed",
//! and "records present but non-matching" are all the same negative
//! outcome, and no credential is issued.

mod resolver;
mod verifier;

pub use resolver::{HickoryTxtResolver, StaticTxtResolver, TxtResolver};
pub use verifier::{DnsVerifierConfig, DomainVerifier, LinkageOutcome};
