//! Domain-linkage verification.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use brainshare_core::Did;

use crate::resolver::{HickoryTxtResolver, TxtResolver};

fn default_record_prefix() -> String {
    "_brainshare".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

/// Configuration for the domain verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsVerifierConfig {
    /// Label prepended to the claimed domain for the TXT query.
    #[serde(default = "default_record_prefix")]
    pub record_prefix: String,
    /// Lookup timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DnsVerifierConfig {
    fn default() -> Self {
        Self {
            record_prefix: default_record_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Result of a domain-linkage check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkageOutcome {
    /// Some TXT record at the verification name references the DID.
    Matched,
    /// No records, lookup failure, or records without the DID. These are
    /// deliberately indistinguishable.
    NotMatched,
}

impl LinkageOutcome {
    /// Whether the domain is linked to the DID.
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched)
    }
}

impl std::fmt::Display for LinkageOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::NotMatched => write!(f, "not-matched"),
        }
    }
}

/// Checks whether a domain's DNS zone references a claimed DID.
#[derive(Clone)]
pub struct DomainVerifier {
    resolver: Arc<dyn TxtResolver>,
    config: DnsVerifierConfig,
}

impl DomainVerifier {
    /// Verifier over the given resolver with default configuration.
    pub fn new(resolver: Arc<dyn TxtResolver>) -> Self {
        Self::with_config(resolver, DnsVerifierConfig::default())
    }

    /// Verifier with explicit configuration.
    pub fn with_config(resolver: Arc<dyn TxtResolver>, config: DnsVerifierConfig) -> Self {
        Self { resolver, config }
    }

    /// Verifier over the system DNS resolver.
    pub fn system(config: DnsVerifierConfig) -> Self {
        let resolver = Arc::new(HickoryTxtResolver::new(Duration::from_secs(
            config.timeout_secs,
        )));
        Self { resolver, config }
    }

    /// The TXT name queried for `domain`
    /// (e.g. `_brainshare.example.com` for `example.com`).
    pub fn record_name(&self, domain: &str) -> String {
        format!("{}.{}", self.config.record_prefix, domain)
    }

    /// Resolve the verification record and check whether any returned TXT
    /// string contains the claimant DID.
    pub async fn verify_linkage(&self, domain: &str, did: &Did) -> LinkageOutcome {
        let name = self.record_name(domain);
        let records = self.resolver.resolve_txt(&name).await;
        tracing::debug!(name = %name, count = records.len(), "TXT records resolved");

        if records.iter().any(|r| r.contains(did.as_str())) {
            LinkageOutcome::Matched
        } else {
            LinkageOutcome::NotMatched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticTxtResolver;

    fn did(s: &str) -> Did {
        Did::new(s).unwrap()
    }

    fn verifier(resolver: StaticTxtResolver) -> DomainVerifier {
        DomainVerifier::new(Arc::new(resolver))
    }

    #[test]
    fn record_name_prefixes_the_domain() {
        let v = verifier(StaticTxtResolver::new());
        assert_eq!(v.record_name("example.com"), "_brainshare.example.com");
    }

    #[tokio::test]
    async fn matches_when_a_record_contains_the_did() {
        let v = verifier(StaticTxtResolver::new().with_records(
            "_brainshare.example.com",
            ["did=did:web:example.com;v=1"],
        ));
        let outcome = v
            .verify_linkage("example.com", &did("did:web:example.com"))
            .await;
        assert!(outcome.is_matched());
    }

    #[tokio::test]
    async fn no_records_and_non_matching_records_are_the_same_outcome() {
        let empty = verifier(StaticTxtResolver::new());
        let wrong = verifier(
            StaticTxtResolver::new()
                .with_records("_brainshare.example.com", ["did=did:web:other.example"]),
        );
        let claimant = did("did:web:example.com");

        let from_empty = empty.verify_linkage("example.com", &claimant).await;
        let from_wrong = wrong.verify_linkage("example.com", &claimant).await;
        assert_eq!(from_empty, from_wrong);
        assert!(!from_empty.is_matched());
    }

    #[tokio::test]
    async fn lookup_goes_to_the_prefixed_name_not_the_apex() {
        // Records at the apex must not satisfy the check.
        let v = verifier(
            StaticTxtResolver::new().with_records("example.com", ["did=did:web:example.com"]),
        );
        let outcome = v
            .verify_linkage("example.com", &did("did:web:example.com"))
            .await;
        assert!(!outcome.is_matched());
    }

    #[test]
    fn config_defaults() {
        let config: DnsVerifierConfig = serde_json::from_str("{}").unwrap_or_default();
        assert_eq!(config.record_prefix, "_brainshare");
        assert_eq!(config.timeout_secs, 5);
    }
}
