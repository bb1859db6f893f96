//! TXT record resolution.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Asynchronous TXT lookup.
///
/// Implementations never fail: any resolution error (timeout, NXDOMAIN,
/// server failure) yields an empty record set. Retries, if wanted, belong
/// to the implementation behind this seam.
#[async_trait]
pub trait TxtResolver: Send + Sync {
    /// All TXT strings at `name`, one entry per record, character-strings
    /// of a record concatenated.
    async fn resolve_txt(&self, name: &str) -> Vec<String>;
}

/// Production resolver over hickory's tokio runtime resolver, using the
/// system-default upstream configuration.
pub struct HickoryTxtResolver {
    inner: TokioAsyncResolver,
}

impl HickoryTxtResolver {
    /// Resolver with default upstreams and the given lookup timeout.
    pub fn new(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        Self {
            inner: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
        }
    }
}

#[async_trait]
impl TxtResolver for HickoryTxtResolver {
    async fn resolve_txt(&self, name: &str) -> Vec<String> {
        match self.inner.txt_lookup(name).await {
            Ok(lookup) => lookup
                .iter()
                .map(|record| {
                    record
                        .txt_data()
                        .iter()
                        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                        .collect::<String>()
                })
                .collect(),
            Err(e) => {
                tracing::debug!(name, error = %e, "TXT lookup failed, treating as no records");
                Vec::new()
            }
        }
    }
}

/// Fixed-map resolver for tests and offline wiring.
#[derive(Debug, Default)]
pub struct StaticTxtResolver {
    records: HashMap<String, Vec<String>>,
}

impl StaticTxtResolver {
    /// Empty resolver answering every query with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the TXT strings returned for `name`.
    pub fn with_records(
        mut self,
        name: impl Into<String>,
        records: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.records
            .insert(name.into(), records.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait]
impl TxtResolver for StaticTxtResolver {
    async fn resolve_txt(&self, name: &str) -> Vec<String> {
        self.records.get(name).cloned().unwrap_or_default()
    }
}
