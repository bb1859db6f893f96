//! Thread-safe in-memory credential store.

use async_trait::async_trait;
use dashmap::DashMap;

use brainshare_core::ContentDigest;
use brainshare_vc::VerifiableCredential;

use crate::store::{ClaimQuery, CredentialStore, SortOrder, StoreError, UniqueCredential};

/// In-memory [`CredentialStore`] backed by a `DashMap` keyed by digest hex.
///
/// Queries scan the full map; fine for the credential counts a single
/// agent holds, and for tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    credentials: DashMap<String, VerifiableCredential>,
}

impl MemoryCredentialStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn save(&self, credential: VerifiableCredential) -> Result<ContentDigest, StoreError> {
        let hash = credential.content_hash()?;
        // entry() keeps the first write; a duplicate save is a no-op.
        self.credentials
            .entry(hash.to_hex().to_string())
            .or_insert(credential);
        tracing::debug!(hash = %hash, "credential saved");
        Ok(hash)
    }

    async fn get_by_hash(
        &self,
        hash: &ContentDigest,
    ) -> Result<Option<UniqueCredential>, StoreError> {
        Ok(self.credentials.get(hash.to_hex()).map(|entry| UniqueCredential {
            hash: hash.clone(),
            credential: entry.value().clone(),
        }))
    }

    async fn query_by_claims(
        &self,
        query: &ClaimQuery,
    ) -> Result<Vec<UniqueCredential>, StoreError> {
        let mut matches: Vec<UniqueCredential> = Vec::new();
        for entry in self.credentials.iter() {
            if query.matches(entry.value()) {
                let hash = ContentDigest::from_hex(entry.key().clone())
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                matches.push(UniqueCredential {
                    hash,
                    credential: entry.value().clone(),
                });
            }
        }

        match query.order {
            SortOrder::NewestFirst => matches
                .sort_by(|a, b| b.credential.issuance_date.cmp(&a.credential.issuance_date)),
            SortOrder::OldestFirst => matches
                .sort_by(|a, b| a.credential.issuance_date.cmp(&b.credential.issuance_date)),
        }

        if let Some(take) = query.take {
            matches.truncate(take);
        }
        Ok(matches)
    }
}
