//! In-memory implementation of RevocationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use acct_core::domain::entities::RevocationEntry;
use acct_core::errors::DomainError;
use acct_core::repositories::RevocationRepository;

/// Revocation ledger backed by a map keyed by the raw token
///
/// Re-revoking a token keeps the first entry.
#[derive(Default)]
pub struct InMemoryRevocationRepository {
    entries: RwLock<HashMap<String, RevocationEntry>>,
}

impl InMemoryRevocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct revoked tokens
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationRepository for InMemoryRevocationRepository {
    async fn append(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.entry(entry.token.clone()).or_insert(entry);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.entries.read().await.contains_key(token))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_inert_at(now));
        let purged = before - entries.len();

        if purged > 0 {
            tracing::debug!(purged, "Purged in-memory revocation entries");
        }
        Ok(purged)
    }
}
