//! Revocation ledger trait defining the interface for revoked-token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::RevocationEntry;
use crate::errors::DomainError;

/// Repository trait for the revocation ledger
///
/// The ledger is append-only. Appending the same token twice is not an error.
/// Lookups match the exact raw token string.
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Append a revocation entry
    ///
    /// # Arguments
    /// * `entry` - Entry holding the raw token
    ///
    /// # Returns
    /// * `Ok(())` - Entry recorded, or the token was already revoked
    /// * `Err(DomainError)` - Store error occurred
    async fn append(&self, entry: RevocationEntry) -> Result<(), DomainError>;

    /// Check whether a raw token has been revoked
    ///
    /// # Returns
    /// * `Ok(true)` - A matching entry exists
    /// * `Ok(false)` - No matching entry
    /// * `Err(DomainError)` - Store error occurred
    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError>;

    /// Delete entries whose credential expired before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    /// * `Err(DomainError)` - Store error occurred
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
