//! MySQL implementation of the RevocationRepository trait.
//!
//! Raw tokens are stored next to their SHA-256 digest. Lookups go through the
//! indexed digest and then compare the raw string, so a match is always an
//! exact string match.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};

use acct_core::domain::entities::RevocationEntry;
use acct_core::errors::DomainError;
use acct_core::repositories::RevocationRepository;

/// MySQL implementation of RevocationRepository
pub struct MySqlRevocationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationRepository {
    /// Create a new MySQL revocation repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a token value using SHA-256
    ///
    /// # Returns
    /// Lowercase hexadecimal digest, 64 characters
    pub fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}

#[async_trait]
impl RevocationRepository for MySqlRevocationRepository {
    async fn append(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO revoked_tokens (token_hash, token, revoked_at, expires_at)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(Self::hash_token(&entry.token))
            .bind(&entry.token)
            .bind(entry.revoked_at)
            .bind(entry.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to revoke token: {}", e) })?;

        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM revoked_tokens WHERE token_hash = ? AND token = ?
            ) AS found
        "#;

        let row = sqlx::query(query)
            .bind(Self::hash_token(token))
            .bind(token)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to check revocation: {}", e) })?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get existence result: {}", e) })?;
        Ok(found == 1)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query(
            "DELETE FROM revoked_tokens WHERE expires_at IS NOT NULL AND expires_at < ?",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal { message: format!("Failed to purge revoked tokens: {}", e) })?;

        Ok(result.rows_affected() as usize)
    }
}
