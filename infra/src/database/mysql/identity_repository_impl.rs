//! MySQL implementation of the IdentityRepository trait.
//!
//! Identities live in the `users` table, keyed by a UUID row id with a
//! unique index on `email`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use acct_core::domain::entities::Identity;
use acct_core::errors::{AuthError, DomainError};
use acct_core::repositories::IdentityRepository;

/// MySQL implementation of IdentityRepository
pub struct MySqlIdentityRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlIdentityRepository {
    /// Create a new MySQL identity repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Identity entity
    fn row_to_identity(row: &sqlx::mysql::MySqlRow) -> Result<Identity, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(Identity {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid identity UUID: {}", e) })?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get email: {}", e) })?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get name: {}", e) })?,
            password_hash: row.try_get("password_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get password_hash: {}", e),
            })?,
            registered_at: row.try_get::<DateTime<Utc>, _>("registered_at").map_err(|e| {
                DomainError::Internal { message: format!("Failed to get registered_at: {}", e) }
            })?,
        })
    }

    /// Map a write error, turning a unique-key violation into a conflict
    fn map_write_error(e: sqlx::Error, action: &str) -> DomainError {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AuthError::EmailAlreadyRegistered.into()
            }
            _ => DomainError::Internal {
                message: format!("Failed to {}: {}", action, e),
            },
        }
    }

    async fn id_exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?) AS found")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to check identity: {}", e) })?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get existence result: {}", e) })?;
        Ok(found == 1)
    }
}

#[async_trait]
impl IdentityRepository for MySqlIdentityRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        let query = r#"
            SELECT id, email, name, password_hash, registered_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to find identity: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_identity(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, identity: Identity) -> Result<Identity, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, name, password_hash, registered_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(identity.id.to_string())
            .bind(&identity.email)
            .bind(&identity.name)
            .bind(&identity.password_hash)
            .bind(identity.registered_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_write_error(e, "create identity"))?;

        Ok(identity)
    }

    async fn save(&self, identity: Identity) -> Result<Identity, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, name = ?, password_hash = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&identity.email)
            .bind(&identity.name)
            .bind(&identity.password_hash)
            .bind(identity.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_write_error(e, "save identity"))?;

        // An unchanged row may report zero affected rows
        if result.rows_affected() == 0 && !self.id_exists(identity.id).await? {
            return Err(DomainError::NotFound {
                resource: format!("identity {}", identity.id),
            });
        }

        Ok(identity)
    }

    async fn exists(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to check email: {}", e) })?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get existence result: {}", e) })?;
        Ok(found == 1)
    }
}
