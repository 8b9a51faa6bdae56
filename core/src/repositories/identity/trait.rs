//! Identity repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::Identity;
use crate::errors::DomainError;

/// Repository trait for Identity entity persistence operations
///
/// Identities are keyed by email, which is unique across the store. The row
/// id stays stable when the email changes.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Find an identity by its email
    ///
    /// # Arguments
    /// * `email` - Exact email to look up
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - Identity found
    /// * `Ok(None)` - No identity with this email
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError>;

    /// Create a new identity
    ///
    /// # Arguments
    /// * `identity` - The Identity entity to persist
    ///
    /// # Returns
    /// * `Ok(Identity)` - The created identity
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email already in use
    /// * `Err(DomainError)` - Store error occurred
    async fn create(&self, identity: Identity) -> Result<Identity, DomainError>;

    /// Save changes to an existing identity, matched by id
    ///
    /// # Arguments
    /// * `identity` - The Identity entity with updated fields
    ///
    /// # Returns
    /// * `Ok(Identity)` - The saved identity
    /// * `Err(DomainError::NotFound)` - No identity with this id
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - New email taken
    /// * `Err(DomainError)` - Store error occurred
    async fn save(&self, identity: Identity) -> Result<Identity, DomainError>;

    /// Check whether an identity with this email exists
    async fn exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
