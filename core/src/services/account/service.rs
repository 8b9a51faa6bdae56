//! Main account service implementation

use std::sync::Arc;

use acct_shared::utils::validation::{is_valid_email, is_valid_name, is_valid_password};
use tracing::{debug, error, info};

use crate::domain::entities::{Identity, IssuedToken};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::{IdentityRepository, RevocationRepository};
use crate::services::token::TokenService;

use super::config::AccountServiceConfig;
use super::password::{hash_password, verify_password, DUMMY_HASH};

/// Requested profile changes; empty or absent fields are ignored
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Outcome of a profile update
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    /// The identity after the update
    pub identity: Identity,
    /// Credential for the new email, when the email changed
    pub token: Option<IssuedToken>,
    /// False when the email changed but the presented token could not be
    /// written to the revocation ledger
    pub previous_token_revoked: bool,
}

/// Account service for registration, login and profile management
pub struct AccountService<I, R>
where
    I: IdentityRepository,
    R: RevocationRepository,
{
    /// Identity store keyed by email
    identities: Arc<I>,
    /// Token service for issuing and revoking credentials
    token_service: Arc<TokenService<R>>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<I, R> AccountService<I, R>
where
    I: IdentityRepository,
    R: RevocationRepository,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `identities` - Repository for identity persistence
    /// * `token_service` - Service for credential issuance and revocation
    /// * `config` - Service configuration
    pub fn new(
        identities: Arc<I>,
        token_service: Arc<TokenService<R>>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            identities,
            token_service,
            config,
        }
    }

    /// The token service used by this account service
    pub fn token_service(&self) -> &Arc<TokenService<R>> {
        &self.token_service
    }

    /// Register a new identity
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - The stored identity
    /// * `Err(DomainError::ValidationErr)` - A field failed validation
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email in use
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> DomainResult<Identity> {
        let name = name.trim();
        let email = email.trim();

        require("name", name)?;
        require("email", email)?;
        require("password", password)?;

        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_valid_password(password) {
            return Err(ValidationError::InvalidPassword.into());
        }
        if password != confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }
        if !is_valid_name(name) {
            return Err(ValidationError::InvalidName.into());
        }

        if self.identities.exists(email).await? {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        let identity = self
            .identities
            .create(Identity::new(name.to_string(), email.to_string(), password_hash))
            .await?;

        info!(email = %identity.email, "Registered identity");

        Ok(identity)
    }

    /// Log in with email and password
    ///
    /// An unknown email and a wrong password both yield
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<IssuedToken> {
        let email = email.trim();

        require("email", email)?;
        require("password", password)?;

        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_valid_password(password) {
            return Err(ValidationError::InvalidPassword.into());
        }

        let identity = match self.identities.find_by_email(email).await? {
            Some(identity) => identity,
            None => {
                let _ = verify_password(password, DUMMY_HASH).await;
                debug!(email = %email, "Login for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password, &identity.password_hash).await? {
            debug!(email = %email, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let issued = self.token_service.issue(&identity.email)?;
        info!(email = %identity.email, "Logged in");

        Ok(issued)
    }

    /// Fetch the identity behind an authenticated email
    pub async fn profile(&self, email: &str) -> DomainResult<Identity> {
        self.identities
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::IdentityNotFound.into())
    }

    /// Update display name and/or email
    ///
    /// When the email changes, a credential for the new email is issued before
    /// anything is written, and `presented_token` is revoked after the save.
    /// The save is already committed at that point, so a ledger failure is
    /// logged and reported through `previous_token_revoked` instead of failing
    /// the update.
    pub async fn update_profile(
        &self,
        email: &str,
        changes: ProfileChanges,
        presented_token: &str,
    ) -> DomainResult<ProfileUpdate> {
        let mut identity = self.profile(email).await?;

        let new_name = non_empty(changes.name);
        let new_email = non_empty(changes.email).filter(|e| *e != identity.email);

        if let Some(name) = &new_name {
            if !is_valid_name(name) {
                return Err(ValidationError::InvalidName.into());
            }
        }
        if let Some(new_email) = &new_email {
            if !is_valid_email(new_email) {
                return Err(ValidationError::InvalidEmail.into());
            }
            if self.identities.exists(new_email).await? {
                return Err(AuthError::EmailAlreadyRegistered.into());
            }
        }

        if new_name.is_none() && new_email.is_none() {
            return Ok(ProfileUpdate {
                identity,
                token: None,
                previous_token_revoked: true,
            });
        }

        if let Some(name) = new_name {
            identity.rename(name);
        }
        let token = match new_email {
            Some(new_email) => {
                let token = self.token_service.issue(&new_email)?;
                identity.change_email(new_email);
                Some(token)
            }
            None => None,
        };
        let email_changed = token.is_some();

        let identity = self.identities.save(identity).await?;
        info!(email = %identity.email, email_changed, "Updated profile");

        let mut previous_token_revoked = true;
        if email_changed {
            if let Err(e) = self.token_service.revoke(presented_token).await {
                error!(
                    email = %identity.email,
                    error = %e,
                    "Failed to revoke credential for the previous email"
                );
                previous_token_revoked = false;
            }
        }

        Ok(ProfileUpdate {
            identity,
            token,
            previous_token_revoked,
        })
    }

    /// Change the password after checking the current one
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        require("old_password", old_password)?;
        require("new_password", new_password)?;

        if !is_valid_password(new_password) {
            return Err(ValidationError::InvalidPassword.into());
        }

        let mut identity = self.profile(email).await?;

        if !verify_password(old_password, &identity.password_hash).await? {
            return Err(AuthError::WrongPassword.into());
        }

        let password_hash = hash_password(new_password, self.config.bcrypt_cost).await?;
        identity.set_password_hash(password_hash);
        self.identities.save(identity).await?;

        info!(email = %email, "Changed password");

        Ok(())
    }

    /// Log out by revoking the presented credential
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        self.token_service.revoke(token).await?;
        Ok(())
    }
}

fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        }
        .into());
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
