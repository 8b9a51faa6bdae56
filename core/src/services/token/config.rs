//! Configuration for the token service

use acct_shared::config::JwtConfig;
use chrono::Duration;

use crate::domain::entities::{RENEWAL_WINDOW_MINUTES, TOKEN_LIFETIME_HOURS};
use crate::errors::TokenError;

/// Configuration for the token service
///
/// Built once at startup and handed to [`super::TokenService::new`]; the
/// service never reads the environment itself.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC-SHA256 signing secret
    pub secret: String,
    /// Issuer claim written into and required on every token
    pub issuer: String,
    /// Time from issuance to expiry
    pub lifetime: Duration,
    /// Remaining lifetime below which a replacement is minted
    pub renewal_window: Duration,
}

impl TokenServiceConfig {
    /// Create a configuration with the default lifetime and renewal window
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
            renewal_window: Duration::minutes(RENEWAL_WINDOW_MINUTES),
        }
    }

    /// Reject configurations that could not sign or verify anything
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::SigningFailure {
                message: "signing secret is empty".to_string(),
            });
        }
        if self.issuer.trim().is_empty() {
            return Err(TokenError::SigningFailure {
                message: "issuer is empty".to_string(),
            });
        }
        if self.lifetime <= Duration::zero() {
            return Err(TokenError::SigningFailure {
                message: "token lifetime must be positive".to_string(),
            });
        }
        if self.renewal_window < Duration::zero() {
            return Err(TokenError::SigningFailure {
                message: "renewal window must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            lifetime: Duration::seconds(config.token_lifetime_seconds),
            renewal_window: Duration::seconds(config.renewal_window_seconds),
        }
    }
}
