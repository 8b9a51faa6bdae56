//! Credential entities for bearer-token authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Credential lifetime (24 hours)
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Remaining lifetime below which a replacement credential is minted
pub const RENEWAL_WINDOW_MINUTES: i64 = 5;

/// Purpose tag carried in the `sub` claim of every credential
pub const TOKEN_PURPOSE: &str = "auth";

/// Claims structure for the signed token payload
///
/// The schema is fixed: a payload missing any of these fields does not
/// deserialize and the token is treated as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity (account email)
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Purpose tag, always [`TOKEN_PURPOSE`]
    pub sub: String,
}

impl Claims {
    /// Creates claims for a credential issued at `now`
    ///
    /// # Arguments
    ///
    /// * `email` - Subject identity
    /// * `issuer` - Issuer claim from configuration
    /// * `now` - Issuance instant, also used as not-before
    /// * `lifetime` - Time until expiry
    pub fn new(email: &str, issuer: &str, now: DateTime<Utc>, lifetime: Duration) -> Self {
        let expiry = now + lifetime;

        Self {
            email: email.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            sub: TOKEN_PURPOSE.to_string(),
        }
    }

    /// Expiry as a timestamp, `None` if out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Not-before as a timestamp, `None` if out of range
    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.nbf, 0).single()
    }

    /// Whether the claims name an identity and carry the auth purpose tag
    pub fn has_identity(&self) -> bool {
        !self.email.trim().is_empty() && self.sub == TOKEN_PURPOSE
    }

    /// Whether expiry lies after issuance
    pub fn has_valid_window(&self) -> bool {
        self.exp > self.iat
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => now > expires_at,
            None => true,
        }
    }
}

/// A freshly signed credential together with the claims it encodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Raw signed token string handed to the client
    pub token: String,

    /// Claims encoded in the token
    pub claims: Claims,
}

impl IssuedToken {
    /// Subject identity of the credential
    pub fn email(&self) -> &str {
        &self.claims.email
    }

    /// Expiry of the credential
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }
}
