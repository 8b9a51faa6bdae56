//! Main token service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error, info};

use crate::domain::entities::{Claims, IssuedToken, RevocationEntry};
use crate::domain::value_objects::{Authentication, VerifiedToken};
use crate::errors::TokenError;
use crate::repositories::RevocationRepository;

use super::config::TokenServiceConfig;
use super::renewal::RenewalPolicy;

/// Service for issuing, verifying, renewing and revoking bearer credentials
///
/// Holds no mutable state of its own; the ledger is the only shared state and
/// lives behind the repository.
pub struct TokenService<R: RevocationRepository> {
    ledger: Arc<R>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    renewal: RenewalPolicy,
}

impl<R: RevocationRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `ledger` - Revocation ledger consulted on every verification
    /// * `config` - Signing secret, issuer, lifetime and renewal window
    ///
    /// # Returns
    ///
    /// A new `TokenService` or `TokenError::SigningFailure` if the
    /// configuration cannot sign tokens (e.g. empty secret)
    pub fn new(ledger: Arc<R>, config: TokenServiceConfig) -> Result<Self, TokenError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Time-based checks run against the caller's clock in `verify_at`
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let renewal = RenewalPolicy::new(config.renewal_window);

        Ok(Self {
            ledger,
            config,
            encoding_key,
            decoding_key,
            validation,
            renewal,
        })
    }

    /// Issues a credential for `email` at the current time
    pub fn issue(&self, email: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(email, Utc::now())
    }

    /// Issues a credential for `email` as of `now`
    ///
    /// Timestamps are truncated to whole seconds, so two credentials for the
    /// same subject issued within the same second are identical.
    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let claims = Claims::new(email, &self.config.issuer, now, self.config.lifetime);
        let token = self.encode_jwt(&claims)?;

        info!(email = %email, exp = claims.exp, "Issued credential");

        Ok(IssuedToken { token, claims })
    }

    /// Verifies a raw token at the current time
    pub async fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, Utc::now()).await
    }

    /// Verifies a raw token as of `now`
    ///
    /// Checks run in a fixed order: signature and claim shape, not-before,
    /// expiry, then ledger membership. The ledger is only consulted for
    /// unexpired credentials. Verification never mutates state.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedToken)` - Claims and the renewal hint for `now`
    /// * `Err(TokenError::Malformed)` - Bad signature, bad shape, or not yet valid
    /// * `Err(TokenError::Expired)` - `now` is past the expiry
    /// * `Err(TokenError::Revoked)` - Token is in the ledger
    /// * `Err(TokenError::SigningFailure)` - Ledger lookup failed
    pub async fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedToken, TokenError> {
        let claims = self.decode_jwt(token)?;

        let not_before = claims.not_before().ok_or(TokenError::Malformed)?;
        if now < not_before {
            return Err(TokenError::Malformed);
        }

        let expires_at = claims.expires_at().ok_or(TokenError::Malformed)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        let revoked = self.ledger.is_revoked(token).await.map_err(|e| {
            error!(error = %e, "Revocation ledger lookup failed");
            TokenError::SigningFailure {
                message: format!("revocation lookup failed: {}", e),
            }
        })?;
        if revoked {
            return Err(TokenError::Revoked);
        }

        let renewal = self.renewal.evaluate(expires_at, now);

        Ok(VerifiedToken { claims, renewal })
    }

    /// Issues a fresh credential for the subject of a valid token
    ///
    /// The presented token is not revoked and stays valid until its own expiry.
    pub async fn renew(&self, token: &str) -> Result<IssuedToken, TokenError> {
        self.renew_at(token, Utc::now()).await
    }

    /// Issues a fresh credential for the subject of a valid token as of `now`
    pub async fn renew_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let verified = self.verify_at(token, now).await?;
        self.issue_at(verified.email(), now)
    }

    /// Strict authentication: every verification failure is a rejection
    ///
    /// When the renewal hint fires, a replacement credential is minted and
    /// returned alongside the identity.
    pub async fn authenticate(&self, token: &str) -> Result<Authentication, TokenError> {
        self.authenticate_at(token, Utc::now()).await
    }

    /// Strict authentication as of `now`
    pub async fn authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Authentication, TokenError> {
        let verified = match self.verify_at(token, now).await {
            Ok(verified) => verified,
            Err(e) => {
                if e.is_expected() {
                    debug!(reason = %e, "Rejected credential");
                }
                return Err(e);
            }
        };

        let replacement = if verified.renewal.is_due() {
            let issued = self.issue_at(verified.email(), now)?;
            debug!(email = %verified.email(), "Credential about to expire, minted replacement");
            Some(issued)
        } else {
            None
        };

        Ok(Authentication {
            email: verified.claims.email.clone(),
            claims: verified.claims,
            replacement,
        })
    }

    /// Soft identification: bad credentials yield an anonymous caller
    ///
    /// Returns `Ok(None)` for a missing, malformed, expired or revoked token.
    /// Only internal failures are errors.
    pub async fn identify(&self, token: Option<&str>) -> Result<Option<Authentication>, TokenError> {
        self.identify_at(token, Utc::now()).await
    }

    /// Soft identification as of `now`
    pub async fn identify_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<Authentication>, TokenError> {
        let Some(token) = token else {
            return Ok(None);
        };

        match self.authenticate_at(token, now).await {
            Ok(auth) => Ok(Some(auth)),
            Err(e) if e.is_expected() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Appends a raw token to the revocation ledger
    ///
    /// Any string is accepted; revoking the same token twice is harmless. When
    /// the token decodes, its expiry is recorded so the entry can be purged
    /// once inert.
    pub async fn revoke(&self, token: &str) -> Result<(), TokenError> {
        let claims = self.decode_jwt(token).ok();
        let expires_at = claims.as_ref().and_then(Claims::expires_at);

        self.ledger
            .append(RevocationEntry::new(token, expires_at))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to append revocation entry");
                TokenError::SigningFailure {
                    message: format!("revocation append failed: {}", e),
                }
            })?;

        match claims {
            Some(claims) => info!(email = %claims.email, "Revoked credential"),
            None => info!("Revoked undecodable token"),
        }

        Ok(())
    }

    /// Purges ledger entries whose credential expired before `now`
    pub async fn purge_revocations_at(&self, now: DateTime<Utc>) -> Result<usize, TokenError> {
        self.ledger.purge_expired(now).await.map_err(|e| {
            error!(error = %e, "Failed to purge revocation ledger");
            TokenError::SigningFailure {
                message: format!("revocation purge failed: {}", e),
            }
        })
    }

    /// Encodes claims into a signed HS256 token
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to sign credential");
            TokenError::SigningFailure {
                message: e.to_string(),
            }
        })
    }

    /// Decodes and checks signature, issuer and claim shape
    ///
    /// Every failure, whatever its cause, is `Malformed`.
    fn decode_jwt(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(kind = ?e.kind(), "Token failed to decode");
                TokenError::Malformed
            })?;

        if !claims.has_identity() || !claims.has_valid_window() {
            return Err(TokenError::Malformed);
        }

        Ok(claims)
    }
}
