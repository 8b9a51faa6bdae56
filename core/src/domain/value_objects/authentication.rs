//! Outcomes of credential verification and authentication.

use crate::domain::entities::{Claims, IssuedToken};

/// Whether a verified credential is close enough to expiry to be replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalHint {
    /// Remaining lifetime is at least the renewal window
    Fresh,
    /// Remaining lifetime is below the renewal window
    AboutToExpire,
}

impl RenewalHint {
    pub fn is_due(self) -> bool {
        matches!(self, RenewalHint::AboutToExpire)
    }
}

/// A credential that passed every verification check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    /// Decoded claims
    pub claims: Claims,

    /// Renewal hint computed against the verification instant
    pub renewal: RenewalHint,
}

impl VerifiedToken {
    /// Subject identity of the credential
    pub fn email(&self) -> &str {
        &self.claims.email
    }
}

/// An authenticated request context
///
/// `replacement` is set when the presented credential was about to expire
/// and a fresh one was minted for the same subject. The presented credential
/// stays valid until its own expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    /// Subject identity
    pub email: String,

    /// Claims of the presented credential
    pub claims: Claims,

    /// Freshly minted credential, when renewal was due
    pub replacement: Option<IssuedToken>,
}

impl Authentication {
    pub fn was_renewed(&self) -> bool {
        self.replacement.is_some()
    }
}
