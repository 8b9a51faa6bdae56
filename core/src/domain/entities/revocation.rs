//! Revocation ledger entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A token that must no longer be honored
///
/// Entries are append-only. Matching is by exact raw token string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// Raw token string as presented by the client
    pub token: String,

    /// When the token was revoked
    pub revoked_at: DateTime<Utc>,

    /// Expiry of the revoked credential, when it could be decoded
    pub expires_at: Option<DateTime<Utc>>,
}

impl RevocationEntry {
    /// Creates an entry revoked now
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            revoked_at: Utc::now(),
            expires_at,
        }
    }

    /// Whether the revoked credential has expired by `now`
    ///
    /// Expired credentials are rejected before the ledger is consulted, so an
    /// inert entry can be purged. Entries without a known expiry never are.
    pub fn is_inert_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |expires_at| now > expires_at)
    }
}
