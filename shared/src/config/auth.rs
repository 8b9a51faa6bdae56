//! Authentication configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Bearer token signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens
    pub secret: String,

    /// Issuer claim written into every token and required on verification
    pub issuer: String,

    /// Token lifetime in seconds (24 hours)
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_seconds: i64,

    /// A replacement token is minted when less than this many seconds remain
    #[serde(default = "default_renewal_window")]
    pub renewal_window_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            issuer: String::from("account-service"),
            token_lifetime_seconds: default_token_lifetime(),
            renewal_window_seconds: default_renewal_window(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the issuer claim
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set token lifetime in hours
    pub fn with_lifetime_hours(mut self, hours: i64) -> Self {
        self.token_lifetime_seconds = hours * 3600;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token configuration
    pub jwt: JwtConfig,

    /// bcrypt work factor for password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// How often expired revocation entries are purged; 0 disables the task
    #[serde(default)]
    pub ledger_purge_interval_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
            ledger_purge_interval_seconds: 0,
        }
    }
}

fn default_token_lifetime() -> i64 {
    24 * 3600
}

fn default_renewal_window() -> i64 {
    5 * 60
}

fn default_bcrypt_cost() -> u32 {
    12
}
