//! Configuration for the account service

use acct_shared::config::AuthConfig;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl From<&AuthConfig> for AccountServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
