//! Business services containing domain logic and use cases.

pub mod account;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, ProfileChanges, ProfileUpdate};
pub use token::{
    CleanupResult, RenewalPolicy, RevocationCleanupConfig, RevocationCleanupService,
    TokenService, TokenServiceConfig,
};
