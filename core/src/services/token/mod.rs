//! Token service module for bearer credential management
//!
//! This module handles all credential-related operations including:
//! - HS256 token issuance and verification
//! - Sliding-window renewal of credentials close to expiry
//! - Revocation through the ledger and background purging of inert entries

mod cleanup;
mod config;
mod renewal;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, RevocationCleanupConfig, RevocationCleanupService};
pub use config::TokenServiceConfig;
pub use renewal::RenewalPolicy;
pub use service::TokenService;
