//! # Infrastructure Layer
//!
//! Concrete store implementations for the account service:
//! - **Database**: MySQL implementations of the identity store and the
//!   revocation ledger using SQLx
//! - **Memory**: process-local implementations for development and tests
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use acct_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// In-memory store implementations
pub mod memory;

pub use memory::{InMemoryIdentityRepository, InMemoryRevocationRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
